//! Package descriptor - a bundle of one main library, its tests and the
//! packages it pulls in

use std::sync::Arc;

use serde::Serialize;

use super::project::{normalize_repo_path, Project, ProjectKind};
use crate::error::{GenError, GenResult};

/// A named unit driving build-file generation
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: String,
    path: String,
    packages: Vec<Arc<Package>>,
    main_lib: Option<Arc<Project>>,
    unittests: Vec<Arc<Project>>,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            packages: Vec::new(),
            main_lib: None,
            unittests: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository path as declared
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Repository path with `/` separators
    pub fn repo_dir(&self) -> String {
        normalize_repo_path(&self.path)
    }

    /// Register a sub-package so tooling can find transitive dependencies
    pub fn add_package(&mut self, package: Arc<Package>) {
        self.packages.push(package);
    }

    /// Attach the primary library; replaces a previously attached one
    pub fn add_main_lib(&mut self, project: Arc<Project>) {
        self.main_lib = Some(project);
    }

    pub fn add_unittest(&mut self, project: Arc<Project>) {
        self.unittests.push(project);
    }

    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    pub fn main_lib(&self) -> Option<&Arc<Project>> {
        self.main_lib.as_ref()
    }

    pub fn unittests(&self) -> &[Arc<Project>] {
        &self.unittests
    }

    /// Main library, or `MissingMainLib`
    pub fn require_main_lib(&self) -> GenResult<&Arc<Project>> {
        self.main_lib.as_ref().ok_or_else(|| GenError::MissingMainLib {
            package: self.name.clone(),
        })
    }

    /// Root projects in generation order: main library first, then tests
    pub fn root_projects(&self) -> Vec<&Arc<Project>> {
        self.main_lib.iter().chain(self.unittests.iter()).collect()
    }

    /// Check the structural invariants of the package
    ///
    /// A main library must be attached and every unit test must link it.
    pub fn validate(&self) -> GenResult<()> {
        let main_lib = self.require_main_lib()?;
        for test in &self.unittests {
            if !test.dependencies().iter().any(|d| Arc::ptr_eq(d, main_lib) || **d == **main_lib) {
                return Err(GenError::TestMissingMainLib {
                    test: test.name().to_string(),
                    lib: main_lib.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serializable view of the package tree
    pub fn summary(&self) -> PackageSummary {
        PackageSummary::from(self)
    }
}

/// Serializable snapshot of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub path: String,
    pub kind: ProjectKind,
    pub dependencies: Vec<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name().to_string(),
            path: project.repo_dir(),
            kind: project.kind(),
            dependencies: project
                .dependency_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Serializable snapshot of a package and its sub-packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub path: String,
    pub packages: Vec<PackageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_lib: Option<ProjectSummary>,
    pub unittests: Vec<ProjectSummary>,
}

impl From<&Package> for PackageSummary {
    fn from(package: &Package) -> Self {
        Self {
            name: package.name().to_string(),
            path: package.repo_dir(),
            packages: package.packages().iter().map(|p| Self::from(p.as_ref())).collect(),
            main_lib: package.main_lib().map(|p| ProjectSummary::from(p.as_ref())),
            unittests: package
                .unittests()
                .iter()
                .map(|p| ProjectSummary::from(p.as_ref()))
                .collect(),
        }
    }
}
