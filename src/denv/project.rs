//! Project descriptor - a single build target
//!
//! A project is a named, path-located target (static library, unit-test
//! binary or application) with an ordered list of the libraries it links
//! against. Projects are created by the `setup_default_*` factories, get
//! their dependencies appended once, and are then shared through `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// What kind of artifact a project produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Static library
    Library,
    /// Unit-test executable
    UnitTest,
    /// Application executable
    Executable,
}

impl ProjectKind {
    /// Whether the project links into an executable
    pub fn is_executable(&self) -> bool {
        matches!(self, ProjectKind::UnitTest | ProjectKind::Executable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Library => "library",
            ProjectKind::UnitTest => "unittest",
            ProjectKind::Executable => "executable",
        }
    }
}

/// Implementation language of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
}

/// A build target descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    path: String,
    kind: ProjectKind,
    language: Language,
    source_dirs: Vec<String>,
    include_dirs: Vec<String>,
    defines: Vec<String>,
    dependencies: Vec<Arc<Project>>,
}

impl Project {
    /// Create an empty project without any default layout
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            language: Language::Cpp,
            source_dirs: Vec::new(),
            include_dirs: Vec::new(),
            defines: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository path as declared (may use `\` separators)
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Source directories, relative to the repository directory
    pub fn source_dirs(&self) -> &[String] {
        &self.source_dirs
    }

    /// Include directories, relative to the repository directory
    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }

    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    /// Libraries this project links against, in declaration order
    pub fn dependencies(&self) -> &[Arc<Project>] {
        &self.dependencies
    }

    pub fn add_source_dir(&mut self, dir: impl Into<String>) {
        self.source_dirs.push(dir.into());
    }

    pub fn add_include_dir(&mut self, dir: impl Into<String>) {
        self.include_dirs.push(dir.into());
    }

    pub fn add_define(&mut self, define: impl Into<String>) {
        self.defines.push(define.into());
    }

    /// Append a dependency. Duplicates are kept.
    pub fn add_dependency(&mut self, dependency: Arc<Project>) {
        self.dependencies.push(dependency);
    }

    /// Builder-style variant of [`Project::add_dependency`]
    pub fn with_dependency(mut self, dependency: Arc<Project>) -> Self {
        self.add_dependency(dependency);
        self
    }

    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name()).collect()
    }

    /// Names listed more than once in the dependency list, each reported once
    pub fn duplicate_dependencies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for name in self.dependency_names() {
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }

    /// Repository path with `/` separators and no empty segments
    ///
    /// `github.com\jurgen-kluft\xvmem` becomes `github.com/jurgen-kluft/xvmem`.
    pub fn repo_dir(&self) -> String {
        normalize_repo_path(&self.path)
    }
}

/// Normalize a repository path to forward slashes
pub fn normalize_repo_path(path: &str) -> String {
    path.split(['\\', '/'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Default C++ static library: `source/main/cpp` + `source/main/include`
pub fn setup_default_cpp_lib_project(name: &str, path: &str) -> Project {
    let mut project = Project::new(name, path, ProjectKind::Library);
    project.add_source_dir("source/main/cpp");
    project.add_include_dir("source/main/include");
    project
}

/// Default C++ unit-test binary: `source/test/cpp`, sees the main headers too
pub fn setup_default_cpp_test_project(name: &str, path: &str) -> Project {
    let mut project = Project::new(name, path, ProjectKind::UnitTest);
    project.add_source_dir("source/test/cpp");
    project.add_include_dir("source/test/include");
    project.add_include_dir("source/main/include");
    project.add_define("TARGET_TEST");
    project
}

/// Default C++ application: `source/app/cpp` + `source/app/include`
pub fn setup_default_cpp_app_project(name: &str, path: &str) -> Project {
    let mut project = Project::new(name, path, ProjectKind::Executable);
    project.add_source_dir("source/app/cpp");
    project.add_include_dir("source/app/include");
    project.add_include_dir("source/main/include");
    project
}
