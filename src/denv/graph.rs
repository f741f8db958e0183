//! Dependency graph derived from a package
//!
//! Flattens every project reachable from the package roots into a single
//! name-keyed set and orders it dependencies-first, which is the order the
//! build backends declare targets in.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::package::Package;
use super::project::Project;
use crate::error::{GenError, GenResult};

/// Flattened, ordered view of all projects a package needs
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    order: Vec<Arc<Project>>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Collect the projects reachable from the package's main library and tests
    ///
    /// Projects are identified by name. The same name bound to two
    /// structurally different projects is an error.
    pub fn build(package: &Package) -> GenResult<Self> {
        let mut graph = Self {
            order: Vec::new(),
            index: HashMap::new(),
        };

        for root in package.root_projects() {
            graph.visit(root)?;
        }

        debug!(
            package = package.name(),
            projects = graph.order.len(),
            "built dependency graph"
        );
        Ok(graph)
    }

    fn visit(&mut self, project: &Arc<Project>) -> GenResult<()> {
        if let Some(&i) = self.index.get(project.name()) {
            let known = &self.order[i];
            if !Arc::ptr_eq(known, project) && **known != **project {
                return Err(GenError::ConflictingProject {
                    name: project.name().to_string(),
                });
            }
            return Ok(());
        }

        for duplicate in project.duplicate_dependencies() {
            warn!(
                project = project.name(),
                dependency = duplicate,
                "dependency listed more than once"
            );
        }

        for dependency in project.dependencies() {
            self.visit(dependency)?;
        }

        self.index.insert(project.name().to_string(), self.order.len());
        self.order.push(project.clone());
        Ok(())
    }

    /// Projects with every dependency listed before its dependents
    pub fn build_order(&self) -> &[Arc<Project>] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Project>> {
        self.index.get(name).map(|&i| &self.order[i])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Dependencies of a project, each listed once, closest first
    pub fn transitive_dependencies(&self, name: &str) -> Vec<&Arc<Project>> {
        let mut result: Vec<&Arc<Project>> = Vec::new();
        let Some(project) = self.get(name) else {
            return result;
        };

        let mut queue: Vec<&Arc<Project>> = project.dependencies().iter().collect();
        let mut cursor = 0;
        while cursor < queue.len() {
            let current = queue[cursor];
            cursor += 1;
            if result.iter().any(|p| p.name() == current.name()) {
                continue;
            }
            result.push(current);
            queue.extend(current.dependencies().iter());
        }
        result
    }

    /// Link order for an executable: dependents before their dependencies
    ///
    /// Static linkers resolve symbols left to right, so a library must come
    /// after every library that uses it.
    pub fn link_order(&self, name: &str) -> Vec<&Arc<Project>> {
        let deps = self.transitive_dependencies(name);
        self.order
            .iter()
            .rev()
            .filter(|p| deps.iter().any(|d| d.name() == p.name()))
            .collect()
    }
}
