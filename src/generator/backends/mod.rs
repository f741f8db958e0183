//! Build backends
//!
//! One backend per toolchain. Each turns the dependency graph of a package
//! into the files its build system reads.

pub mod cmake;
pub mod make;

pub use cmake::CMakeBackend;
pub use make::MakeBackend;

use std::path::Path;

use super::context::GeneratorContext;
use super::output::OutputFile;
use super::toolchain::Toolchain;
use crate::denv::{DependencyGraph, Package, Project};
use crate::error::GenResult;

/// Emits build files for one toolchain
pub trait BuildBackend {
    /// Toolchain this backend targets
    fn toolchain(&self) -> Toolchain;

    /// Produce the build files for `package`
    fn emit(
        &self,
        package: &Package,
        graph: &DependencyGraph,
        ctx: &GeneratorContext,
    ) -> GenResult<Vec<OutputFile>>;
}

/// Get the backend for a specific toolchain
pub fn backend_for(toolchain: Toolchain) -> Box<dyn BuildBackend> {
    match toolchain {
        Toolchain::Make => Box::new(MakeBackend::new()),
        Toolchain::CMake => Box::new(CMakeBackend::new()),
    }
}

/// Header line shared by every generated file
pub(crate) fn banner(comment: &str, package: &Package) -> String {
    format!(
        "{comment} Generated by xvmem for package '{}'. Do not edit; changes are overwritten.\n",
        package.name()
    )
}

/// Path with forward slashes, as build files expect
pub(crate) fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Include directories a project compiles with, as `repo_dir/dir` pairs
///
/// Own directories first, then those of every transitive dependency, each
/// listed once.
pub(crate) fn include_dirs(project: &Project, graph: &DependencyGraph) -> Vec<String> {
    let mut dirs: Vec<String> = Vec::new();
    let mut push = |p: &Project| {
        for dir in p.include_dirs() {
            let entry = format!("{}/{}", p.repo_dir(), dir);
            if !dirs.contains(&entry) {
                dirs.push(entry);
            }
        }
    };

    push(project);
    for dependency in graph.transitive_dependencies(project.name()) {
        push(dependency.as_ref());
    }
    dirs
}

/// Direct dependency names with repeats removed, first occurrence kept
pub(crate) fn unique_dependency_names(project: &Project) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in project.dependency_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
