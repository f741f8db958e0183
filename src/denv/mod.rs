//! Package-descriptor library
//!
//! Pure data: packages, projects and the dependency graph between them.
//! Nothing in here touches the file system.

pub mod graph;
pub mod package;
pub mod project;

pub use graph::DependencyGraph;
pub use package::{Package, PackageSummary, ProjectSummary};
pub use project::{
    normalize_repo_path, setup_default_cpp_app_project, setup_default_cpp_lib_project,
    setup_default_cpp_test_project, Language, Project, ProjectKind,
};
