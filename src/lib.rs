//! xvmem - package descriptor and native build-file generator
//!
//! Describes the `xvmem` C++ package (a static library plus its unit-test
//! binary) together with its dependency packages, and generates Makefile
//! and CMake build files for it.

pub mod config;
pub mod denv;
pub mod error;
pub mod fs;
pub mod generator;
pub mod logging;
pub mod packages;
pub mod ui;

// Re-exports for convenience
pub use config::{Config, LoadedConfig};
pub use denv::{DependencyGraph, Package, Project, ProjectKind};
pub use error::{GenError, GenResult};
pub use generator::{generate, init, GenerateReport, GeneratorContext, GeneratorOptions, Toolchain};
pub use packages::{build_package_descriptor, find_package, PackageSource};
