//! Error types for xvmem
//!
//! Library code returns `GenResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for descriptor and generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Main error type for descriptor and generator operations
#[derive(Error, Debug)]
pub enum GenError {
    /// No built-in package source carries this name
    #[error("unknown package '{name}'")]
    UnknownPackage { name: String },

    /// Package has no main library attached
    #[error("package '{package}' has no main library")]
    MissingMainLib { package: String },

    /// Unit test does not link against the library it tests
    #[error("unit test '{test}' does not depend on main library '{lib}'")]
    TestMissingMainLib { test: String, lib: String },

    /// Two different projects share one name in the dependency graph
    #[error("project name '{name}' is bound to two different projects")]
    ConflictingProject { name: String },

    /// Toolchain name not recognised
    #[error("unknown toolchain '{value}' (expected one of: make, cmake)")]
    UnknownToolchain { value: String },

    /// Build configuration name not recognised
    #[error("unknown build configuration '{value}' (expected debug or release)")]
    UnknownConfiguration { value: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Generation manifest could not be read or written
    #[error("manifest error in {file}: {message}")]
    Manifest { file: PathBuf, message: String },

    /// Output path escapes the output directory
    #[error("output path '{path}' escapes output directory '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
