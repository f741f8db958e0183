//! OutputFile - a generated build file
//!
//! Backends produce output files; the planner decides what happens to them
//! on disk.

use std::path::{Path, PathBuf};

use super::toolchain::Toolchain;
use crate::fs::hash_content;

/// A generated file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output directory
    path: PathBuf,
    content: String,
    toolchain: Toolchain,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, toolchain: Toolchain) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            toolchain,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// SHA-256 of the content (`sha256:<hex>`)
    pub fn hash(&self) -> String {
        hash_content(self.content.as_bytes())
    }
}
