//! Generation manifest - tracks the hashes of generated files
//!
//! Stored as `<output_dir>/manifest.toml`. The planner compares on-disk
//! hashes against it to tell generator-owned files from files a user has
//! edited, and to find outputs that are no longer produced.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GenError, GenResult};
use crate::fs::{FileSystem, LocalFs};

/// Manifest file name inside the output directory
pub const MANIFEST_FILE: &str = "manifest.toml";

/// Current on-disk format version
pub const MANIFEST_VERSION: u32 = 1;

/// Normalize a path for manifest storage (always use forward slashes)
pub(crate) fn normalize_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// In-memory manifest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    package: Option<String>,
    generated_at: Option<DateTime<Utc>>,
    files: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFileEntry {
    hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlManifest {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    files: BTreeMap<String, TomlFileEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn set_package(&mut self, name: impl Into<String>) {
        self.package = Some(name.into());
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.generated_at = Some(at);
    }

    /// Recorded hash for a relative output path
    pub fn hash_for(&self, path: &Path) -> Option<&str> {
        self.files
            .get(&normalize_manifest_path(path))
            .map(String::as_str)
    }

    pub fn set(&mut self, path: &Path, hash: impl Into<String>) {
        self.files.insert(normalize_manifest_path(path), hash.into());
    }

    /// Tracked paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.keys().map(PathBuf::from)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Load a manifest; a missing file yields an empty one
    pub fn load(path: &Path) -> GenResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| manifest_error(path, e))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> GenResult<Self> {
        let toml_manifest: TomlManifest =
            toml::from_str(content).map_err(|e| manifest_error(path, e))?;

        if toml_manifest.version != MANIFEST_VERSION {
            return Err(GenError::Manifest {
                file: path.to_path_buf(),
                message: format!(
                    "unsupported version {} (expected {})",
                    toml_manifest.version, MANIFEST_VERSION
                ),
            });
        }

        Ok(Self {
            package: toml_manifest.package,
            generated_at: toml_manifest.generated_at,
            files: toml_manifest
                .files
                .into_iter()
                .map(|(k, v)| (k, v.hash))
                .collect(),
        })
    }

    fn to_toml(&self) -> GenResult<String> {
        let toml_manifest = TomlManifest {
            version: MANIFEST_VERSION,
            package: self.package.clone(),
            generated_at: self.generated_at,
            files: self
                .files
                .iter()
                .map(|(k, v)| (k.clone(), TomlFileEntry { hash: v.clone() }))
                .collect(),
        };
        toml::to_string_pretty(&toml_manifest).map_err(|e| GenError::Manifest {
            file: PathBuf::from(MANIFEST_FILE),
            message: e.to_string(),
        })
    }

    /// Save under an exclusive lock on `<path>.lock`
    pub fn save(&self, path: &Path) -> GenResult<()> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| manifest_error(path, e))?;
        }

        let lock_file = fs::File::create(&lock_path).map_err(|e| manifest_error(path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| manifest_error(path, e))?;

        let result = self
            .to_toml()
            .and_then(|content| LocalFs::new().write_atomic(path, &content));

        release_lock(&lock_file, &lock_path);
        result
    }
}

/// Unlock and delete the lock file. Failures are logged; returns whether
/// both steps succeeded.
fn release_lock(lock_file: &fs::File, lock_path: &Path) -> bool {
    let mut clean = true;
    if let Err(e) = FileExt::unlock(lock_file) {
        warn!(path = %lock_path.display(), error = %e, "failed to unlock manifest lock");
        clean = false;
    }
    if let Err(e) = fs::remove_file(lock_path) {
        warn!(path = %lock_path.display(), error = %e, "failed to remove manifest lock file");
        clean = false;
    }
    clean
}

fn manifest_error(path: &Path, err: impl std::fmt::Display) -> GenError {
    GenError::Manifest {
        file: path.to_path_buf(),
        message: err.to_string(),
    }
}
