//! Generation plan
//!
//! Decides, per generated file, whether it is created, updated, left alone
//! or skipped because a user edited it, and which previously generated
//! files should be removed. Execution applies the plan through a
//! [`FileSystem`].

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use similar::TextDiff;
use tracing::{debug, warn};

use super::manifest::{normalize_manifest_path, Manifest};
use super::output::OutputFile;
use crate::error::{GenError, GenResult};
use crate::fs::{hash_content, FileSystem};

/// What happens to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// File does not exist yet
    Create,
    /// Generator-owned file with new content
    Update,
    /// Content already up to date
    Unchanged,
    /// User-modified file left alone
    Skip,
    /// Generator-owned file no longer produced
    Remove,
}

/// One planned file operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub action: FileAction,
    /// Content currently on disk, when it was read
    pub old_content: Option<String>,
    /// Content the generator wants; `None` for orphans
    pub new_content: Option<String>,
}

impl PlannedFile {
    /// Whether the file was produced by this run (not an orphan)
    pub fn is_generated(&self) -> bool {
        self.new_content.is_some()
    }

    /// Whether executing this entry touches the file system
    pub fn is_change(&self) -> bool {
        matches!(
            self.action,
            FileAction::Create | FileAction::Update | FileAction::Remove
        )
    }

    /// Unified diff from the on-disk content to the planned content
    pub fn unified_diff(&self) -> Option<String> {
        if !self.is_change() && self.action != FileAction::Skip {
            return None;
        }
        let old = self.old_content.as_deref().unwrap_or("");
        let new = match self.action {
            FileAction::Remove => "",
            _ => self.new_content.as_deref().unwrap_or(""),
        };
        if old == new {
            return None;
        }

        let path = normalize_manifest_path(&self.path);
        let diff = TextDiff::from_lines(old, new);
        Some(
            diff.unified_diff()
                .context_radius(3)
                .header(&format!("a/{path}"), &format!("b/{path}"))
                .to_string(),
        )
    }
}

/// Ordered list of planned operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratePlan {
    pub files: Vec<PlannedFile>,
}

impl GeneratePlan {
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }

    /// Entries that write or delete something
    pub fn changes(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.is_change())
    }

    pub fn has_changes(&self) -> bool {
        self.changes().next().is_some()
    }
}

/// Outcome of executing a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
    pub removed: Vec<String>,
    pub dry_run: bool,
}

impl GenerateReport {
    /// Number of files written or removed (or that would be, in a dry run)
    pub fn changed(&self) -> usize {
        self.created.len() + self.updated.len() + self.removed.len()
    }

    /// True when no user-modified file blocked generation
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reject absolute paths and `..` so outputs stay inside the output root
fn ensure_relative(path: &Path, root: &Path) -> GenResult<()> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir));
    if escapes {
        return Err(GenError::PathEscape {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Compare outputs against the disk and the manifest
pub fn plan_outputs(
    outputs: &[OutputFile],
    manifest: &Manifest,
    fs: &dyn FileSystem,
    root: &Path,
    force: bool,
) -> GenResult<GeneratePlan> {
    let mut plan = GeneratePlan::default();

    for output in outputs {
        ensure_relative(output.path(), root)?;
        let target = root.join(output.path());

        if !fs.exists(&target) {
            plan.files.push(PlannedFile {
                path: output.path().to_path_buf(),
                action: FileAction::Create,
                old_content: None,
                new_content: Some(output.content().to_string()),
            });
            continue;
        }

        let current = fs.read_to_string(&target)?;
        let current_hash = hash_content(current.as_bytes());
        let owned = manifest.hash_for(output.path()) == Some(current_hash.as_str());

        let action = if current_hash == output.hash() {
            FileAction::Unchanged
        } else if owned || force {
            FileAction::Update
        } else {
            warn!(path = %target.display(), "file modified since last generation; skipping");
            FileAction::Skip
        };

        plan.files.push(PlannedFile {
            path: output.path().to_path_buf(),
            action,
            old_content: Some(current),
            new_content: Some(output.content().to_string()),
        });
    }

    for tracked in manifest.paths() {
        let still_generated = outputs
            .iter()
            .any(|o| normalize_manifest_path(o.path()) == normalize_manifest_path(&tracked));
        if still_generated {
            continue;
        }

        let target = root.join(&tracked);
        if !fs.exists(&target) {
            debug!(path = %target.display(), "orphan already gone");
            continue;
        }

        let current = fs.read_to_string(&target)?;
        let owned = manifest.hash_for(&tracked) == Some(hash_content(current.as_bytes()).as_str());
        let action = if owned || force {
            FileAction::Remove
        } else {
            warn!(path = %target.display(), "orphaned file was modified; keeping it");
            FileAction::Skip
        };

        plan.files.push(PlannedFile {
            path: tracked,
            action,
            old_content: Some(current),
            new_content: None,
        });
    }

    Ok(plan)
}

/// Apply a plan and compute the manifest describing the result
///
/// With `dry_run` nothing is written, but the report and manifest describe
/// what would have happened.
pub fn execute_plan(
    plan: &GeneratePlan,
    previous: &Manifest,
    fs: &dyn FileSystem,
    root: &Path,
    dry_run: bool,
) -> GenResult<(GenerateReport, Manifest)> {
    let mut report = GenerateReport {
        dry_run,
        ..GenerateReport::default()
    };
    let mut manifest = Manifest::new();
    if let Some(package) = previous.package() {
        manifest.set_package(package);
    }

    for file in &plan.files {
        let target = root.join(&file.path);
        let key = normalize_manifest_path(&file.path);

        match (file.action, file.new_content.as_deref()) {
            (FileAction::Create | FileAction::Update, Some(content)) => {
                if !dry_run {
                    fs.write_atomic(&target, content)?;
                }
                debug!(path = %target.display(), action = ?file.action, "wrote file");
                manifest.set(&file.path, hash_content(content.as_bytes()));
                if file.action == FileAction::Create {
                    report.created.push(key);
                } else {
                    report.updated.push(key);
                }
            }
            (FileAction::Unchanged, Some(content)) => {
                manifest.set(&file.path, hash_content(content.as_bytes()));
                report.unchanged.push(key);
            }
            (FileAction::Skip, Some(_)) => {
                if let Some(hash) = previous.hash_for(&file.path) {
                    manifest.set(&file.path, hash);
                }
                report.skipped.push(key);
            }
            (FileAction::Skip, None) => {
                report.skipped.push(key);
            }
            (FileAction::Remove, _) => {
                if !dry_run {
                    fs.remove_file(&target)?;
                }
                debug!(path = %target.display(), "removed orphan");
                report.removed.push(key);
            }
            (action, None) => {
                debug!(path = %target.display(), ?action, "nothing to apply");
            }
        }
    }

    Ok((report, manifest))
}
