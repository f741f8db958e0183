//! Generator context
//!
//! Everything the generator needs to know about the run, created once by
//! [`init`] and passed explicitly to every generator call.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::manifest::MANIFEST_FILE;
use super::toolchain::{BuildConfiguration, Toolchain};
use crate::config::{CompilerConfig, Config};
use crate::error::{GenError, GenResult};

/// Inputs to [`init`]
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory relative paths in the config are resolved against
    pub project_root: PathBuf,
    pub config: Config,
    /// Overwrite or remove files a user has modified
    pub force: bool,
    /// Plan only; never touch the file system
    pub dry_run: bool,
}

impl GeneratorOptions {
    pub fn new(project_root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            force: false,
            dry_run: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Initialized generator state
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    project_root: PathBuf,
    toolchains: Vec<Toolchain>,
    configurations: Vec<BuildConfiguration>,
    config: Config,
    force: bool,
    dry_run: bool,
    started_at: DateTime<Utc>,
}

/// Initialize the generator
///
/// Normalizes the configuration: repeated toolchains and configurations are
/// dropped, and an empty configuration list falls back to `debug`.
pub fn init(options: GeneratorOptions) -> GenResult<GeneratorContext> {
    let GeneratorOptions {
        project_root,
        config,
        force,
        dry_run,
    } = options;

    if config.generator.output_dir.as_os_str().is_empty() {
        return Err(GenError::InvalidConfig {
            file: PathBuf::from(crate::config::PROJECT_CONFIG_FILE),
            message: "generator.output_dir must not be empty".to_string(),
        });
    }

    let mut toolchains: Vec<Toolchain> = Vec::new();
    for toolchain in &config.generator.targets {
        if !toolchains.contains(toolchain) {
            toolchains.push(*toolchain);
        }
    }
    if toolchains.is_empty() {
        warn!("no toolchains configured; nothing will be generated");
    }

    let mut configurations: Vec<BuildConfiguration> = Vec::new();
    for configuration in &config.generator.configurations {
        if !configurations.contains(configuration) {
            configurations.push(*configuration);
        }
    }
    if configurations.is_empty() {
        configurations.push(BuildConfiguration::Debug);
    }

    let ctx = GeneratorContext {
        project_root,
        toolchains,
        configurations,
        config,
        force,
        dry_run,
        started_at: Utc::now(),
    };

    info!(
        root = %ctx.project_root.display(),
        output = %ctx.output_root().display(),
        toolchains = ?ctx.toolchains,
        dry_run = ctx.dry_run,
        "generator initialized"
    );
    Ok(ctx)
}

impl GeneratorContext {
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory generated files are written under
    pub fn output_root(&self) -> PathBuf {
        self.project_root.join(&self.config.generator.output_dir)
    }

    /// Directory holding the checked-out repositories
    pub fn workspace_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.generator.workspace)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_root().join(MANIFEST_FILE)
    }

    pub fn toolchains(&self) -> &[Toolchain] {
        &self.toolchains
    }

    pub fn configurations(&self) -> &[BuildConfiguration] {
        &self.configurations
    }

    pub fn compiler(&self) -> &CompilerConfig {
        &self.config.compiler
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
