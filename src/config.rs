//! Configuration module for xvmem
//!
//! Resolution order:
//! 1. CLI flags (highest priority, applied by the binary)
//! 2. Environment variables (XVMEM_*)
//! 3. Project config (`xgen.toml` next to the package)
//! 4. User config (`<config dir>/xvmem/config.toml`)
//! 5. Built-in defaults (lowest priority)
//!
//! Only the first config file found is read; files are not merged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, GenResult};
use crate::generator::{BuildConfiguration, Toolchain};

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = "xgen.toml";

/// Environment variable overriding `generator.targets` (comma separated)
pub const ENV_TARGETS: &str = "XVMEM_TARGETS";
/// Environment variable overriding `generator.output_dir`
pub const ENV_OUTPUT_DIR: &str = "XVMEM_OUTPUT_DIR";
/// Environment variable overriding `generator.workspace`
pub const ENV_WORKSPACE: &str = "XVMEM_WORKSPACE";

/// Generator section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Toolchains to emit build files for
    pub targets: Vec<Toolchain>,
    /// Directory generated files are written under
    pub output_dir: PathBuf,
    /// Directory holding the checked-out repositories (`github.com/...`)
    pub workspace: PathBuf,
    /// Build configurations emitted into every build file
    pub configurations: Vec<BuildConfiguration>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            targets: Toolchain::ALL.to_vec(),
            output_dir: PathBuf::from("target"),
            workspace: PathBuf::from(".."),
            configurations: vec![BuildConfiguration::Debug, BuildConfiguration::Release],
        }
    }
}

/// Compiler section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub cxx: String,
    pub std: String,
    pub flags: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            cxx: "c++".to_string(),
            std: "c++17".to_string(),
            flags: Vec::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,
}

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

/// A resolved configuration and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl Config {
    /// Load configuration from a TOML file, ignoring unknown keys
    pub fn load(path: &Path) -> GenResult<Self> {
        Self::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect unknown keys as warnings
    pub fn load_with_warnings(path: &Path) -> GenResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;
        Self::parse_with_warnings(&content, path)
    }

    fn parse_with_warnings(content: &str, path: &Path) -> GenResult<(Self, Vec<ConfigWarning>)> {
        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);

        let config: Config = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| GenError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    line: find_line_number(content, &key),
                    key,
                    file: path.to_path_buf(),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Resolve project config, then user config, then defaults; apply env
    pub fn resolve(project_root: &Path) -> GenResult<LoadedConfig> {
        let user_dir = dirs::config_dir().map(|d| d.join("xvmem"));
        let mut loaded = Self::resolve_files(project_root, user_dir.as_deref())?;
        loaded.config = loaded.config.with_env_overrides(|key| std::env::var(key).ok())?;
        Ok(loaded)
    }

    /// File part of [`Config::resolve`] with an explicit user config directory
    pub fn resolve_files(project_root: &Path, user_dir: Option<&Path>) -> GenResult<LoadedConfig> {
        let mut candidates = vec![project_root.join(PROJECT_CONFIG_FILE)];
        if let Some(dir) = user_dir {
            candidates.push(dir.join("config.toml"));
        }

        for candidate in candidates {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading configuration");
                let (config, warnings) = Self::load_with_warnings(&candidate)?;
                return Ok(LoadedConfig {
                    config,
                    source: Some(candidate),
                    warnings,
                });
            }
        }

        Ok(LoadedConfig {
            config: Config::default(),
            source: None,
            warnings: Vec::new(),
        })
    }

    /// Apply `XVMEM_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> GenResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(targets) = lookup(ENV_TARGETS) {
            self.generator.targets = parse_toolchain_list(&targets)?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.generator.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_WORKSPACE).filter(|v| !v.trim().is_empty()) {
            self.generator.workspace = PathBuf::from(dir);
        }
        Ok(self)
    }
}

/// Parse a comma separated toolchain list, dropping repeats
pub fn parse_toolchain_list(value: &str) -> GenResult<Vec<Toolchain>> {
    let mut toolchains = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let toolchain: Toolchain = part.parse()?;
        if !toolchains.contains(&toolchain) {
            toolchains.push(toolchain);
        }
    }
    Ok(toolchains)
}

fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content.lines().enumerate().find_map(|(i, line)| {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .map(|rest| rest.trim_start().starts_with('='))
            .unwrap_or(false);
        is_key.then_some(i + 1)
    })
}
