//! Configuration lookup with global fallback.
//!
//! Lookup order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{repo}/svc-boundary.toml` or `{repo}/.svc-boundary.toml`
//! 3. `{global}/config.toml` where `{global}` is `$SVC_BOUNDARY_CONFIG_DIR`
//!    or `~/.svc-boundary`
//! 4. Built-in Go monorepo layout

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use svc_boundary_core::BoundaryConfig;

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found at the repository root.
    Repository(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Builtin,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Repository(p) | Self::Global(p) => Some(p),
            Self::Builtin => None,
        }
    }

    /// Reads and validates the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(&self) -> Result<BoundaryConfig> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using built-in layout");
            return Ok(BoundaryConfig::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        let config = BoundaryConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }
}

/// Config file names looked up at the repository root, in order.
pub const REPOSITORY_CONFIG_NAMES: &[&str] = &["svc-boundary.toml", ".svc-boundary.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for the repository at `repo_root`.
#[must_use]
pub fn resolve(repo_root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(repo_root, explicit, global_config_dir().as_deref())
}

fn resolve_with_global(
    repo_root: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = REPOSITORY_CONFIG_NAMES
        .iter()
        .map(|name| repo_root.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found repository config: {}", found.display());
        return ConfigSource::Repository(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Builtin,
    }
}

/// Global config directory: `$SVC_BOUNDARY_CONFIG_DIR`, else `~/.svc-boundary`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("SVC_BOUNDARY_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".svc-boundary"))
}
