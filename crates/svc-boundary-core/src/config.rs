//! TOML configuration for the repository layout and reporting.
//!
//! Every key is optional; an empty file yields the conventional Go monorepo
//! layout (`go.mod`, `pkg/`, `services/<name>/`, `services/<name>/scripts/`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level svc-boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Repository layout conventions.
    #[serde(default)]
    pub layout: Layout,

    /// Reporting behaviour.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Names of the files and folders that make up the monorepo layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Manifest file at the repository root (e.g. `go.mod`).
    pub manifest: String,
    /// Keyword that starts the manifest's first line (e.g. `module`).
    pub module_keyword: String,
    /// Folder holding one subfolder per service.
    pub services_dir: String,
    /// Shared library folder importable from every service.
    pub shared_dir: String,
    /// Per-service tooling folder exempt from the policy.
    pub scripts_dir: String,
    /// Import path ending that is allowed from anywhere.
    pub shared_interface_suffix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            manifest: "go.mod".into(),
            module_keyword: "module".into(),
            services_dir: "services".into(),
            shared_dir: "pkg".into(),
            scripts_dir: "scripts".into(),
            shared_interface_suffix: "pkg/proto".into(),
        }
    }
}

/// Reporting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Treat reported violations as a failing exit status.
    pub deny: bool,
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl BoundaryConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;

        let required = [
            ("manifest", &layout.manifest),
            ("module_keyword", &layout.module_keyword),
            ("services_dir", &layout.services_dir),
            ("shared_dir", &layout.shared_dir),
            ("scripts_dir", &layout.scripts_dir),
            ("shared_interface_suffix", &layout.shared_interface_suffix),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("layout.{key}: empty")));
            }
            if value.contains(['"', '`']) {
                return Err(ConfigError::Validation(format!(
                    "layout.{key}: quote characters are not allowed"
                )));
            }
        }

        // Folder names are single path components
        let dirs = [
            ("manifest", &layout.manifest),
            ("services_dir", &layout.services_dir),
            ("shared_dir", &layout.shared_dir),
            ("scripts_dir", &layout.scripts_dir),
        ];
        for (key, value) in dirs {
            if value.contains(['/', '\\']) || value == "." || value == ".." {
                return Err(ConfigError::Validation(format!(
                    "layout.{key}: '{value}' must be a single file or folder name"
                )));
            }
        }

        if layout.module_keyword.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "layout.module_keyword: must be a single word".into(),
            ));
        }

        let suffix = &layout.shared_interface_suffix;
        if suffix.starts_with('/') || suffix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "layout.shared_interface_suffix: '{suffix}' must not start or end with '/'"
            )));
        }

        Ok(())
    }
}
