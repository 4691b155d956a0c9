//! Configuration file support for lintgate.
//!
//! Configuration is loaded from a TOML file and overridden by
//! command-line flags. Values resolve in the usual order:
//! 1. CLI arguments (highest priority)
//! 2. Config file values
//! 3. Built-in defaults (lowest priority)

use crate::error::{LintGateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for.
const DEFAULT_CONFIG_FILES: &[&str] = &["Lintgate.toml", ".lintgate.toml", "lintgate.toml"];

/// Default baseline file name, relative to the repository root.
pub const DEFAULT_BASELINE_FILE: &str = ".lintgate.baseline";

/// Gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct GateConfig {
    /// Source file extensions considered lintable.
    pub extensions: Vec<String>,

    /// Path substrings that exclude a file from linting, used to skip
    /// vendored, third-party, and generated trees.
    pub exclude_keywords: Vec<String>,

    /// Where the baseline snapshot lives.
    pub baseline_file: PathBuf,

    /// Command used to invoke the lint analyzer.
    pub lint_command: String,

    /// Verbosity level passed to the analyzer (0 reports everything).
    pub lint_verbosity: u8,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude_keywords: default_exclude_keywords(),
            baseline_file: PathBuf::from(DEFAULT_BASELINE_FILE),
            lint_command: default_lint_command(),
            lint_verbosity: 0,
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["h", "hh", "hpp", "c", "cc", "cpp"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_exclude_keywords() -> Vec<String> {
    ["3rd_party", "third_party", "vendor"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_lint_command() -> String {
    "cpplint".to_string()
}

/// Loads configuration, searching the default file names if no explicit
/// path is given.
///
/// An explicit path that does not exist is an error; an absent default
/// file is not, and yields the built-in defaults.
///
/// # Arguments
///
/// * `explicit` - Path passed via `--config`, if any.
///
/// # Errors
///
/// Returns [`LintGateError::Config`] if a file exists but cannot be
/// read or parsed, or if an explicit path is missing.
pub fn load_config(explicit: Option<&Path>) -> Result<GateConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(LintGateError::config_error_with_path(
                "config file not found",
                path.to_path_buf(),
            ));
        }
        return load_config_from_path(path);
    }

    for name in DEFAULT_CONFIG_FILES {
        let candidate = Path::new(name);
        if candidate.exists() {
            tracing::debug!(config = name, "using configuration file");
            return load_config_from_path(candidate);
        }
    }

    Ok(GateConfig::default())
}

/// Loads configuration from a specific TOML file.
///
/// # Arguments
///
/// * `path` - The config file to read.
///
/// # Errors
///
/// Returns [`LintGateError::Config`] if the file cannot be read or is
/// not valid configuration TOML.
pub fn load_config_from_path(path: &Path) -> Result<GateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        LintGateError::config_error_with_path(
            format!("failed to read config: {}", e),
            path.to_path_buf(),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        LintGateError::config_error_with_path(
            format!("failed to parse config: {}", e),
            path.to_path_buf(),
        )
    })
}
