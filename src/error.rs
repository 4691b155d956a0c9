//! Error types for lintgate.
//!
//! This module defines the error type shared by the whole gate, with one
//! variant per failure class so callers can react programmatically. The
//! substantive "your commit regresses the lint baseline" outcome is *not*
//! an error: it is a [`Verdict`](crate::judge::Verdict) with its own exit
//! code. Errors here are the operational failures around the gate.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for lintgate operations.
#[derive(Debug)]
pub enum LintGateError {
    /// A required external tool (the lint analyzer) is unavailable.
    ///
    /// This aborts before any analysis runs.
    Environment {
        /// The tool that could not be found or probed.
        tool: String,
        /// What went wrong while probing it.
        message: String,
    },

    /// A version-control subprocess failed.
    Subprocess {
        /// The command line that was executed.
        command: String,
        /// Captured stderr (or a description) from the failed command.
        output: String,
        /// The underlying spawn error, if the process never started.
        source: Option<io::Error>,
    },

    /// The baseline file exists but could not be read back.
    ///
    /// Distinct from "no baseline exists yet", which is not an error and
    /// triggers initialization instead. A corrupt baseline fails loudly
    /// rather than silently re-initializing over valid history.
    Persistence {
        /// Description of the persistence failure.
        message: String,
        /// The baseline file path, if known.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred during file system operations.
    Io {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },

    /// An error occurred while loading or parsing configuration.
    Config {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error indicating an invalid argument or input.
    InvalidInput {
        /// Description of the invalid input.
        message: String,
        /// The argument or value that was invalid.
        argument: Option<String>,
    },
}

impl LintGateError {
    /// Creates a new `Environment` error for the given tool.
    ///
    /// # Arguments
    /// * `tool` - The external tool that is unavailable.
    /// * `message` - What went wrong while probing it.
    pub fn environment(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Environment {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Subprocess` error with the failing command's output.
    ///
    /// # Arguments
    /// * `command` - The command line that was executed.
    /// * `output` - Captured stderr or a description of the failure.
    pub fn subprocess(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Subprocess {
            command: command.into(),
            output: output.into(),
            source: None,
        }
    }

    /// Creates a new `Subprocess` error for a command that failed to spawn.
    ///
    /// # Arguments
    /// * `command` - The command line that was attempted.
    /// * `source` - The underlying spawn error.
    pub fn subprocess_spawn(command: impl Into<String>, source: io::Error) -> Self {
        Self::Subprocess {
            command: command.into(),
            output: String::new(),
            source: Some(source),
        }
    }

    /// Creates a new `Persistence` error with the given message.
    ///
    /// # Arguments
    /// * `message` - A description of the persistence failure.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `Persistence` error with the baseline file path.
    ///
    /// # Arguments
    /// * `message` - A description of the persistence failure.
    /// * `path` - The baseline file involved.
    pub fn persistence_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Persistence {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `Io` error with the given operation description.
    ///
    /// # Arguments
    /// * `operation` - A description of the IO operation being performed.
    pub fn io_error(operation: impl Into<String>) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `Io` error with a path and underlying error.
    ///
    /// # Arguments
    /// * `operation` - A description of the IO operation being performed.
    /// * `path` - The path involved in the error.
    /// * `source` - The underlying IO error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Creates a new `Config` error with the given message.
    ///
    /// # Arguments
    /// * `message` - A description of the configuration issue.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `Config` error with a file path.
    ///
    /// # Arguments
    /// * `message` - A description of the configuration issue.
    /// * `path` - The path to the config file.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `InvalidInput` error.
    ///
    /// # Arguments
    /// * `message` - A description of the invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            argument: None,
        }
    }

    /// Creates a new `InvalidInput` error with an argument name.
    ///
    /// # Arguments
    /// * `message` - A description of the invalid input.
    /// * `argument` - The argument or value that was invalid.
    pub fn invalid_input_with_arg(message: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            argument: Some(argument.into()),
        }
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Environment { .. } => "Environment",
            Self::Subprocess { .. } => "Subprocess",
            Self::Persistence { .. } => "Persistence",
            Self::Io { .. } => "Io",
            Self::Config { .. } => "Config",
            Self::InvalidInput { .. } => "InvalidInput",
        }
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Environment { tool, .. } => vec![
                format!("Install the linter: pip3 install {}", tool),
                format!("Verify '{}' is on PATH and runnable", tool),
                "Set `lint_command` in the config file if the tool has another name".to_string(),
            ],
            Self::Subprocess { .. } => vec![
                "Ensure the command is run inside a Git repository".to_string(),
                "Verify Git is installed and accessible".to_string(),
                "Check that the repository has at least one commit (HEAD exists)".to_string(),
            ],
            Self::Persistence { path, .. } => {
                let mut s = vec![
                    "The baseline file appears damaged; do not delete it blindly".to_string(),
                    "Restore the baseline from version control if possible".to_string(),
                ];
                if path.is_some() {
                    s.push("Re-create it deliberately with `lintgate init --force`".to_string());
                }
                s
            }
            Self::Io { operation, .. } => {
                let mut s = vec![
                    "Check that the path exists and is accessible".to_string(),
                    "Verify you have the necessary permissions".to_string(),
                ];
                if operation.contains("read") || operation.contains("open") {
                    s.push("Ensure the file is not locked by another process".to_string());
                }
                s
            }
            Self::Config { .. } => vec![
                "Check the configuration file syntax".to_string(),
                "Ensure the file is valid TOML format".to_string(),
                "Review the documentation for configuration options".to_string(),
            ],
            Self::InvalidInput { .. } => vec![
                "Review the command-line arguments".to_string(),
                "Check `lintgate --help` for valid input formats".to_string(),
            ],
        }
    }
}

impl fmt::Display for LintGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment { tool, message } => {
                write!(f, "Required tool '{}' is unavailable: {}", tool, message)
            }
            Self::Subprocess {
                command, output, ..
            } => {
                if output.is_empty() {
                    write!(f, "Subprocess '{}' failed", command)
                } else {
                    write!(f, "Subprocess '{}' failed: {}", command, output.trim_end())
                }
            }
            Self::Persistence { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Baseline error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Baseline error: {}", message)
                }
            }
            Self::Io {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
            Self::Config { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::InvalidInput { message, argument } => {
                if let Some(arg) = argument {
                    write!(f, "Invalid input '{}': {}", arg, message)
                } else {
                    write!(f, "Invalid input: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for LintGateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Environment { .. } => None,
            Self::Subprocess { source, .. } => source.as_ref().map(|e| e as _),
            Self::Persistence { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::Io { source, .. } => source.as_ref().map(|e| e as _),
            Self::Config { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::InvalidInput { .. } => None,
        }
    }
}

// Implement From conversions for common error types

impl From<io::Error> for LintGateError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<toml::de::Error> for LintGateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("Failed to parse TOML: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for LintGateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: format!("Failed to parse/serialize JSON: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<walkdir::Error> for LintGateError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io {
            operation: "directory traversal".to_string(),
            path: err.path().map(PathBuf::from),
            source: None,
        }
    }
}

/// A type alias for `Result<T, LintGateError>`.
pub type Result<T> = std::result::Result<T, LintGateError>;
