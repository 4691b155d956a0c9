//! # Lintgate - incremental C/C++ lint-regression commit gate
//!
//! Lintgate is a CLI tool and library for blocking commits that add new
//! C/C++ style-lint errors, while tolerating a pre-existing baseline of
//! lint debt. The baseline is computed once over the whole repository;
//! every commit after that is compared incrementally, over only the
//! files it touches, and rejected if the error count for any
//! (file, category) pair increases.
//!
//! ## Architecture
//!
//! Lintgate is organized into several modules:
//!
//! - [`cli`] - Command-line argument parsing
//! - [`config`] - Configuration file loading and defaults
//! - [`error`] - Centralized error types for the crate
//! - [`git_utils`] - Version-control interface and git adapter
//! - [`file_utils`] - Source filtering and directory collection
//! - [`analyzer`] - Lint analyzer interface and cpplint adapter
//! - [`counts`] - Aggregation of diagnostics into count tables
//! - [`baseline`] - Baseline persistence
//! - [`judge`] - The regression decision algorithm
//! - [`reporting`] - Human-readable tables and summaries
//! - [`gate`] - The commit-gate orchestrator
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use lintgate_core::{BaselineStore, CommitGate, CpplintAnalyzer, GateConfig, GitCli};
//!
//! # fn main() -> lintgate_core::error::Result<()> {
//! let config = GateConfig::default();
//! let store = BaselineStore::new(&config.baseline_file);
//! let analyzer = CpplintAnalyzer::new(&config.lint_command);
//! let gate = CommitGate::new(GitCli::new(), analyzer, store, config);
//!
//! let exit_code = gate.run()?;
//! # let _ = exit_code;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible functions return [`Result<T>`], a type alias for
//! `std::result::Result<T, LintGateError>`. A rejected commit is not an
//! error: it is a [`judge::Verdict`] whose exit code equals the number
//! of regression records.

// Module declarations
pub mod analyzer;
pub mod baseline;
pub mod cli;
pub mod config;
pub mod counts;
pub mod error;
pub mod file_utils;
pub mod gate;
pub mod git_utils;
pub mod judge;
pub mod reporting;

// Public API exports
pub use crate::analyzer::{CpplintAnalyzer, Diagnostic, LintAnalyzer, parse_diagnostics};
pub use crate::baseline::BaselineStore;
pub use crate::cli::{CheckArgs, Cli, Commands, InitArgs, ScanArgs, ScanOutputFormat};
pub use crate::config::{DEFAULT_BASELINE_FILE, GateConfig, load_config, load_config_from_path};
pub use crate::counts::{CountKey, CountTable, aggregate};
pub use crate::error::{LintGateError as Error, Result};
pub use crate::file_utils::{collect_sources, filter_sources, is_valid_source};
pub use crate::gate::CommitGate;
pub use crate::git_utils::{FileStatus, GitCli, VcsClient};
pub use crate::judge::{RegressionRecord, Verdict, judge};
pub use crate::reporting::{render_count_table, render_regression_table, render_summary_line};
