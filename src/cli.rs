//! Command-line argument parsing for lintgate.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for `lintgate`.
///
/// With no subcommand, `check` runs, so a hook script can invoke the
/// tool with no arguments at all.
#[derive(Debug, Parser)]
#[command(
    name = "lintgate",
    version,
    about = "Block commits that add new C/C++ lint errors, tolerating the existing baseline"
)]
pub struct Cli {
    /// Path to a configuration file (default: Lintgate.toml, .lintgate.toml, lintgate.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the baseline file path.
    #[arg(long, global = true)]
    pub baseline: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the commit gate against the staged change set (the default).
    Check(CheckArgs),

    /// Build the baseline from the full repository.
    Init(InitArgs),

    /// Lint a directory tree ad hoc, without touching the baseline.
    Scan(ScanArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Suppress the success summary on accepted commits.
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the `init` subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Rebuild the baseline even if one already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `scan` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Directory to scan.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format for the per-(file, category) counts.
    #[arg(long, value_enum, default_value_t = ScanOutputFormat::Table)]
    pub output: ScanOutputFormat,
}

/// Output formats for `scan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanOutputFormat {
    /// Human-readable table.
    Table,
    /// JSON rows of {file, category, count}.
    Json,
}
