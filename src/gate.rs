//! The commit gate orchestrator.
//!
//! Wires the change-set resolver, analyzer, aggregator, baseline store,
//! and judge together, and turns the verdict into a process exit code:
//! 0 for any acceptance (including first-run initialization), N for a
//! rejection with N regression records. Fatal environment or subprocess
//! failures are propagated as errors and exit with the reserved code 1
//! in `main`.
//!
//! Generic over [`VcsClient`] and [`LintAnalyzer`] so tests can drive
//! the full pipeline with fakes.

use crate::analyzer::LintAnalyzer;
use crate::baseline::BaselineStore;
use crate::config::GateConfig;
use crate::counts::{CountTable, aggregate};
use crate::error::{LintGateError, Result};
use crate::file_utils::filter_sources;
use crate::git_utils::{FileStatus, VcsClient};
use crate::judge::{Verdict, judge};
use crate::reporting::print_regression_report;

/// Pre-commit gate over a repository.
pub struct CommitGate<V, A> {
    vcs: V,
    analyzer: A,
    store: BaselineStore,
    config: GateConfig,
    quiet: bool,
}

impl<V: VcsClient, A: LintAnalyzer> CommitGate<V, A> {
    /// Creates a gate from its collaborators.
    pub fn new(vcs: V, analyzer: A, store: BaselineStore, config: GateConfig) -> Self {
        Self {
            vcs,
            analyzer,
            store,
            config,
            quiet: false,
        }
    }

    /// Suppresses acceptance summaries; rejection output always prints.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    /// Runs the gate and returns the process exit code.
    ///
    /// First run (no baseline) initializes the baseline from the whole
    /// repository and succeeds; subsequent runs compare the staged
    /// change set against the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error on analyzer unavailability, version-control
    /// failures, or baseline persistence failures. A rejected commit is
    /// not an error; it is a nonzero return value.
    pub fn run(&self) -> Result<i32> {
        self.analyzer.ensure_available()?;

        match self.store.load()? {
            None => self.initialize(),
            Some(baseline) => self.check_incremental(&baseline),
        }
    }

    /// Forces (re-)initialization of the baseline.
    ///
    /// # Arguments
    ///
    /// * `force` - Required when a baseline already exists.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::InvalidInput`] if a baseline exists and
    /// `force` is false; otherwise the initialization errors.
    pub fn reinitialize(&self, force: bool) -> Result<i32> {
        if self.store.exists() && !force {
            return Err(LintGateError::invalid_input_with_arg(
                "baseline already exists; re-run with --force to rebuild it",
                "--force",
            ));
        }

        self.analyzer.ensure_available()?;
        self.initialize()
    }

    fn initialize(&self) -> Result<i32> {
        if !self.quiet {
            println!("No lint baseline found; scanning the repository. This may take a while.");
        }

        let tracked = self.vcs.list_all_files()?;
        let sources = filter_sources(&tracked, &self.config);
        tracing::info!(
            tracked = tracked.len(),
            sources = sources.len(),
            "initializing baseline"
        );

        let diagnostics = self
            .analyzer
            .analyze(&sources, self.config.lint_verbosity)?;
        let counts = aggregate(&diagnostics);

        self.persist_and_stage(&counts)?;
        if !self.quiet {
            println!(
                "Baseline initialized: {} errors across {} (file, category) pairs.",
                counts.total(),
                counts.len()
            );
        }
        Ok(0)
    }

    fn check_incremental(&self, baseline: &CountTable) -> Result<i32> {
        let changed = self.vcs.list_changed_files()?;
        let sources = filter_sources(&changed, &self.config);
        if sources.is_empty() {
            tracing::debug!("no lintable files in the change set");
            return Ok(0);
        }

        let diagnostics = self
            .analyzer
            .analyze(&sources, self.config.lint_verbosity)?;
        let current = aggregate(&diagnostics);

        let verdict = judge(Some(baseline), &current);
        tracing::info!(verdict = verdict.label(), "judged change set");

        match verdict {
            Verdict::Initialize => {
                self.persist_and_stage(&current)?;
                Ok(0)
            }
            Verdict::AcceptUnchanged => {
                if !self.quiet {
                    println!("Lint gate passed: no new lint errors.");
                }
                Ok(0)
            }
            Verdict::AcceptImproved { updated } => {
                self.persist_and_stage(&updated)?;
                if !self.quiet {
                    println!("Lint gate passed: lint errors reduced, baseline updated.");
                }
                Ok(0)
            }
            Verdict::Reject { records } => {
                print_regression_report(&records, &self.config.lint_command);
                Ok(i32::try_from(records.len()).unwrap_or(i32::MAX))
            }
        }
    }

    /// Saves the baseline and stages it into the pending commit.
    ///
    /// Staging failures are logged, never fatal: the baseline on disk is
    /// already correct, the developer can stage it by hand.
    fn persist_and_stage(&self, counts: &CountTable) -> Result<()> {
        self.store.save(counts)?;

        match self.vcs.file_status(self.store.path()) {
            Ok(FileStatus::Untracked | FileStatus::Modified | FileStatus::Added) => {
                if let Err(e) = self.vcs.stage_file(self.store.path()) {
                    tracing::warn!(error = %e, "failed to stage the baseline file");
                }
            }
            Ok(FileStatus::Unchanged) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to query baseline file status");
            }
        }
        Ok(())
    }
}
