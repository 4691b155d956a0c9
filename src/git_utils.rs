//! Git utility functions for lintgate.
//!
//! The gate talks to version control through the narrow [`VcsClient`]
//! interface, so the core never depends on git's argument or flag
//! format. [`GitCli`] is the production adapter: blocking `git`
//! subprocess calls, executed sequentially, exactly one invocation per
//! query.

use crate::error::{LintGateError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::instrument;

/// Working-tree status of a single path, as far as the gate cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// No pending change for the path.
    Unchanged,
    /// The path is tracked and modified.
    Modified,
    /// The path is staged as newly added.
    Added,
    /// The path is not tracked at all.
    Untracked,
}

/// Version-control collaborator interface.
///
/// The three operations the gate needs, and nothing else: which files
/// the commit touches, which files the repository has (for baseline
/// initialization), and staging the baseline file back into the commit.
pub trait VcsClient {
    /// Files staged for the current commit (new or modified), in the
    /// order version control reports them, deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Subprocess`] if the query fails.
    fn list_changed_files(&self) -> Result<Vec<PathBuf>>;

    /// Every tracked file in the repository.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Subprocess`] if the query fails.
    fn list_all_files(&self) -> Result<Vec<PathBuf>>;

    /// Stages the given path into the pending commit.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Subprocess`] if staging fails.
    fn stage_file(&self, path: &Path) -> Result<()>;

    /// Pending status of a single path.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Subprocess`] if the query fails.
    fn file_status(&self, path: &Path) -> Result<FileStatus>;
}

/// `git` subprocess adapter.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    work_dir: Option<PathBuf>,
}

impl GitCli {
    /// Creates an adapter running `git` in the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter running `git` in the given directory.
    #[must_use]
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
        }
    }

    /// Runs one git command and returns its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("git {}", args.join(" "));
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .map_err(|e| LintGateError::subprocess_spawn(command_line.clone(), e))?;

        if !output.status.success() {
            return Err(LintGateError::subprocess(
                command_line,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsClient for GitCli {
    #[instrument(skip(self), level = "debug")]
    fn list_changed_files(&self) -> Result<Vec<PathBuf>> {
        let stdout = self.run(&["diff-index", "--name-status", "HEAD", "--cached"])?;
        let files = parse_name_status(&stdout);
        tracing::debug!(staged = files.len(), "resolved staged change set");
        Ok(files)
    }

    #[instrument(skip(self), level = "debug")]
    fn list_all_files(&self) -> Result<Vec<PathBuf>> {
        let stdout = self.run(&["ls-files"])?;
        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    #[instrument(skip(self), level = "debug")]
    fn stage_file(&self, path: &Path) -> Result<()> {
        self.run(&["add", &path.to_string_lossy()])?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn file_status(&self, path: &Path) -> Result<FileStatus> {
        let stdout = self.run(&["status", "--porcelain", &path.to_string_lossy()])?;
        Ok(parse_porcelain_status(&stdout))
    }
}

/// Parses `git diff-index --name-status` output into staged paths.
///
/// Rows look like `M\tpath`, `A\tpath`, or `R100\told\tnew`; the path of
/// record is the last field. Deleted entries are skipped since there is
/// nothing left to lint. The result preserves row order, deduplicated.
#[must_use]
pub fn parse_name_status(output: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for line in output.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let Some(status) = fields.next() else {
            continue;
        };
        if status.starts_with('D') {
            continue;
        }
        let Some(path) = fields.next_back() else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        if seen.insert(path.to_string()) {
            files.push(PathBuf::from(path));
        }
    }

    files
}

/// Parses `git status --porcelain <path>` output for one path.
///
/// Empty output means the path has no pending change.
#[must_use]
pub fn parse_porcelain_status(output: &str) -> FileStatus {
    let Some(line) = output.lines().next() else {
        return FileStatus::Unchanged;
    };

    if line.starts_with("??") {
        return FileStatus::Untracked;
    }
    let codes: String = line.chars().take(2).collect();
    if codes.contains('A') {
        FileStatus::Added
    } else if codes.contains('M') {
        FileStatus::Modified
    } else {
        FileStatus::Unchanged
    }
}
