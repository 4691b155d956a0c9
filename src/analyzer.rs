//! Lint analyzer integration.
//!
//! The analyzer is an external collaborator: given a list of files it
//! produces raw diagnostics, each tagged with the file path and the lint
//! category. The gate treats it as a black box behind [`LintAnalyzer`],
//! so tests can substitute a fake and the production adapter can shell
//! out to `cpplint` without the core depending on its output format.
//!
//! Diagnostics are returned as a plain value from each invocation; the
//! analyzer holds no accumulated error state between runs.

use crate::error::{LintGateError, Result};
use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;
use tracing::instrument;

/// A single raw lint finding.
///
/// Produced transiently by the analyzer and consumed by the aggregator;
/// never persisted individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path of the offending file, as reported by the linter.
    pub file: String,

    /// Lint category, e.g. `whitespace/braces` or `legal/copyright`.
    pub category: String,

    /// Line number of the finding, when the linter reported one.
    pub line: Option<u32>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(file: impl Into<String>, category: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            file: file.into(),
            category: category.into(),
            line,
        }
    }
}

/// External lint analyzer interface.
///
/// Implementations run the actual linter. A file the analyzer cannot
/// process (unreadable, encoding error) simply contributes no
/// diagnostics; it must never fail the whole run.
pub trait LintAnalyzer {
    /// Probes whether the analyzer can run at all.
    ///
    /// Called once before any analysis. The default implementation
    /// assumes availability.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Environment`] if the analyzer is
    /// unavailable.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Lints the given files and returns all diagnostics found.
    ///
    /// # Arguments
    ///
    /// * `files` - The files to lint.
    /// * `verbosity` - Linter verbosity level (0 reports everything).
    ///
    /// # Errors
    ///
    /// Returns an error only when the analyzer itself cannot run;
    /// per-file problems are reported as absent diagnostics.
    fn analyze(&self, files: &[PathBuf], verbosity: u8) -> Result<Vec<Diagnostic>>;
}

/// Production analyzer that shells out to `cpplint`.
///
/// `cpplint` writes findings to stderr, one per line:
///
/// ```text
/// src/engine.cc:42:  Missing space before {  [whitespace/braces] [5]
/// ```
///
/// The adapter invokes the tool once for the whole file list and parses
/// every line matching that shape; banners, per-file totals, and
/// "Skipping input" notices fall through the parser and are dropped.
#[derive(Debug, Clone)]
pub struct CpplintAnalyzer {
    command: String,
}

impl CpplintAnalyzer {
    /// Creates an analyzer invoking the given command (normally `cpplint`).
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The command this analyzer invokes.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl LintAnalyzer for CpplintAnalyzer {
    #[instrument(skip(self), level = "debug")]
    fn ensure_available(&self) -> Result<()> {
        let probe = Command::new(&self.command).arg("--version").output();
        match probe {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(LintGateError::environment(
                &self.command,
                format!(
                    "version probe exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            )),
            Err(e) => Err(LintGateError::environment(&self.command, e.to_string())),
        }
    }

    #[instrument(skip(self, files), fields(file_count = files.len()), level = "debug")]
    fn analyze(&self, files: &[PathBuf], verbosity: u8) -> Result<Vec<Diagnostic>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let output = Command::new(&self.command)
            .arg(format!("--verbose={}", verbosity))
            .args(files)
            .output()
            .map_err(|e| LintGateError::environment(&self.command, e.to_string()))?;

        // A nonzero exit just means the linter found errors; the findings
        // themselves are on stderr either way.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = parse_diagnostics(&stderr);
        tracing::debug!(
            diagnostics = diagnostics.len(),
            "parsed cpplint diagnostics"
        );
        Ok(diagnostics)
    }
}

/// Matches `path:line:  message  [category] [confidence]`.
fn diagnostic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<file>.+?):(?P<line>\d+):\s+.*\[(?P<category>[\w/+.-]+)\]\s+\[\d+\]\s*$")
            .expect("diagnostic pattern is valid")
    })
}

/// Parses cpplint output into diagnostics.
///
/// Lines that do not look like findings are ignored, which is also how
/// unprocessable files surface: their diagnostics are simply absent.
#[must_use]
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    let pattern = diagnostic_pattern();
    output
        .lines()
        .filter_map(|line| {
            let captures = pattern.captures(line.trim_end())?;
            Some(Diagnostic {
                file: captures["file"].to_string(),
                category: captures["category"].to_string(),
                line: captures["line"].parse().ok(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OUTPUT: &str = "\
src/engine.cc:42:  Missing space before {  [whitespace/braces] [5]
src/engine.cc:7:  Lines should be <= 80 characters long  [whitespace/line_length] [2]
Skipping input 'src/broken.cc': Can't open for reading
src/util.h:1:  No copyright message found.  [legal/copyright] [5]
Done processing src/engine.cc
Total errors found: 3
";

    #[test]
    fn test_parse_diagnostics_extracts_file_category_and_line() {
        let diagnostics = parse_diagnostics(SAMPLE_OUTPUT);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(
            diagnostics[0],
            Diagnostic::new("src/engine.cc", "whitespace/braces", Some(42))
        );
        assert_eq!(
            diagnostics[1],
            Diagnostic::new("src/engine.cc", "whitespace/line_length", Some(7))
        );
        assert_eq!(
            diagnostics[2],
            Diagnostic::new("src/util.h", "legal/copyright", Some(1))
        );
    }

    #[test]
    fn test_parse_diagnostics_ignores_non_finding_lines() {
        let output = "Done processing src/a.cc\nTotal errors found: 0\n";
        assert!(parse_diagnostics(output).is_empty());
    }

    #[test]
    fn test_parse_diagnostics_ignores_skip_notices() {
        let output = "Skipping input 'weird.cc': Can't open for reading\n";
        assert!(parse_diagnostics(output).is_empty());
    }

    #[test]
    fn test_parse_diagnostics_empty_input() {
        assert!(parse_diagnostics("").is_empty());
    }

    #[test]
    fn test_parse_diagnostics_handles_windows_style_paths_with_colons() {
        let output = "C:\\src\\a.cc:3:  Tab found; better to use spaces  [whitespace/tab] [1]\n";
        let diagnostics = parse_diagnostics(output);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].file, "C:\\src\\a.cc");
        assert_eq!(diagnostics[0].line, Some(3));
    }

    #[test]
    fn test_parse_diagnostics_keeps_subcategory_intact() {
        let output = "a.cc:1:  Found C system header after C++ header  [build/include_order] [4]\n";
        let diagnostics = parse_diagnostics(output);

        assert_eq!(diagnostics[0].category, "build/include_order");
    }

    #[test]
    fn test_analyze_with_empty_file_list_skips_invocation() {
        let analyzer = CpplintAnalyzer::new("definitely-not-a-real-linter-binary");

        let result = analyzer.analyze(&[], 0).expect("empty list is a no-op");
        assert!(result.is_empty());
    }

    #[test]
    fn test_ensure_available_fails_for_missing_binary() {
        let analyzer = CpplintAnalyzer::new("definitely-not-a-real-linter-binary");

        let err = analyzer.ensure_available().unwrap_err();
        assert!(matches!(err, LintGateError::Environment { .. }));
        assert!(
            format!("{}", err).contains("definitely-not-a-real-linter-binary"),
            "error should name the missing tool"
        );
    }

    #[test]
    fn test_analyze_fails_for_missing_binary() {
        let analyzer = CpplintAnalyzer::new("definitely-not-a-real-linter-binary");
        let files = vec![PathBuf::from("a.cc")];

        let err = analyzer.analyze(&files, 0).unwrap_err();
        assert!(matches!(err, LintGateError::Environment { .. }));
    }

    #[test]
    fn test_cpplint_analyzer_reports_command() {
        let analyzer = CpplintAnalyzer::new("cpplint");
        assert_eq!(analyzer.command(), "cpplint");
    }
}
