//! Human-readable output for gate verdicts and scans.
//!
//! Tables are rendered with prettytable; the regression report is what a
//! developer sees when their commit is blocked, so it leads with the
//! offending keys and ends with how to reproduce the findings locally.

use crate::counts::CountTable;
use crate::judge::RegressionRecord;
use prettytable::{Attr, Cell, Row, Table, color, format};
use serde::Serialize;

/// One row of a serialized count table, for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    /// File path of the entry.
    pub file: String,
    /// Lint category of the entry.
    pub category: String,
    /// Error count for the (file, category) pair.
    pub count: u64,
}

fn gate_table_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '┌', '┐'),
        )
        .separators(
            &[format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}

/// Renders the regression table for a rejected commit.
#[must_use]
pub fn render_regression_table(records: &[RegressionRecord]) -> Table {
    let mut table = Table::new();
    table.set_format(gate_table_format());

    table.add_row(Row::new(vec![
        Cell::new("File"),
        Cell::new("Category"),
        Cell::new("Baseline"),
        Cell::new("Current"),
    ]));

    for record in records {
        table.add_row(Row::new(vec![
            Cell::new(&record.file),
            Cell::new(&record.category),
            Cell::new(&record.old_count.to_string()),
            Cell::new(&record.new_count.to_string())
                .with_style(Attr::ForegroundColor(color::RED)),
        ]));
    }

    table
}

/// Renders a count table (used by the `scan` command).
#[must_use]
pub fn render_count_table(counts: &CountTable) -> Table {
    let mut table = Table::new();
    table.set_format(gate_table_format());

    table.add_row(Row::new(vec![
        Cell::new("File"),
        Cell::new("Category"),
        Cell::new("Errors"),
    ]));

    for (key, count) in counts.iter() {
        table.add_row(Row::new(vec![
            Cell::new(&key.file),
            Cell::new(&key.category),
            Cell::new(&count.to_string()),
        ]));
    }

    table
}

/// Flattens a count table into serializable rows, in key order.
#[must_use]
pub fn count_rows(counts: &CountTable) -> Vec<CountRow> {
    counts
        .iter()
        .map(|(key, count)| CountRow {
            file: key.file.clone(),
            category: key.category.clone(),
            count,
        })
        .collect()
}

/// Renders a single-line summary of a rejection.
///
/// # Example
///
/// ```
/// use lintgate_core::judge::RegressionRecord;
/// use lintgate_core::reporting::render_summary_line;
///
/// let records = vec![RegressionRecord {
///     file: "a.cc".to_string(),
///     category: "whitespace".to_string(),
///     old_count: 3,
///     new_count: 5,
/// }];
/// assert_eq!(
///     render_summary_line(&records),
///     "1 lint regression across 1 file"
/// );
/// ```
#[must_use]
pub fn render_summary_line(records: &[RegressionRecord]) -> String {
    let total = records.len();
    let files = {
        let mut names: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
        names.dedup();
        names.len()
    };

    format!(
        "{} lint regression{} across {} file{}",
        total,
        if total == 1 { "" } else { "s" },
        files,
        if files == 1 { "" } else { "s" },
    )
}

/// Prints the full rejection report: table, summary, remediation.
pub fn print_regression_report(records: &[RegressionRecord], lint_command: &str) {
    println!("New lint errors detected in this commit:\n");
    render_regression_table(records).printstd();
    println!("\nFail to commit: {}.", render_summary_line(records));
    println!("Clean up the new errors and commit again.");
    println!(
        "Check your changes locally with:\n  $ {} --verbose=0 <changed files>",
        lint_command
    );
}
