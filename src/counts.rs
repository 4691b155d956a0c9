//! Aggregation of raw diagnostics into per-(file, category) counts.
//!
//! The count table is the unit of comparison for the whole gate: the
//! baseline is one, the freshly computed state of a change set is
//! another, and the judge classifies their difference. Keys are ordered
//! so reports and serialized baselines come out deterministic.

use crate::analyzer::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Composite identity for aggregation and comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountKey {
    /// File path as reported by the linter.
    pub file: String,

    /// Lint category name.
    pub category: String,
}

impl CountKey {
    /// Creates a new count key.
    #[must_use]
    pub fn new(file: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for CountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.file, self.category)
    }
}

/// Mapping from [`CountKey`] to a non-negative error count.
///
/// Backed by a `BTreeMap` so iteration order is deterministic regardless
/// of how entries were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable(BTreeMap<CountKey, u64>);

impl CountTable {
    /// Creates an empty count table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count recorded for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &CountKey) -> Option<u64> {
        self.0.get(key).copied()
    }

    /// Records `count` for `key`, replacing any previous value.
    pub fn insert(&mut self, key: CountKey, count: u64) {
        self.0.insert(key, count);
    }

    /// Number of (file, category) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CountKey, u64)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Sum of all counts in the table.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

impl FromIterator<(CountKey, u64)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (CountKey, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reduces diagnostics to a count table.
///
/// Pure function: the same diagnostic multiset yields the same table
/// regardless of input order.
#[must_use]
pub fn aggregate(diagnostics: &[Diagnostic]) -> CountTable {
    let mut counts: BTreeMap<CountKey, u64> = BTreeMap::new();
    for diagnostic in diagnostics {
        let key = CountKey::new(diagnostic.file.clone(), diagnostic.category.clone());
        *counts.entry(key).or_insert(0) += 1;
    }
    CountTable(counts)
}
