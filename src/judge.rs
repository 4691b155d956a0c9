//! The regression judge.
//!
//! Pure decision core of the gate: given the last-accepted baseline and
//! the counts freshly computed over the change set, classify every key
//! as regressed, improved, new, or unchanged, and fold that into a
//! single [`Verdict`]. The judge never touches disk; persisting the
//! outcome is the gate's job.
//!
//! The current table covers only the files touched by the commit, so
//! baseline keys that do not appear in it are carried forward untouched
//! by construction.

use crate::counts::CountTable;
use serde::Serialize;

/// One offending (file, category) pair in a rejected commit.
///
/// Emitted only for keys whose count increased, or keys with no prior
/// baseline entry (`old_count` is 0 in that case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegressionRecord {
    /// File path of the regressed key.
    pub file: String,

    /// Lint category of the regressed key.
    pub category: String,

    /// Count recorded in the baseline (0 for a newly introduced key).
    pub old_count: u64,

    /// Count computed for this commit.
    pub new_count: u64,
}

/// Outcome of comparing current counts against the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No baseline existed; the current table becomes the baseline.
    Initialize,

    /// Baseline exists, nothing got worse and nothing got better.
    AcceptUnchanged,

    /// At least one key strictly improved, none regressed, none is new.
    ///
    /// `updated` is the full baseline with only the improved keys
    /// overlaid; every untouched baseline key is carried forward.
    AcceptImproved {
        /// The baseline to persist.
        updated: CountTable,
    },

    /// At least one key regressed or is new to the baseline.
    ///
    /// The baseline must not be rewritten in any form on this verdict,
    /// improved keys included.
    Reject {
        /// The offending keys, in deterministic key order.
        records: Vec<RegressionRecord>,
    },
}

impl Verdict {
    /// Process exit code for this verdict: 0 for any acceptance, the
    /// regression-record count for a rejection.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Initialize | Self::AcceptUnchanged | Self::AcceptImproved { .. } => 0,
            Self::Reject { records } => i32::try_from(records.len()).unwrap_or(i32::MAX),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::AcceptUnchanged => "accept-unchanged",
            Self::AcceptImproved { .. } => "accept-improved",
            Self::Reject { .. } => "reject",
        }
    }
}

/// Compares `current` against `baseline` and renders a verdict.
///
/// `baseline` is `None` when no baseline has ever been persisted, which
/// yields [`Verdict::Initialize`] regardless of `current`. Rejection
/// takes precedence over improvement: a commit that improves one key and
/// regresses another is rejected, and the report lists only the
/// regressed and new keys.
///
/// # Arguments
///
/// * `baseline` - Last-accepted counts, or `None` on the first run.
/// * `current` - Counts computed over the resolved change set only.
#[must_use]
pub fn judge(baseline: Option<&CountTable>, current: &CountTable) -> Verdict {
    let Some(baseline) = baseline else {
        return Verdict::Initialize;
    };

    let mut records = Vec::new();
    let mut improved = Vec::new();

    for (key, new_count) in current.iter() {
        match baseline.get(key) {
            None => records.push(RegressionRecord {
                file: key.file.clone(),
                category: key.category.clone(),
                old_count: 0,
                new_count,
            }),
            Some(old_count) if new_count > old_count => records.push(RegressionRecord {
                file: key.file.clone(),
                category: key.category.clone(),
                old_count,
                new_count,
            }),
            Some(old_count) if new_count < old_count => {
                improved.push((key.clone(), new_count));
            }
            Some(_) => {}
        }
    }

    if !records.is_empty() {
        return Verdict::Reject { records };
    }

    if improved.is_empty() {
        return Verdict::AcceptUnchanged;
    }

    let mut updated = baseline.clone();
    for (key, count) in improved {
        updated.insert(key, count);
    }
    Verdict::AcceptImproved { updated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::CountKey;

    fn table(entries: &[(&str, &str, u64)]) -> CountTable {
        entries
            .iter()
            .map(|(file, category, count)| (CountKey::new(*file, *category), *count))
            .collect()
    }

    #[test]
    fn test_missing_baseline_yields_initialize() {
        let current = table(&[("a.cc", "legal", 1)]);
        assert_eq!(judge(None, &current), Verdict::Initialize);
    }

    #[test]
    fn test_missing_baseline_yields_initialize_even_for_empty_current() {
        assert_eq!(judge(None, &CountTable::new()), Verdict::Initialize);
    }

    #[test]
    fn test_equal_counts_yield_accept_unchanged() {
        let baseline = table(&[("a.cc", "whitespace", 3)]);
        let current = table(&[("a.cc", "whitespace", 3)]);

        assert_eq!(judge(Some(&baseline), &current), Verdict::AcceptUnchanged);
    }

    #[test]
    fn test_empty_change_set_counts_yield_accept_unchanged() {
        let baseline = table(&[("a.cc", "whitespace", 3)]);

        assert_eq!(
            judge(Some(&baseline), &CountTable::new()),
            Verdict::AcceptUnchanged
        );
    }

    #[test]
    fn test_increased_count_yields_reject_with_record() {
        let baseline = table(&[("file1.cc", "whitespace", 3)]);
        let current = table(&[("file1.cc", "whitespace", 5)]);

        let verdict = judge(Some(&baseline), &current);

        assert_eq!(
            verdict,
            Verdict::Reject {
                records: vec![RegressionRecord {
                    file: "file1.cc".to_string(),
                    category: "whitespace".to_string(),
                    old_count: 3,
                    new_count: 5,
                }],
            }
        );
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn test_new_key_yields_reject_with_zero_old_count() {
        let baseline = CountTable::new();
        let current = table(&[("a.cc", "legal", 1)]);

        let verdict = judge(Some(&baseline), &current);

        match verdict {
            Verdict::Reject { records } => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].old_count, 0);
                assert_eq!(records[0].new_count, 1);
            }
            other => panic!("expected Reject, got {:?}", other),
        }
    }

    #[test]
    fn test_decreased_count_yields_accept_improved_with_overlay() {
        let baseline = table(&[("file1.cc", "whitespace", 5), ("other.cc", "legal", 7)]);
        let current = table(&[("file1.cc", "whitespace", 2)]);

        let verdict = judge(Some(&baseline), &current);

        let expected = table(&[("file1.cc", "whitespace", 2), ("other.cc", "legal", 7)]);
        assert_eq!(verdict, Verdict::AcceptImproved { updated: expected });
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn test_untouched_baseline_keys_are_carried_forward() {
        let baseline = table(&[
            ("touched.cc", "whitespace", 4),
            ("untouched.cc", "legal", 9),
            ("also_untouched.h", "build", 2),
        ]);
        let current = table(&[("touched.cc", "whitespace", 1)]);

        match judge(Some(&baseline), &current) {
            Verdict::AcceptImproved { updated } => {
                assert_eq!(updated.get(&CountKey::new("untouched.cc", "legal")), Some(9));
                assert_eq!(
                    updated.get(&CountKey::new("also_untouched.h", "build")),
                    Some(2)
                );
                assert_eq!(
                    updated.get(&CountKey::new("touched.cc", "whitespace")),
                    Some(1)
                );
            }
            other => panic!("expected AcceptImproved, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_takes_precedence_over_improvement() {
        let baseline = table(&[("good.cc", "whitespace", 5), ("bad.cc", "legal", 1)]);
        let current = table(&[("good.cc", "whitespace", 2), ("bad.cc", "legal", 3)]);

        let verdict = judge(Some(&baseline), &current);

        match verdict {
            Verdict::Reject { ref records } => {
                assert_eq!(records.len(), 1, "improved keys must not be reported");
                assert_eq!(records[0].file, "bad.cc");
                assert_eq!(records[0].old_count, 1);
                assert_eq!(records[0].new_count, 3);
            }
            other => panic!("expected Reject, got {:?}", other),
        }
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn test_multiple_regressions_are_all_reported_in_key_order() {
        let baseline = table(&[("a.cc", "whitespace", 1)]);
        let current = table(&[
            ("z.cc", "legal", 1),
            ("a.cc", "whitespace", 2),
            ("m.h", "build", 4),
        ]);

        match judge(Some(&baseline), &current) {
            Verdict::Reject { records } => {
                let files: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
                assert_eq!(files, vec!["a.cc", "m.h", "z.cc"]);
            }
            other => panic!("expected Reject, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_code_equals_record_count() {
        let baseline = CountTable::new();
        let current = table(&[
            ("a.cc", "legal", 1),
            ("b.cc", "legal", 1),
            ("c.cc", "legal", 1),
        ]);

        assert_eq!(judge(Some(&baseline), &current).exit_code(), 3);
    }

    #[test]
    fn test_judge_is_idempotent() {
        let baseline = table(&[("a.cc", "whitespace", 5), ("b.cc", "legal", 2)]);
        let current = table(&[("a.cc", "whitespace", 3), ("b.cc", "legal", 2)]);

        let first = judge(Some(&baseline), &current);
        let second = judge(Some(&baseline), &current);

        assert_eq!(first, second);
    }

    #[test]
    fn test_labels_cover_all_verdicts() {
        assert_eq!(Verdict::Initialize.label(), "initialize");
        assert_eq!(Verdict::AcceptUnchanged.label(), "accept-unchanged");
        assert_eq!(
            Verdict::AcceptImproved {
                updated: CountTable::new()
            }
            .label(),
            "accept-improved"
        );
        assert_eq!(Verdict::Reject { records: vec![] }.label(), "reject");
    }
}
