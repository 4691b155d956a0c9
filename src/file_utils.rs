//! File filtering and collection helpers.
//!
//! One filtering predicate serves both lifecycle phases: the staged
//! change set on every commit, and the full-repository scan used to
//! initialize the baseline. The `scan` command additionally walks a
//! directory tree directly, without consulting version control.

use crate::config::GateConfig;
use crate::error::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether a path is a lintable source file.
///
/// True only if the path exists as a regular file, carries one of the
/// configured source extensions, and contains none of the configured
/// excluded substrings (vendored/third-party/generated trees).
///
/// # Arguments
/// * `path` - The candidate path.
/// * `config` - Gate configuration carrying extensions and exclusions.
#[must_use]
pub fn is_valid_source(path: &Path, config: &GateConfig) -> bool {
    if !path.is_file() {
        return false;
    }

    let has_source_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.extensions.iter().any(|e| e == ext));
    if !has_source_extension {
        return false;
    }

    let path_str = path.to_string_lossy();
    !config
        .exclude_keywords
        .iter()
        .any(|keyword| path_str.contains(keyword.as_str()))
}

/// Filters a file list down to valid, deduplicated source paths.
///
/// Preserves the input order of first occurrence.
#[must_use]
pub fn filter_sources(files: &[PathBuf], config: &GateConfig) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    files
        .iter()
        .filter(|path| is_valid_source(path, config))
        .filter(|path| seen.insert((*path).clone()))
        .cloned()
        .collect()
}

/// Recursively collects every valid source file under `dir`.
///
/// Used by the ad-hoc `scan` command; the commit gate itself only ever
/// looks at files version control reports.
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn collect_sources(dir: &Path, config: &GateConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry_result in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry_result?;
        if entry.file_type().is_file() && is_valid_source(entry.path(), config) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, rel: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, "// test\n").expect("write file");
        path
    }

    #[test]
    fn test_is_valid_source_accepts_known_extensions() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        for name in ["a.h", "b.hh", "c.hpp", "d.c", "e.cc", "f.cpp"] {
            let path = touch(&dir, name);
            assert!(
                is_valid_source(&path, &config),
                "{} should be a valid source",
                name
            );
        }
    }

    #[test]
    fn test_is_valid_source_rejects_other_extensions() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        for name in ["a.rs", "b.py", "c.txt", "Makefile"] {
            let path = touch(&dir, name);
            assert!(!is_valid_source(&path, &config), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_is_valid_source_rejects_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        let path = dir.path().join("never_created.cc");
        assert!(!is_valid_source(&path, &config));
    }

    #[test]
    fn test_is_valid_source_rejects_excluded_keyword_paths() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        let vendored = touch(&dir, "3rd_party/lib/code.cc");
        assert!(!is_valid_source(&vendored, &config));

        let normal = touch(&dir, "src/code.cc");
        assert!(is_valid_source(&normal, &config));
    }

    #[test]
    fn test_is_valid_source_honors_configured_exclusions() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig {
            exclude_keywords: vec!["generated".to_string()],
            ..GateConfig::default()
        };

        let generated = touch(&dir, "out/generated/code.cc");
        assert!(!is_valid_source(&generated, &config));

        let vendored = touch(&dir, "3rd_party/code.cc");
        assert!(
            is_valid_source(&vendored, &config),
            "default exclusions should be replaced, not appended"
        );
    }

    #[test]
    fn test_filter_sources_deduplicates_preserving_order() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        let a = touch(&dir, "a.cc");
        let b = touch(&dir, "b.cc");
        let files = vec![a.clone(), b.clone(), a.clone()];

        let filtered = filter_sources(&files, &config);
        assert_eq!(filtered, vec![a, b]);
    }

    #[test]
    fn test_filter_sources_drops_invalid_entries() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        let valid = touch(&dir, "keep.cc");
        let readme = touch(&dir, "README.md");
        let missing = dir.path().join("missing.cc");

        let filtered = filter_sources(&[valid.clone(), readme, missing], &config);
        assert_eq!(filtered, vec![valid]);
    }

    #[test]
    fn test_collect_sources_walks_nested_directories() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        touch(&dir, "src/a.cc");
        touch(&dir, "src/deep/b.h");
        touch(&dir, "src/deep/skip.txt");
        touch(&dir, "3rd_party/vendored.cc");

        let files = collect_sources(dir.path(), &config).expect("collect_sources");
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .expect("under temp dir")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();

        assert_eq!(names, vec!["src/a.cc", "src/deep/b.h"]);
    }

    #[test]
    fn test_collect_sources_empty_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = GateConfig::default();

        let files = collect_sources(dir.path(), &config).expect("collect_sources");
        assert!(files.is_empty());
    }
}
