//! Baseline persistence.
//!
//! The baseline is the single source of truth for the last-accepted
//! per-(file, category) error counts. It is stored as one bincode-encoded
//! envelope carrying a format version, a creation timestamp, and a
//! SHA-256 checksum of the canonical count encoding, so a truncated or
//! damaged file is reported as corruption instead of being mistaken for
//! "no baseline yet".
//!
//! Writes go to a sibling temporary file and are renamed over the
//! target, so a crash mid-save leaves the previous baseline intact.
//!
//! One process at a time: the store does no locking. The commit hook
//! mechanism is assumed to serialize invocations on a repository.

use crate::counts::CountTable;
use crate::error::{LintGateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const BASELINE_FORMAT_VERSION: u32 = 1;

/// On-disk envelope around the persisted count table.
#[derive(Debug, Serialize, Deserialize)]
struct BaselineEnvelope {
    /// Format version for forward-incompatible changes.
    version: u32,

    /// When this baseline was written.
    generated_at: DateTime<Utc>,

    /// SHA-256 of the bincode encoding of `counts`.
    checksum: String,

    /// The persisted counts.
    counts: CountTable,
}

/// Loads and saves the baseline count table at a fixed path.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    /// Creates a store for the given baseline file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The baseline file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a baseline file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the persisted baseline.
    ///
    /// Returns `Ok(None)` when no baseline file exists, which signals
    /// initialization mode to the gate.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Persistence`] when the file exists but
    /// cannot be read, decoded, or fails its version or checksum check.
    pub fn load(&self) -> Result<Option<CountTable>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| LintGateError::Persistence {
            message: format!("failed to read baseline: {}", e),
            path: Some(self.path.clone()),
            source: Some(Box::new(e)),
        })?;

        let envelope: BaselineEnvelope = bincode::deserialize(&bytes).map_err(|e| {
            LintGateError::persistence_with_path(
                format!("failed to decode baseline: {}", e),
                self.path.clone(),
            )
        })?;

        if envelope.version != BASELINE_FORMAT_VERSION {
            return Err(LintGateError::persistence_with_path(
                format!(
                    "unsupported baseline format version {} (expected {})",
                    envelope.version, BASELINE_FORMAT_VERSION
                ),
                self.path.clone(),
            ));
        }

        let expected = checksum_of(&envelope.counts)?;
        if envelope.checksum != expected {
            return Err(LintGateError::persistence_with_path(
                "baseline checksum mismatch, file is corrupt".to_string(),
                self.path.clone(),
            ));
        }

        tracing::debug!(
            entries = envelope.counts.len(),
            generated_at = %envelope.generated_at,
            "loaded baseline"
        );
        Ok(Some(envelope.counts))
    }

    /// Atomically persists `counts`, overwriting any prior baseline.
    ///
    /// # Errors
    ///
    /// Returns [`LintGateError::Persistence`] if encoding or any of the
    /// write/rename steps fail.
    pub fn save(&self, counts: &CountTable) -> Result<()> {
        let envelope = BaselineEnvelope {
            version: BASELINE_FORMAT_VERSION,
            generated_at: Utc::now(),
            checksum: checksum_of(counts)?,
            counts: counts.clone(),
        };

        let bytes = bincode::serialize(&envelope).map_err(|e| {
            LintGateError::persistence_with_path(
                format!("failed to encode baseline: {}", e),
                self.path.clone(),
            )
        })?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &bytes).map_err(|e| LintGateError::Persistence {
            message: format!("failed to write baseline temp file: {}", e),
            path: Some(tmp_path.clone()),
            source: Some(Box::new(e)),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| LintGateError::Persistence {
            message: format!("failed to replace baseline: {}", e),
            path: Some(self.path.clone()),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!(entries = counts.len(), path = %self.path.display(), "saved baseline");
        Ok(())
    }

    /// Sibling temp path used for the write-then-rename sequence.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| "baseline".into(), |n| n.to_os_string());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// SHA-256 over the canonical bincode encoding of a count table.
fn checksum_of(counts: &CountTable) -> Result<String> {
    let bytes = bincode::serialize(counts).map_err(|e| {
        LintGateError::persistence(format!("failed to encode counts for checksum: {}", e))
    })?;
    Ok(hash_bytes(&bytes))
}

/// Computes the SHA-256 hash of the given bytes as lowercase hex.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> String {
    let hasher = Sha256::new();
    let hash = hasher.chain_update(bytes).finalize();
    format!("{:x}", hash)
}
