//! Verify mode: re-hash every stored file and compare.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{IntegrityConfig, IntegrityError};
use crate::progress::FileStatus;
use crate::scanner::HashError;
use crate::store::{HashRecord, HashStore};

/// Why a stored file failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Corruption {
    /// Nothing exists at the recorded path any more.
    Missing,
    /// The content hashes to a different value.
    Mismatch {
        /// Hash computed now
        actual: String,
    },
    /// The file exists but could not be read.
    Unreadable {
        /// Description of the read failure
        error: String,
    },
}

/// A stored file that failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorruptedFile {
    /// Recorded path
    pub path: String,
    /// Hash recorded at generate time
    pub expected: String,
    /// What went wrong
    pub corruption: Corruption,
}

impl CorruptedFile {
    /// The recomputed hash, if the file could be read.
    #[must_use]
    pub fn actual(&self) -> Option<&str> {
        match self.corruption {
            Corruption::Mismatch { ref actual } => Some(actual.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CorruptedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path)?;
        writeln!(f, "Expected hash: {}", self.expected)?;
        match self.corruption {
            Corruption::Missing => write!(f, "File hash: file not found"),
            Corruption::Mismatch { ref actual } => write!(f, "File hash: {}", actual),
            Corruption::Unreadable { ref error } => write!(f, "File hash: unreadable ({})", error),
        }
    }
}

/// Outcome of a verify run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    /// Store file that was read
    pub store_path: PathBuf,
    /// Number of stored records checked
    pub checked: usize,
    /// Records whose file still matches
    pub ok: usize,
    /// Records that failed verification
    pub corrupted: Vec<CorruptedFile>,
}

impl VerifyReport {
    /// True when every stored file verified OK.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.corrupted.is_empty()
    }
}

/// Check every file recorded in the store under `directory`.
///
/// Missing and changed files are collected in the returned report rather
/// than returned as errors.
///
/// # Errors
///
/// Returns [`IntegrityError::StoreMissing`] if generate has never run in
/// `directory`, a store error if the records cannot be read, and
/// [`IntegrityError::Interrupted`] on shutdown.
pub fn verify(directory: &Path, config: &IntegrityConfig) -> Result<VerifyReport, IntegrityError> {
    config.config.validate()?;

    let store = HashStore::in_directory(directory, &config.config.store_name);
    if !store.exists_on_disk() {
        return Err(IntegrityError::StoreMissing(store.path().to_path_buf()));
    }

    config.announce(&format!("{} exists. Verifying files...", store.path().display()));
    let records = store.list_all()?;

    let mut report = VerifyReport {
        store_path: store.path().to_path_buf(),
        checked: records.len(),
        ..Default::default()
    };

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start("verify", records.len());
    }

    let result = check_records(records, config, &mut report);

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end("verify");
    }
    result?;

    log::info!(
        "Verify finished: {} OK, {} corrupted",
        report.ok,
        report.corrupted.len()
    );

    Ok(report)
}

fn check_records(
    records: Vec<HashRecord>,
    config: &IntegrityConfig,
    report: &mut VerifyReport,
) -> Result<(), IntegrityError> {
    let hasher = config.hasher();

    for (index, record) in records.into_iter().enumerate() {
        if config.is_shutdown_requested() {
            return Err(IntegrityError::Interrupted);
        }

        let path = Path::new(&record.path);
        let outcome = if path.is_file() {
            match hasher.hash_file(path) {
                Ok(actual) if actual == record.hash => None,
                Ok(actual) => Some(Corruption::Mismatch { actual }),
                Err(HashError::Interrupted(_)) => return Err(IntegrityError::Interrupted),
                Err(HashError::NotFound(_)) => Some(Corruption::Missing),
                Err(e) => Some(Corruption::Unreadable {
                    error: e.to_string(),
                }),
            }
        } else {
            Some(Corruption::Missing)
        };

        let status = match outcome {
            None => {
                report.ok += 1;
                FileStatus::Ok
            }
            Some(corruption) => {
                log::debug!("{} failed verification: {:?}", record.path, corruption);
                report.corrupted.push(CorruptedFile {
                    path: record.path.clone(),
                    expected: record.hash,
                    corruption,
                });
                FileStatus::Corrupted
            }
        };

        if let Some(ref callback) = config.progress_callback {
            callback.on_file(index + 1, &record.path, status);
        }
    }

    Ok(())
}
