//! Generate mode: record hashes for media files not yet in the store.

use std::path::{Path, PathBuf};

use super::{IntegrityConfig, IntegrityError};
use crate::progress::FileStatus;
use crate::scanner::{FileEntry, HashError, ScanError, Walker};
use crate::store::{HashRecord, HashStore};

/// Statistics from a generate run.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Store file written to
    pub store_path: PathBuf,
    /// Whether the store file was created by this run
    pub store_created: bool,
    /// Candidate media files found by the walk
    pub candidates: usize,
    /// Files hashed and inserted by this run
    pub hashed: usize,
    /// Candidates skipped because they were already stored
    pub already_stored: usize,
    /// Candidates that could not be hashed or stored
    pub failed: usize,
    /// Total bytes of newly hashed files
    pub bytes_hashed: u64,
    /// Per-file hashing errors
    pub errors: Vec<HashError>,
    /// Non-fatal errors from the directory walk
    pub scan_errors: Vec<ScanError>,
}

/// Hash every new candidate under `directory` and store the results.
///
/// Previously stored paths are never re-hashed, so running this twice over
/// an unchanged directory hashes nothing the second time. Each record is
/// committed as soon as it is computed.
///
/// # Errors
///
/// Fails without touching the disk if `directory` is missing or not a
/// directory. Storage failures and interrupts abort the run; records
/// inserted before that point are kept.
pub fn generate(
    directory: &Path,
    config: &IntegrityConfig,
) -> Result<GenerateSummary, IntegrityError> {
    config.config.validate()?;

    if !directory.exists() {
        return Err(IntegrityError::PathNotFound(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(IntegrityError::NotADirectory(directory.to_path_buf()));
    }

    let root = directory
        .canonicalize()
        .map_err(|source| IntegrityError::Io {
            path: directory.to_path_buf(),
            source,
        })?;

    let store = HashStore::in_directory(&root, &config.config.store_name);
    let mut summary = GenerateSummary {
        store_path: store.path().to_path_buf(),
        ..Default::default()
    };

    if store.exists_on_disk() {
        config.announce(&format!(
            "{} exists. Will look for new files...",
            store.path().display()
        ));
    } else {
        config.announce(&format!(
            "{} does not exist. Creating a new database...",
            store.path().display()
        ));
        summary.store_created = true;
    }
    store.initialize()?;

    let candidates = collect_candidates(&root, config, &mut summary);
    if config.is_shutdown_requested() {
        return Err(IntegrityError::Interrupted);
    }
    summary.candidates = candidates.len();

    let mut pending = Vec::new();
    for file in candidates {
        let Some(key) = file.path.to_str().map(str::to_owned) else {
            log::warn!(
                "Skipping path that is not valid UTF-8: {}",
                file.path.display()
            );
            summary.failed += 1;
            continue;
        };
        if store.contains(&key)? {
            log::trace!("Already stored: {}", key);
            summary.already_stored += 1;
        } else {
            pending.push((key, file));
        }
    }

    log::debug!(
        "{} candidates, {} already stored, {} to hash",
        summary.candidates,
        summary.already_stored,
        pending.len()
    );

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start("generate", pending.len());
    }

    let hasher = config.hasher();
    for (index, (key, file)) in pending.into_iter().enumerate() {
        if config.is_shutdown_requested() {
            end_phase(config);
            return Err(IntegrityError::Interrupted);
        }

        if let Some(ref callback) = config.progress_callback {
            callback.on_file(index + 1, &key, FileStatus::Hashing);
        }

        match hasher.hash_file(&file.path) {
            Ok(hash) => {
                if let Err(e) = store.insert(&HashRecord::new(key, hash)) {
                    end_phase(config);
                    return Err(e.into());
                }
                summary.hashed += 1;
                summary.bytes_hashed += file.size;
            }
            Err(HashError::Interrupted(_)) => {
                end_phase(config);
                return Err(IntegrityError::Interrupted);
            }
            Err(e) => {
                log::warn!("Failed to hash {}: {}", file.path.display(), e);
                summary.failed += 1;
                summary.errors.push(e);
            }
        }
    }

    end_phase(config);

    log::info!(
        "Generate finished: {} hashed, {} already stored, {} failed",
        summary.hashed,
        summary.already_stored,
        summary.failed
    );

    Ok(summary)
}

fn collect_candidates(
    root: &Path,
    config: &IntegrityConfig,
    summary: &mut GenerateSummary,
) -> Vec<FileEntry> {
    let mut walker = Walker::new(root, config.walker_config());
    if let Some(ref flag) = config.shutdown_flag {
        walker = walker.with_shutdown_flag(flag.clone());
    }

    let mut files = Vec::new();
    for result in walker.walk() {
        match result {
            Ok(file) => files.push(file),
            Err(e) => {
                log::warn!("Scan error: {}", e);
                summary.scan_errors.push(e);
            }
        }
    }
    files
}

fn end_phase(config: &IntegrityConfig) {
    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end("generate");
    }
}
