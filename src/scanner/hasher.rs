//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] reads files in fixed-size blocks so memory use stays bounded
//! regardless of file size. Digests are rendered as lowercase hex, the
//! format stored in the hash database.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::HashError;

/// Default read block size (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Streaming SHA-256 hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    block_size: usize,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher using [`DEFAULT_BLOCK_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Create a hasher reading `block_size` bytes at a time.
    ///
    /// A zero block size is clamped to one byte.
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag checked between blocks.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Hash the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::NotFound`] or [`HashError::PermissionDenied`] for
    /// those I/O kinds, [`HashError::Interrupted`] if shutdown is requested
    /// mid-file, and [`HashError::Io`] otherwise.
    pub fn hash_file(&self, path: &Path) -> Result<String, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        log::trace!("Hashing {}", path.display());
        self.hash_reader(file, path)
    }

    /// Hash everything readable from `reader`. `path` is used for errors only.
    pub fn hash_reader<R: Read>(&self, mut reader: R, path: &Path) -> Result<String, HashError> {
        let mut sha256 = Sha256::new();
        let mut buffer = vec![0u8; self.block_size];

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Interrupted(path.to_path_buf()));
            }

            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_io_error(path, e)),
            };
            sha256.update(&buffer[..n]);
        }

        Ok(format!("{:x}", sha256.finalize()))
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
