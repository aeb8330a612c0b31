//! Checksum generation and verification.
//!
//! This module drives the two workflows:
//! - [`generate`]: walk a directory and record a SHA-256 hash for every
//!   media file not yet in the store
//! - [`verify`]: recompute the hash of every stored file and report the
//!   ones that are missing or changed
//!
//! Verify works from the store's contents, not from a fresh walk. Files
//! added after the last generate are invisible to it, and files removed
//! since are reported as corrupted.
//!
//! # Example
//!
//! ```no_run
//! use hashmyfiles::config::Config;
//! use hashmyfiles::integrity::{generate, verify, IntegrityConfig};
//! use std::path::Path;
//!
//! let config = IntegrityConfig::new(Config::default());
//! let summary = generate(Path::new("/media/videos"), &config).unwrap();
//! println!("Hashed {} new files", summary.hashed);
//!
//! let report = verify(Path::new("/media/videos"), &config).unwrap();
//! println!("{} corrupted", report.corrupted.len());
//! ```

pub mod generate;
pub mod verify;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::progress::ProgressCallback;
use crate::scanner::{Hasher, WalkerConfig};
use crate::store::StoreError;

pub use generate::{generate, GenerateSummary};
pub use verify::{verify, Corruption, CorruptedFile, VerifyReport};

/// Runtime configuration for a generate or verify run.
#[derive(Clone)]
pub struct IntegrityConfig {
    /// Validated application settings.
    pub config: Config,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for IntegrityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrityConfig")
            .field("config", &self.config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl IntegrityConfig {
    /// Create a run configuration from application settings.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shutdown_flag: None,
            progress_callback: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Log `message` and hand it to the progress callback.
    fn announce(&self, message: &str) {
        log::debug!("{}", message);
        if let Some(ref callback) = self.progress_callback {
            callback.on_message(message);
        }
    }

    fn hasher(&self) -> Hasher {
        let hasher = Hasher::with_block_size(self.config.block_size);
        match self.shutdown_flag {
            Some(ref flag) => hasher.with_shutdown_flag(Arc::clone(flag)),
            None => hasher,
        }
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.config.extensions.clone())
            .exclude_name(self.config.store_name.clone())
            .with_follow_symlinks(self.config.follow_symlinks)
    }
}

/// Errors that abort a generate or verify run.
///
/// Corrupted files are not errors; they are reported in [`VerifyReport`].
#[derive(thiserror::Error, Debug)]
pub enum IntegrityError {
    /// The run was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Operation interrupted")]
    Interrupted,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// Verify was run before any hashes were generated.
    #[error("{0} does not exist. Please generate hashes first.")]
    StoreMissing(PathBuf),

    /// An I/O error occurred on the target directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings are not usable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The hash store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
