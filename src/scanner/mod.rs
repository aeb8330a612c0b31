//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Sequential directory walking using walkdir
//! - Extension filtering by raw, case-sensitive suffix match
//! - Streaming SHA-256 content hashing
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: SHA-256 file hashing (streaming, fixed block size)
//!
//! # Example
//!
//! ```no_run
//! use hashmyfiles::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(vec![".mp4".to_string(), ".mkv".to_string()]);
//!
//! let walker = Walker::new(Path::new("/media/videos"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{Hasher, DEFAULT_BLOCK_SIZE};
pub use walker::Walker;

/// A candidate file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file, rooted at the walked directory
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// File name suffixes that make a file a candidate (e.g. `.mp4`).
    /// Matching is case-sensitive and done on the raw file name.
    pub extensions: Vec<String>,

    /// Exact file names that are never candidates, whatever their suffix.
    /// The hash store file is always listed here.
    pub excluded_names: Vec<String>,

    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a configuration matching the given extensions.
    #[must_use]
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            ..Default::default()
        }
    }

    /// Never yield files with this exact name.
    #[must_use]
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.push(name.into());
        self
    }

    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Whether `file_name` ends with one of `extensions`.
///
/// This is a plain suffix test: `clip.MP4` does not match `.mp4`, and
/// `clip.mp4x` does not match either.
#[must_use]
pub fn matches_extension<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> bool {
    extensions
        .iter()
        .any(|ext| file_name.ends_with(ext.as_ref()))
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// A symbolic link loop was detected.
    #[error("Symlink loop detected at {0}")]
    SymlinkLoop(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Hashing stopped because shutdown was requested.
    #[error("Hashing interrupted: {0}")]
    Interrupted(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
