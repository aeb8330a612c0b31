//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree on the calling thread and yields
//! every regular file whose name ends with one of the configured
//! extensions. Entries are sorted by file name within each directory, so
//! the walk order is deterministic.
//!
//! # Features
//!
//! - Raw suffix extension filtering (see [`super::matches_extension`])
//! - Exact-name exclusions (the hash store file)
//! - File symlinks yielded as candidates; directory symlinks only walked
//!   when following is enabled, with loop detection
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use hashmyfiles::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(vec![".mkv".to_string()]).exclude_name("hashmyfiles.db");
//! let walker = Walker::new(Path::new("/media/videos"), config);
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} candidates", files.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{matches_extension, FileEntry, ScanError, WalkerConfig};

/// Sequential directory walker for candidate discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Whether a file name makes the file a candidate.
    fn is_candidate(&self, file_name: &str) -> bool {
        if self.config.excluded_names.iter().any(|n| n == file_name) {
            log::trace!("Skipping excluded file: {}", file_name);
            return false;
        }
        matches_extension(file_name, &self.config.extensions)
    }

    /// Walk the directory tree, yielding candidate files.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    return false;
                }
                true
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();

                    if file_type.is_dir() {
                        return None;
                    }

                    if !file_type.is_file() && !file_type.is_symlink() {
                        return None;
                    }

                    let candidate = self.is_candidate(&entry.file_name().to_string_lossy());
                    if !candidate {
                        return None;
                    }

                    if file_type.is_symlink() {
                        // Only reached when not following links; directory
                        // links are never descended into
                        return match std::fs::metadata(entry.path()) {
                            Ok(target) if target.is_file() => {
                                Some(Ok(FileEntry::new(entry.into_path(), target.len())))
                            }
                            Ok(_) => {
                                log::trace!("Skipping symlink: {}", entry.path().display());
                                None
                            }
                            Err(e) => {
                                log::debug!(
                                    "Skipping dangling symlink {}: {}",
                                    entry.path().display(),
                                    e
                                );
                                None
                            }
                        };
                    }

                    match entry.metadata() {
                        Ok(metadata) => Some(Ok(FileEntry::new(
                            entry.into_path(),
                            metadata.len(),
                        ))),
                        Err(e) => Some(Err(self.handle_walkdir_error(e))),
                    }
                }
                Err(e) => Some(Err(self.handle_walkdir_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.loop_ancestor().is_some() {
            log::warn!("Symlink loop detected: {}", path.display());
            return ScanError::SymlinkLoop(path);
        }

        match error.into_io_error() {
            Some(io) if io.kind() == ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            Some(io) if io.kind() == ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                ScanError::NotFound(path)
            }
            Some(io) => {
                log::warn!("I/O error for {}: {}", path.display(), io);
                ScanError::Io { path, source: io }
            }
            None => {
                log::warn!("Walker error for {}", path.display());
                ScanError::Io {
                    path,
                    source: std::io::Error::other("directory walk failed"),
                }
            }
        }
    }
}
