//! Progress reporting utilities using indicatif.
//!
//! The orchestrator reports through the [`ProgressCallback`] trait and never
//! writes to the terminal itself. [`Progress`] is the terminal
//! implementation: an indicatif bar on stderr, with per-file status lines
//! printed to stdout above it.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use yansi::Paint;

/// Per-file outcome reported to a [`ProgressCallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Generate is about to hash this file.
    Hashing,
    /// Verify recomputed a matching hash.
    Ok,
    /// Verify found the file missing, unreadable, or changed.
    Corrupted,
}

/// Progress callback for the generate and verify runs.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase ("generate" or "verify")
    /// * `total` - Total number of files the phase will visit
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called once per file.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of files visited so far, including this one
    /// * `path` - Path being processed
    /// * `status` - What happened to it
    fn on_file(&self, current: usize, path: &str, status: FileStatus);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);

    /// Called to update the progress message.
    fn on_message(&self, _message: &str) {}
}

/// Terminal progress reporter.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// When `quiet` is true neither the bar nor per-file lines are shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashmyfiles::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    /// Print a line to stdout without tearing the bar.
    fn print_line(&self, line: &str) {
        let bar = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        match bar.as_ref() {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        pb.set_message(phase.to_string());
        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_file(&self, current: usize, path: &str, status: FileStatus) {
        if self.quiet {
            return;
        }

        self.print_line(&format_status(path, status));

        if let Some(ref pb) = *self.bar.lock().unwrap_or_else(|e| e.into_inner()) {
            pb.set_position(current as u64);
            pb.set_message(truncate_path(path, 30));
        }
    }

    fn on_phase_end(&self, _phase: &str) {
        if let Some(pb) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pb.finish_and_clear();
        }
    }

    fn on_message(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.print_line(message);
    }
}

/// Render the per-file status line shown to the operator.
#[must_use]
pub fn format_status(path: &str, status: FileStatus) -> String {
    match status {
        FileStatus::Hashing => format!("Generate hash for: {}", path),
        FileStatus::Ok => format!("{} {}", path, "[OK]".green()),
        FileStatus::Corrupted => format!("{} {}", path, "[Corrupted]".red().bold()),
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{}", tail);
    }

    format!(".../{}", file_name)
}
