//! Command-line interface definitions for hashmyfiles.
//!
//! # Example
//!
//! ```bash
//! # Record hashes for every new .mp4/.mkv file under ~/Videos
//! hashmyfiles -g ~/Videos
//!
//! # Re-hash everything recorded and report corruption
//! hashmyfiles -v ~/Videos
//!
//! # Verify with a JSON report for a cron job
//! hashmyfiles -v ~/Videos --output json --quiet
//! ```

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Generate and verify SHA256 checksums for a media library.
///
/// Hashes are stored in `hashmyfiles.db` inside the target directory.
#[derive(Debug, Parser)]
#[command(name = "hashmyfiles")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["generate", "verify"]).multiple(false)))]
pub struct Cli {
    /// Generate hashes for media files in DIRECTORY not yet recorded
    #[arg(
        short = 'g',
        long,
        value_name = "DIRECTORY",
        required_unless_present_any = ["verify", "show_config"]
    )]
    pub generate: Option<PathBuf>,

    /// Verify every recorded file in DIRECTORY against its stored hash
    #[arg(short = 'v', long, value_name = "DIRECTORY")]
    pub verify: Option<PathBuf>,

    /// Media file suffix to match, e.g. `.webm` (repeatable, replaces the configured list)
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Format of the final summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Increase log verbosity (--verbose for debug, twice for trace)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and per-file lines; only errors are logged
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Selected run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Record hashes for new files.
    Generate(&'a Path),
    /// Check recorded files.
    Verify(&'a Path),
}

impl Cli {
    /// The mode and target directory, if one was given.
    #[must_use]
    pub fn mode(&self) -> Option<Mode<'_>> {
        match (&self.generate, &self.verify) {
            (Some(dir), _) => Some(Mode::Generate(dir)),
            (None, Some(dir)) => Some(Mode::Verify(dir)),
            (None, None) => None,
        }
    }
}

/// Output format for the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
