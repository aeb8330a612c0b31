//! hashmyfiles - Media Library Checksums
//!
//! Records SHA-256 hashes of media files in a per-directory SQLite store
//! and later re-hashes them to detect bit-rot, truncation, or deletion.

pub mod cli;
pub mod config;
pub mod error;
pub mod integrity;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;
pub mod store;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, Mode, OutputFormat};
use crate::config::Config;
use crate::error::ExitCode;
use crate::integrity::{generate, verify, IntegrityConfig};
use crate::output::{text, JsonOutput};
use crate::progress::Progress;

/// Run the application for parsed CLI arguments.
///
/// Logging is expected to be initialized by the caller.
///
/// # Errors
///
/// Returns an error for invalid configuration, unusable target
/// directories, a missing store in verify mode, storage failures, and
/// interrupts (`IntegrityError::Interrupted`). Corrupted files are not an
/// error: they yield [`ExitCode::CorruptionFound`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if !cli.extensions.is_empty() {
        config = config.with_extensions(cli.extensions.clone());
        config.validate().context("Invalid --extension value")?;
    }

    if cli.show_config {
        let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
        print!("{}", rendered);
        return Ok(ExitCode::Success);
    }

    let Some(mode) = cli.mode() else {
        anyhow::bail!("Not enough arguments: expected -g <DIRECTORY> or -v <DIRECTORY>");
    };

    let handler = signal::install_handler()?;
    let quiet = cli.quiet || cli.output == OutputFormat::Json;
    let progress = Arc::new(Progress::new(quiet));
    let integrity = IntegrityConfig::new(config)
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(progress);

    match mode {
        Mode::Generate(directory) => {
            let summary = generate(directory, &integrity)?;
            let mut stdout = std::io::stdout().lock();
            match cli.output {
                OutputFormat::Text => text::write_generate_summary(&mut stdout, &summary)?,
                OutputFormat::Json => JsonOutput::from_generate(&summary).write_to(&mut stdout)?,
            }
            stdout.flush()?;
            Ok(ExitCode::Success)
        }
        Mode::Verify(directory) => {
            let report = verify(directory, &integrity)?;
            let mut stdout = std::io::stdout().lock();
            let code = if report.is_clean() {
                ExitCode::Success
            } else {
                ExitCode::CorruptionFound
            };
            match cli.output {
                OutputFormat::Text => text::write_verify_report(&mut stdout, &report)?,
                OutputFormat::Json => {
                    JsonOutput::from_verify(&report, code).write_to(&mut stdout)?;
                }
            }
            stdout.flush()?;
            Ok(code)
        }
    }
}
