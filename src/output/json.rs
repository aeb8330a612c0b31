//! JSON output formatter for generate and verify results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "mode": "verify",
//!   "store": "/media/videos/hashmyfiles.db",
//!   "checked": 2,
//!   "ok": 1,
//!   "corrupted": [
//!     {
//!       "path": "/media/videos/a.mp4",
//!       "expected": "4b68ab38...",
//!       "corruption": { "kind": "mismatch", "actual": "c07a3de0..." }
//!     }
//!   ],
//!   "exit_code": 1
//! }
//! ```
//!
//! Generate results use `"mode": "generate"` with the counters of
//! [`GenerateSummary`] plus its hashing and scan errors as strings.

use std::io::Write;

use serde::Serialize;

use crate::error::ExitCode;
use crate::integrity::{CorruptedFile, GenerateSummary, VerifyReport};

/// JSON document describing a finished run.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum JsonOutput<'a> {
    /// Result of a generate run.
    Generate {
        /// Store file path
        store: String,
        /// Whether the store was created by this run
        store_created: bool,
        /// Candidate files found
        candidates: usize,
        /// Files newly hashed
        hashed: usize,
        /// Candidates already in the store
        already_stored: usize,
        /// Candidates that could not be hashed
        failed: usize,
        /// Bytes hashed by this run
        bytes_hashed: u64,
        /// Per-file hashing errors
        errors: Vec<String>,
        /// Paths the directory walk could not read
        scan_errors: Vec<String>,
        /// Process exit code
        exit_code: i32,
    },
    /// Result of a verify run.
    Verify {
        /// Store file path
        store: String,
        /// Records checked
        checked: usize,
        /// Records that still match
        ok: usize,
        /// Records that failed
        corrupted: &'a [CorruptedFile],
        /// Process exit code
        exit_code: i32,
    },
}

impl<'a> JsonOutput<'a> {
    /// Build the document for a generate run.
    #[must_use]
    pub fn from_generate(summary: &'a GenerateSummary) -> Self {
        Self::Generate {
            store: summary.store_path.to_string_lossy().into_owned(),
            store_created: summary.store_created,
            candidates: summary.candidates,
            hashed: summary.hashed,
            already_stored: summary.already_stored,
            failed: summary.failed,
            bytes_hashed: summary.bytes_hashed,
            errors: summary.errors.iter().map(ToString::to_string).collect(),
            scan_errors: summary.scan_errors.iter().map(ToString::to_string).collect(),
            exit_code: ExitCode::Success.as_i32(),
        }
    }

    /// Build the document for a verify run.
    #[must_use]
    pub fn from_verify(report: &'a VerifyReport, exit_code: ExitCode) -> Self {
        Self::Verify {
            store: report.store_path.to_string_lossy().into_owned(),
            checked: report.checked,
            ok: report.ok,
            corrupted: &report.corrupted,
            exit_code: exit_code.as_i32(),
        }
    }

    /// Serialize to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty JSON followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        let json = self.to_json_pretty()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
