//! Output formatters for generate and verify results.
//!
//! This module provides two renderings of a finished run:
//! - Text for operators (the default)
//! - JSON for cron jobs and scripting
//!
//! Per-file status lines are not part of this module; they are streamed by
//! [`crate::progress::Progress`] while the run is in flight.
//!
//! # Example
//!
//! ```no_run
//! use hashmyfiles::integrity::{verify, IntegrityConfig};
//! use hashmyfiles::output::text;
//! use std::path::Path;
//!
//! let report = verify(Path::new("/media/videos"), &IntegrityConfig::default()).unwrap();
//! text::write_verify_report(&mut std::io::stdout(), &report).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::{JsonOutput, JsonOutputError};
