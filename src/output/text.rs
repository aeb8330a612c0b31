//! Plain-text summaries printed after a run.

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::integrity::{GenerateSummary, VerifyReport};

/// Write the closing summary of a generate run.
pub fn write_generate_summary<W: Write>(writer: &mut W, summary: &GenerateSummary) -> io::Result<()> {
    writeln!(
        writer,
        "Hashed {} new file(s) ({}), {} already stored, {} failed",
        summary.hashed,
        ByteSize::b(summary.bytes_hashed),
        summary.already_stored,
        summary.failed
    )?;
    for error in &summary.errors {
        writeln!(writer, "  {}", error)?;
    }
    if !summary.scan_errors.is_empty() {
        writeln!(
            writer,
            "{} path(s) could not be scanned:",
            summary.scan_errors.len()
        )?;
        for error in &summary.scan_errors {
            writeln!(writer, "  {}", error)?;
        }
    }
    writeln!(writer, "Done")
}

/// Write the closing summary of a verify run.
///
/// Lists every corrupted file with its expected and actual hash, or the
/// reason no actual hash could be computed.
pub fn write_verify_report<W: Write>(writer: &mut W, report: &VerifyReport) -> io::Result<()> {
    if report.is_clean() {
        return writeln!(writer, "\nNo corrupted files found");
    }

    writeln!(writer, "\n{} corrupted files:", report.corrupted.len())?;
    for corrupted in &report.corrupted {
        writeln!(writer, "{}\n", corrupted)?;
    }
    Ok(())
}
