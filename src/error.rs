//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit outcomes for the hashmyfiles application.
///
/// Every failure maps to process exit code 1; the variants only differ in
/// their machine-readable code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Run completed; for verify, no corrupted files were found.
    Success,
    /// Usage, configuration, filesystem or storage failure.
    GeneralError,
    /// Verify completed and found at least one corrupted file.
    CorruptionFound,
    /// Run was interrupted by the operator (Ctrl+C).
    Interrupted,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::GeneralError | Self::CorruptionFound | Self::Interrupted => 1,
        }
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HM000",
            Self::GeneralError => "HM001",
            Self::CorruptionFound => "HM002",
            Self::Interrupted => "HM130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "HM001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
