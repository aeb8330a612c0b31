//! Signal handling for graceful shutdown.
//!
//! A Ctrl+C (or SIGTERM) sets a shared `AtomicBool`. The walker and the
//! hasher poll it between files and between read blocks, and the run stops
//! with an interrupted error that the entry point turns into exit code 1.
//! Records already inserted stay in the store, so the next generate run
//! resumes where the interrupted one stopped.
//!
//! # Usage
//!
//! ```rust,no_run
//! use hashmyfiles::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let shutdown_flag = handler.get_flag();
//! // Pass shutdown_flag to IntegrityConfig
//! # let _ = shutdown_flag;
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag set when an interrupt is received.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    /// The shared atomic flag indicating shutdown was requested.
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new shutdown handler with the flag initially set to `false`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the shutdown flag for the walker and hasher.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the shutdown flag to `false`.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Calling this again in the same process returns the already installed
/// handler with its flag reset.
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if another handler was registered
/// outside this module.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        let _ = writeln!(std::io::stderr(), "\nInterrupt received, stopping...");
        let _ = std::io::stderr().flush();

        log::info!("Shutdown signal received");
    })?;

    let _ = GLOBAL_HANDLER.set(handler.clone());
    Ok(handler)
}

#[cfg(test)]
impl ShutdownHandler {
    fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}
