//! Error handling utilities
//!
//! Centralized handling of errors that end the process.

use crate::error::IntakeError;
use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `IntakeError`: shows the user message, and the source chain in verbose mode
/// - For other errors: shows the error message and its chain in verbose mode
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("{}", render_fatal_error(&error, verbose));
    std::process::exit(fatal_exit_code(&error))
}

/// Exit code for a fatal error
pub fn fatal_exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<IntakeError>()
        .map(IntakeError::exit_code)
        .unwrap_or(70)
}

/// Text printed to stderr for a fatal error
pub fn render_fatal_error(error: &anyhow::Error, verbose: u8) -> String {
    if let Some(intake_err) = error.downcast_ref::<IntakeError>() {
        let mut out = intake_err.user_message();
        if verbose >= 1 {
            out.push_str("\n\nContext Chain:\n");
            out.push_str(&intake_err.developer_message());
        }
        return out;
    }

    let mut out = format!("Error: {error}");
    if verbose >= 1 {
        out.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            out.push_str(&format!("\n  {}: {}", i, cause));
        }
    }
    out
}
