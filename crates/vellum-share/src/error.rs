//! Error types for the sharing records.

use thiserror::Error;

/// Errors that can occur while handling sharing records.
#[derive(Debug, Error)]
pub enum ShareError {
    /// No share list entry for this filename and recipient.
    #[error("no share of {filename:?} with {recipient:?}")]
    EntryNotFound { filename: String, recipient: String },

    /// Envelope or encoding failure.
    #[error("core error: {0}")]
    Core(#[from] vellum_core::CoreError),
}

/// Result type for sharing record operations.
pub type Result<T> = std::result::Result<T, ShareError>;
