//! Error types for the file engine.

use thiserror::Error;

use vellum_core::ObjectId;

/// Errors that can occur while storing, appending to, or loading a file.
#[derive(Debug, Error)]
pub enum FilesError {
    /// An object the chain points at is absent from the store.
    #[error("{what} missing at {id}")]
    Missing { what: &'static str, id: ObjectId },

    /// The node chain ended before the recorded length was reached.
    #[error("chain ends after {reached} of {length} nodes")]
    BrokenChain { reached: u64, length: u64 },

    /// An authenticated head that cannot describe a file.
    #[error("malformed file head: {0}")]
    MalformedHead(String),

    /// Envelope or encoding failure.
    #[error("core error: {0}")]
    Core(#[from] vellum_core::CoreError),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] vellum_store::StoreError),
}

/// Result type for file operations.
pub type Result<T> = std::result::Result<T, FilesError>;
