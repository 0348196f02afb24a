//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store and directory operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A directory value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The directory already holds a key under this label.
    #[error("directory label already published: {0}")]
    LabelTaken(String),

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("backend lock poisoned: {0}")]
    Poisoned(String),

    /// A blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
