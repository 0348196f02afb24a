//! Error types for the client.

use thiserror::Error;
use vellum_core::CoreError;
use vellum_files::FilesError;
use vellum_share::ShareError;
use vellum_store::StoreError;

/// Errors that can occur during client operations.
///
/// Every check fails closed: an operation that returns an error has not
/// returned any partially authenticated data.
#[derive(Debug, Error)]
pub enum VellumError {
    /// A store or directory entry, filename, or share entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication tag mismatch, failed decryption, or a broken chain.
    #[error("integrity check failed: {0}")]
    Integrity(String),

    /// A signature did not verify against the claimed sender.
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// The caller may not perform this operation.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// An authenticated record that does not decode.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Store(StoreError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, VellumError>;

impl From<CoreError> for VellumError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Integrity(msg) => VellumError::Integrity(msg),
            CoreError::Verification | CoreError::InvalidPublicKey => {
                VellumError::Verification(e.to_string())
            }
            CoreError::Malformed(msg) | CoreError::Encoding(msg) => VellumError::Malformed(msg),
            CoreError::KeyDerivation(msg) => VellumError::Malformed(msg),
        }
    }
}

impl From<StoreError> for VellumError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::LabelTaken(label) => {
                VellumError::Authorization(format!("{label} is already published"))
            }
            StoreError::InvalidData(msg) => VellumError::Malformed(msg),
            other => VellumError::Store(other),
        }
    }
}

impl From<FilesError> for VellumError {
    fn from(e: FilesError) -> Self {
        match e {
            FilesError::Missing { .. } => VellumError::NotFound(e.to_string()),
            FilesError::BrokenChain { .. } => VellumError::Integrity(e.to_string()),
            FilesError::MalformedHead(msg) => VellumError::Malformed(msg),
            FilesError::Core(e) => e.into(),
            FilesError::Store(e) => e.into(),
        }
    }
}

impl From<ShareError> for VellumError {
    fn from(e: ShareError) -> Self {
        match e {
            ShareError::EntryNotFound { .. } => VellumError::NotFound(e.to_string()),
            ShareError::Core(e) => e.into(),
        }
    }
}
