//! Storage abstraction traits
//!
//! This module defines the fetch and upload contracts every blob backend
//! implements, and the error taxonomy they report.

use std::io;

use async_trait::async_trait;
use parley_core::{AppError, AssetContent, AssetHandle, StorageBackend};
use thiserror::Error;

use crate::keys::StoragePath;

/// Storage operation errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The object does not exist.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The store could not be reached or failed while serving the request.
    #[error("Transient storage failure: {0}")]
    TransientIo(String),

    /// The store refused the request.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid storage path: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(err.to_string()),
            _ => StorageError::TransientIo(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
            StorageError::TransientIo(msg) => AppError::StorageUnavailable(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::ConfigError(msg) => AppError::Config(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Resolves a storage path to a retrievable handle.
///
/// A fetch performs no retries; absent objects fail with `NotFound`.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn fetch(&self, path: &StoragePath) -> StorageResult<AssetHandle>;
}

/// Persists whole objects at a storage path.
///
/// Concurrent uploads to the same path are not coordinated; the backing store
/// decides which write wins. A failed upload makes no claim about partial writes.
#[async_trait]
pub trait BlobUploader: Send + Sync {
    async fn upload(&self, path: &StoragePath, content: AssetContent) -> StorageResult<()>;
}

/// A backend that can both fetch and upload.
pub trait BlobStore: BlobFetcher + BlobUploader {
    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ErrorMetadata;

    #[test]
    fn io_errors_map_by_kind() {
        let err = StorageError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());

        let err = StorageError::from(io::Error::new(io::ErrorKind::PermissionDenied, "ro"));
        assert!(matches!(err, StorageError::PermissionDenied(_)));

        let err = StorageError::from(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(matches!(err, StorageError::TransientIo(_)));
    }

    #[test]
    fn transient_errors_are_recoverable_app_errors() {
        let err: AppError = StorageError::TransientIo("reset".to_string()).into();
        assert!(err.is_recoverable());

        let err: AppError = StorageError::NotFound("avatars/x/x".to_string()).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
