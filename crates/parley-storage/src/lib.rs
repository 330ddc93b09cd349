//! Parley Storage Library
//!
//! This crate provides the asset storage layer: the blob locator, the fetch
//! and upload traits with S3 and local filesystem backends, and the fallback
//! resolver that serves a folder's default asset when a key has none.
//!
//! # Storage path format
//!
//! All backends use the same path layout:
//!
//! - **Asset of a key**: `{folder}/{key}/{key}`
//! - **Folder fallback**: `{folder}/default.png`
//!
//! Paths are only produced by the `keys` module so every backend addresses
//! the same remote object for the same `(folder, key)`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod resolver;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod service;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{default_path, locate, StoragePath};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use parley_core::StorageBackend;
pub use resolver::{FallbackResolver, Resolved, ResolutionSource};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use service::AssetService;
pub use traits::{BlobFetcher, BlobStore, BlobUploader, StorageError, StorageResult};
