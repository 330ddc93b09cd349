//! Parley Core Library
//!
//! This crate provides the asset data model, error types and configuration
//! shared by the storage layer and the command-line client.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AssetContent, AssetFolder, AssetHandle, StorageKey};
pub use storage_types::StorageBackend;
