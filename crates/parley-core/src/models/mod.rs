//! Asset data model
//!
//! Logical keys, folders, handles and upload content for the asset layer.

pub mod asset;

pub use asset::{AssetContent, AssetFolder, AssetHandle, StorageKey};
