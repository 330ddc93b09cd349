//! Blob locator: shared path generation for storage backends.
//!
//! Path format: `{folder}/{key}/{key}` for an asset, `{folder}/{fallback}` for
//! the folder's default. Both are pure functions of their inputs.

use std::fmt::{Display, Formatter, Result as FmtResult};

use parley_core::{AssetFolder, StorageKey};

/// Path of an object in the blob store.
///
/// Only constructed by [`locate`] and [`default_path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoragePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoragePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Storage path of the asset belonging to `key` in `folder`.
pub fn locate(folder: AssetFolder, key: &StorageKey) -> StoragePath {
    StoragePath(format!("{}/{}/{}", folder.as_str(), key, key))
}

/// Storage path of `folder`'s fallback asset.
pub fn default_path(folder: AssetFolder) -> StoragePath {
    StoragePath(format!("{}/{}", folder.as_str(), folder.fallback_object()))
}
