//! Asset service
//!
//! Start-up constructs one `AssetService` around the configured blob store
//! and hands it to whatever needs profile pictures or conversation icons.

use std::sync::Arc;

use parley_core::{AssetContent, AssetFolder, StorageKey};

use crate::keys::{locate, StoragePath};
use crate::resolver::{FallbackResolver, Resolved};
use crate::traits::{BlobStore, StorageResult};
use crate::StorageBackend;

#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn BlobStore>,
    resolver: FallbackResolver<dyn BlobStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        let resolver = FallbackResolver::new(Arc::clone(&store));
        Self { store, resolver }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.store.backend_type()
    }

    pub fn locate(&self, folder: AssetFolder, key: &StorageKey) -> StoragePath {
        locate(folder, key)
    }

    /// Resolve `key`'s asset, falling back to the folder default.
    pub async fn resolve(&self, folder: AssetFolder, key: &StorageKey) -> StorageResult<Resolved> {
        self.resolver.resolve(folder, key).await
    }

    /// Store `content` as `key`'s asset, replacing any previous one.
    ///
    /// Returns the path written. The object is not read back.
    pub async fn upload(
        &self,
        folder: AssetFolder,
        key: &StorageKey,
        content: AssetContent,
    ) -> StorageResult<StoragePath> {
        let path = locate(folder, key);
        self.store.upload(&path, content).await?;
        Ok(path)
    }
}
