use async_trait::async_trait;
use parley_core::{AssetContent, AssetHandle, StorageBackend};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::keys::StoragePath;
use crate::traits::{BlobFetcher, BlobStore, BlobUploader, StorageError, StorageResult};

#[derive(Default)]
struct Inner {
    objects: HashMap<String, AssetContent>,
    fetch_failures: HashMap<String, StorageError>,
    upload_failures: HashMap<String, StorageError>,
    fetches: Vec<String>,
    uploads: Vec<String>,
}

/// In-memory blob store that records every call
///
/// Handles are `memory://{path}`. Injected failures are returned on every
/// call for that path until cleared.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, data: Vec<u8>) {
        self.inner
            .lock()
            .unwrap()
            .objects
            .insert(path.to_string(), AssetContent::new(data, "image/png"));
    }

    pub fn fail_fetch(&self, path: &str, err: StorageError) {
        self.inner
            .lock()
            .unwrap()
            .fetch_failures
            .insert(path.to_string(), err);
    }

    pub fn fail_upload(&self, path: &str, err: StorageError) {
        self.inner
            .lock()
            .unwrap()
            .upload_failures
            .insert(path.to_string(), err);
    }

    pub fn object(&self, path: &str) -> Option<AssetContent> {
        self.inner.lock().unwrap().objects.get(path).cloned()
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .fetches
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.inner.lock().unwrap().fetches.len()
    }

    pub fn upload_count(&self) -> usize {
        self.inner.lock().unwrap().uploads.len()
    }
}

#[async_trait]
impl BlobFetcher for MemoryStore {
    async fn fetch(&self, path: &StoragePath) -> StorageResult<AssetHandle> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetches.push(path.to_string());

        if let Some(err) = inner.fetch_failures.get(path.as_str()) {
            return Err(err.clone());
        }
        if !inner.objects.contains_key(path.as_str()) {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Ok(AssetHandle::new(format!("memory://{}", path)))
    }
}

#[async_trait]
impl BlobUploader for MemoryStore {
    async fn upload(&self, path: &StoragePath, content: AssetContent) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.uploads.push(path.to_string());

        if let Some(err) = inner.upload_failures.get(path.as_str()) {
            return Err(err.clone());
        }
        inner.objects.insert(path.to_string(), content);
        Ok(())
    }
}

impl BlobStore for MemoryStore {
    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
