use crate::keys::StoragePath;
use crate::traits::{BlobFetcher, BlobStore, BlobUploader, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use parley_core::{AssetContent, AssetHandle};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for asset storage (e.g., "/var/lib/parley/assets")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:8080/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage path to a filesystem path under the base directory.
    ///
    /// Only plain path segments are accepted, so the result cannot escape
    /// `base_path`.
    fn key_to_path(&self, storage_path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(storage_path);
        let only_normal = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if storage_path.is_empty() || !only_normal {
            return Err(StorageError::InvalidKey(format!(
                "Storage path resolves outside storage directory: {}",
                storage_path
            )));
        }

        Ok(self.base_path.join(relative))
    }

    /// Generate public URL for a stored object
    fn generate_url(&self, storage_path: &str) -> String {
        let encoded: Vec<String> = storage_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url.trim_end_matches('/'), encoded.join("/"))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobFetcher for LocalStorage {
    async fn fetch(&self, path: &StoragePath) -> StorageResult<AssetHandle> {
        let file_path = self.key_to_path(path.as_str())?;
        let start = std::time::Instant::now();

        let metadata = fs::metadata(&file_path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(path.to_string())
            } else {
                tracing::error!(
                    error = %e,
                    path = %file_path.display(),
                    key = %path,
                    "Local storage fetch failed"
                );
                StorageError::from(e)
            }
        })?;

        if !metadata.is_file() {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let url = self.generate_url(path.as_str());

        tracing::debug!(
            path = %file_path.display(),
            key = %path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage fetch successful"
        );

        Ok(AssetHandle::new(url))
    }
}

#[async_trait]
impl BlobUploader for LocalStorage {
    async fn upload(&self, path: &StoragePath, content: AssetContent) -> StorageResult<()> {
        let file_path = self.key_to_path(path.as_str())?;
        let size = content.len();

        self.ensure_parent_dir(&file_path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&file_path).await.map_err(|e| {
            tracing::error!(error = %e, path = %file_path.display(), "Failed to create file");
            StorageError::from(e)
        })?;

        file.write_all(&content.data).await.map_err(|e| {
            tracing::error!(error = %e, path = %file_path.display(), "Failed to write file");
            StorageError::from(e)
        })?;

        file.sync_all().await.map_err(|e| {
            tracing::error!(error = %e, path = %file_path.display(), "Failed to sync file");
            StorageError::from(e)
        })?;

        tracing::info!(
            path = %file_path.display(),
            key = %path,
            size_bytes = size,
            content_type = %content.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }
}

impl BlobStore for LocalStorage {
    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::keys::{default_path, locate};
    use parley_core::{AssetFolder, StorageKey};
    use tempfile::tempdir;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:8080/assets/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_then_fetch() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let path = locate(AssetFolder::Avatars, &StorageKey::new("user7").unwrap());

        storage
            .upload(&path, AssetContent::new(b"png bytes".to_vec(), "image/png"))
            .await
            .unwrap();

        let on_disk = fs::read(dir.path().join("avatars/user7/user7")).await.unwrap();
        assert_eq!(on_disk, b"png bytes");

        let handle = storage.fetch(&path).await.unwrap();
        assert_eq!(
            handle.as_str(),
            "http://localhost:8080/assets/avatars/user7/user7"
        );
    }

    #[tokio::test]
    async fn test_local_storage_fetch_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let result = storage.fetch(&default_path(AssetFolder::Avatars)).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_storage_upload_overwrites() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let path = locate(AssetFolder::GroupIcons, &StorageKey::new("g1").unwrap());

        storage
            .upload(&path, AssetContent::new(b"first".to_vec(), "image/png"))
            .await
            .unwrap();
        storage
            .upload(&path, AssetContent::new(b"second".to_vec(), "image/png"))
            .await
            .unwrap();

        let on_disk = fs::read(dir.path().join("group-icons/g1/g1")).await.unwrap();
        assert_eq!(on_disk, b"second");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        assert!(matches!(
            storage.key_to_path("../../../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.key_to_path("/etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(storage.key_to_path("avatars/u/u").is_ok());
    }

    #[tokio::test]
    async fn test_generated_urls_are_percent_encoded() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        assert_eq!(
            storage.generate_url("avatars/a b/a b"),
            "http://localhost:8080/assets/avatars/a%20b/a%20b"
        );
    }
}
