use crate::keys::StoragePath;
use crate::traits::{BlobFetcher, BlobStore, BlobUploader, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use parley_core::{AssetContent, AssetHandle};
use std::time::Duration;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    url_ttl: Duration,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `url_ttl` - Lifetime of the presigned URLs returned by `fetch`
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        url_ttl: Duration,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            url_ttl,
        })
    }
}

/// Translate an object_store error into the storage error taxonomy
fn map_store_error(path: &StoragePath, err: ObjectStoreError) -> StorageError {
    match err {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(path.to_string()),
        ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
            StorageError::PermissionDenied(err.to_string())
        }
        other => StorageError::TransientIo(other.to_string()),
    }
}

#[async_trait]
impl BlobFetcher for S3Storage {
    async fn fetch(&self, path: &StoragePath) -> StorageResult<AssetHandle> {
        let start = std::time::Instant::now();
        let location = Path::from(path.as_str());

        let head: ObjectResult<_> = self.store.head(&location).await;

        head.map_err(|e| {
            let mapped = map_store_error(path, e);
            if !mapped.is_not_found() {
                tracing::error!(
                    error = %mapped,
                    bucket = %self.bucket,
                    key = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 fetch failed"
                );
            }
            mapped
        })?;

        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, self.url_ttl)
            .await;

        let url = url_result.map_err(|e| map_store_error(path, e))?.to_string();

        tracing::debug!(
            bucket = %self.bucket,
            key = %path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 fetch successful"
        );

        Ok(AssetHandle::new(url))
    }
}

#[async_trait]
impl BlobUploader for S3Storage {
    async fn upload(&self, path: &StoragePath, content: AssetContent) -> StorageResult<()> {
        let size = content.len() as u64;
        let location = Path::from(path.as_str());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put(&location, PutPayload::from(content.data))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %path,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            map_store_error(path, e)
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %path,
            size_bytes = size,
            content_type = %content.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }
}

impl BlobStore for S3Storage {
    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
