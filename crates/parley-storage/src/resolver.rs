//! Fallback resolution
//!
//! Resolves the asset of a key, falling back to the folder's default asset
//! when the key's own object cannot be fetched. The two fetches run strictly
//! one after the other and each path is attempted at most once.

use std::sync::Arc;

use parley_core::{AssetFolder, AssetHandle, StorageKey};
use serde::Serialize;

use crate::keys::{default_path, locate};
use crate::traits::{BlobFetcher, StorageResult};

/// Which path produced a resolved handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Primary,
    Fallback,
}

/// Successful outcome of [`FallbackResolver::resolve`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub handle: AssetHandle,
    pub source: ResolutionSource,
}

/// Primary-then-default resolver over any [`BlobFetcher`].
pub struct FallbackResolver<F: BlobFetcher + ?Sized> {
    fetcher: Arc<F>,
}

impl<F: BlobFetcher + ?Sized> Clone for FallbackResolver<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: BlobFetcher + ?Sized> FallbackResolver<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Fetch `key`'s asset in `folder`, or the folder's default if that fails.
    ///
    /// When both fetches fail the fallback's error is returned; the primary
    /// error is only logged.
    pub async fn resolve(&self, folder: AssetFolder, key: &StorageKey) -> StorageResult<Resolved> {
        let primary = locate(folder, key);

        let primary_err = match self.fetcher.fetch(&primary).await {
            Ok(handle) => {
                return Ok(Resolved {
                    handle,
                    source: ResolutionSource::Primary,
                })
            }
            Err(e) => e,
        };

        let fallback = default_path(folder);
        tracing::warn!(
            error = %primary_err,
            primary = %primary,
            fallback = %fallback,
            "Primary asset fetch failed, trying folder default"
        );

        match self.fetcher.fetch(&fallback).await {
            Ok(handle) => Ok(Resolved {
                handle,
                source: ResolutionSource::Fallback,
            }),
            Err(fallback_err) => {
                tracing::error!(
                    error = %fallback_err,
                    primary_error = %primary_err,
                    fallback = %fallback,
                    "Fallback asset fetch failed"
                );
                Err(fallback_err)
            }
        }
    }
}
