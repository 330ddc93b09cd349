//! End-to-end resolution against the local filesystem backend.

use async_trait::async_trait;
use parley_core::{AssetContent, AssetFolder, AssetHandle, StorageKey};
use parley_storage::{
    default_path, AssetService, BlobFetcher, BlobUploader, FallbackResolver, LocalStorage,
    ResolutionSource, StorageError, StoragePath, StorageResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "http://localhost:8080/assets";

/// Wraps a fetcher and records the paths it was asked for
struct Recording<F> {
    inner: F,
    paths: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl<F> Recording<F> {
    fn new(inner: F) -> Self {
        Self {
            inner,
            paths: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F: BlobFetcher> BlobFetcher for Recording<F> {
    async fn fetch(&self, path: &StoragePath) -> StorageResult<AssetHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(path.to_string());
        self.inner.fetch(path).await
    }
}

async fn local(dir: &std::path::Path) -> LocalStorage {
    LocalStorage::new(dir, BASE_URL.to_string()).await.unwrap()
}

#[tokio::test]
async fn missing_avatar_resolves_to_folder_default() {
    let dir = tempfile::tempdir().unwrap();
    let storage = local(dir.path()).await;
    tokio::fs::create_dir_all(dir.path().join("avatars")).await.unwrap();
    tokio::fs::write(dir.path().join("avatars/default.png"), b"default")
        .await
        .unwrap();

    let recording = Arc::new(Recording::new(storage));
    let resolver = FallbackResolver::new(recording.clone());

    let resolved = resolver
        .resolve(AssetFolder::Avatars, &StorageKey::new("user42").unwrap())
        .await
        .unwrap();

    assert_eq!(resolved.source, ResolutionSource::Fallback);
    assert_eq!(
        resolved.handle.as_str(),
        format!("{}/avatars/default.png", BASE_URL)
    );
    assert_eq!(
        recording.paths(),
        vec![
            "avatars/user42/user42".to_string(),
            "avatars/default.png".to_string()
        ]
    );
    assert_eq!(recording.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn uploaded_avatar_is_served_from_its_own_path() {
    let dir = tempfile::tempdir().unwrap();
    let service = AssetService::new(Arc::new(local(dir.path()).await));
    let key = StorageKey::new("user7").unwrap();

    service
        .upload(
            AssetFolder::Avatars,
            &key,
            AssetContent::new(b"jpeg".to_vec(), "image/jpeg"),
        )
        .await
        .unwrap();

    let resolved = service.resolve(AssetFolder::Avatars, &key).await.unwrap();
    assert_eq!(resolved.source, ResolutionSource::Primary);
    assert_eq!(
        resolved.handle.as_str(),
        format!("{}/avatars/user7/user7", BASE_URL)
    );
}

#[tokio::test]
async fn empty_store_fails_with_fallback_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = AssetService::new(Arc::new(local(dir.path()).await));

    let err = service
        .resolve(AssetFolder::GroupIcons, &StorageKey::new("g1").unwrap())
        .await
        .unwrap_err();

    match err {
        StorageError::NotFound(path) => assert_eq!(path, "group-icons/default.png"),
        other => panic!("expected NotFound for the fallback path, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_resolutions_run_independently() {
    let dir = tempfile::tempdir().unwrap();
    let storage = local(dir.path()).await;
    tokio::fs::create_dir_all(dir.path().join("avatars")).await.unwrap();
    tokio::fs::write(dir.path().join("avatars/default.png"), b"default")
        .await
        .unwrap();

    let recording = Arc::new(Recording::new(storage));
    let resolver = FallbackResolver::new(recording.clone());
    let key = StorageKey::new("dup").unwrap();

    let (a, b) = tokio::join!(
        resolver.resolve(AssetFolder::Avatars, &key),
        resolver.resolve(AssetFolder::Avatars, &key)
    );

    assert_eq!(a.unwrap(), b.unwrap());
    // No deduplication: each resolution performs its own two fetches
    assert_eq!(recording.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn user_uploads_and_folder_default_coexist_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(local(dir.path()).await);
    let service = AssetService::new(storage.clone());

    // A key spelled like the fallback object would claim its path as a directory
    assert!(StorageKey::new("default.png").is_err());

    let key = StorageKey::new("default").unwrap();
    service
        .upload(
            AssetFolder::Avatars,
            &key,
            AssetContent::new(b"mine".to_vec(), "image/png"),
        )
        .await
        .unwrap();

    // The folder default can still be written after user uploads
    storage
        .upload(
            &default_path(AssetFolder::Avatars),
            AssetContent::new(b"default".to_vec(), "image/png"),
        )
        .await
        .unwrap();

    let own = service.resolve(AssetFolder::Avatars, &key).await.unwrap();
    assert_eq!(own.source, ResolutionSource::Primary);

    let other = service
        .resolve(AssetFolder::Avatars, &StorageKey::new("newcomer").unwrap())
        .await
        .unwrap();
    assert_eq!(other.source, ResolutionSource::Fallback);
    assert_eq!(
        other.handle.as_str(),
        format!("{}/avatars/default.png", BASE_URL)
    );
}
