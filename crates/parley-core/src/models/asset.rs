use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTENT_TYPE, FALLBACK_OBJECT_NAME};
use crate::error::AppError;

/// Logical identifier of the entity an asset belongs to (e.g. a user id).
///
/// A key is a single path segment: it is never empty, never contains `/`,
/// is never `.` or `..`, and never names a folder's fallback object (the
/// key's directory would occupy the fallback's path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Result<Self, AppError> {
        let key = key.into();
        if key.is_empty() {
            return Err(AppError::InvalidInput(
                "Storage key must not be empty".to_string(),
            ));
        }
        if key.contains('/') {
            return Err(AppError::InvalidInput(format!(
                "Storage key must not contain '/': {}",
                key
            )));
        }
        if key == "." || key == ".." {
            return Err(AppError::InvalidInput(format!(
                "Storage key is not a valid segment: {}",
                key
            )));
        }
        if key == FALLBACK_OBJECT_NAME {
            return Err(AppError::InvalidInput(format!(
                "Storage key is reserved for the folder fallback: {}",
                key
            )));
        }
        Ok(StorageKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for StorageKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::new(s)
    }
}

impl TryFrom<String> for StorageKey {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StorageKey::new(value)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

/// Top-level folder an asset lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetFolder {
    /// User profile pictures.
    Avatars,
    /// Conversation pictures.
    GroupIcons,
}

impl AssetFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFolder::Avatars => "avatars",
            AssetFolder::GroupIcons => "group-icons",
        }
    }

    /// Object name of the folder's fallback asset. Never contains a key.
    pub fn fallback_object(&self) -> &'static str {
        FALLBACK_OBJECT_NAME
    }
}

impl FromStr for AssetFolder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avatars" => Ok(AssetFolder::Avatars),
            "group-icons" => Ok(AssetFolder::GroupIcons),
            _ => Err(AppError::InvalidInput(format!("Unknown asset folder: {}", s))),
        }
    }
}

impl Display for AssetFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Retrievable locator (URL) for a fetched asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(String);

impl AssetHandle {
    pub fn new(url: impl Into<String>) -> Self {
        AssetHandle(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for AssetHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Whole-object content for an upload.
#[derive(Debug, Clone)]
pub struct AssetContent {
    pub data: Bytes,
    pub content_type: String,
}

impl AssetContent {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Read a local file, guessing its content type from the extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let content_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Ok(Self::new(data, content_type))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
