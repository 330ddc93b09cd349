//! Configuration module
//!
//! Environment-driven configuration for the asset storage layer. Values are
//! read once at start-up; the resulting `Config` is passed explicitly into the
//! components that need it.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::DEFAULT_ASSET_URL_TTL_SECS;
use crate::storage_types::StorageBackend;

/// Blob store settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    /// Lifetime of presigned URLs handed out by fetches
    pub asset_url_ttl_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub storage: StorageConfig,
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let storage_backend = match optional_var("STORAGE_BACKEND") {
            Some(value) => StorageBackend::from_str(&value)?,
            None => StorageBackend::Local,
        };

        let asset_url_ttl_secs = match optional_var("ASSET_URL_TTL_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("ASSET_URL_TTL_SECS must be a positive integer: {}", e)
            })?,
            None => DEFAULT_ASSET_URL_TTL_SECS,
        };

        Ok(StorageConfig {
            storage_backend,
            s3_bucket: optional_var("S3_BUCKET"),
            s3_region: optional_var("S3_REGION"),
            s3_endpoint: optional_var("S3_ENDPOINT"),
            aws_region: optional_var("AWS_REGION"),
            local_storage_path: optional_var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: optional_var("LOCAL_STORAGE_BASE_URL"),
            asset_url_ttl_secs,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.asset_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!("ASSET_URL_TTL_SECS must be greater than 0"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            environment,
            storage: StorageConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.storage.validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.storage.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.storage.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.storage.aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.storage.local_storage_base_url.as_deref()
    }

    pub fn asset_url_ttl(&self) -> Duration {
        Duration::from_secs(self.storage.asset_url_ttl_secs)
    }
}
