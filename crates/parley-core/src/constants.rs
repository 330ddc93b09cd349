/// Object name of the per-folder fallback asset.
pub const FALLBACK_OBJECT_NAME: &str = "default.png";

/// Default lifetime of presigned asset URLs.
pub const DEFAULT_ASSET_URL_TTL_SECS: u64 = 3600;

/// Content type used when an upload's type cannot be guessed.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
