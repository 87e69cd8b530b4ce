//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait that both storage backends
//! implement, along with the value objects shared by every operation.

use async_trait::async_trait;
use bytes::Bytes;
use snackager_core::constants::LONG_LIVED_CACHE_CONTROL;
use snackager_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Operation not supported by this backend: {0}")]
    Unsupported(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object visibility requested at upload time.
///
/// `Private` means "use the backend default", not "explicitly restrict".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectAcl {
    #[default]
    Private,
    PublicRead,
}

/// Options accepted by uploads.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// MIME type; unset means the backend default applies.
    pub content_type: Option<String>,
    /// Cache-control header; unset means [`LONG_LIVED_CACHE_CONTROL`].
    pub cache_control: Option<String>,
    pub acl: ObjectAcl,
}

impl UploadOptions {
    /// Effective cache-control for this upload.
    pub fn cache_control(&self) -> &str {
        self.cache_control
            .as_deref()
            .unwrap_or(LONG_LIVED_CACHE_CONTROL)
    }
}

/// Value object returned by a successful upload.
///
/// `bucket` and `key` always echo the caller's input, never a
/// backend-transformed value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UploadResult {
    /// Fully-qualified public URL of the object.
    pub location: String,
    pub bucket: String,
    pub key: String,
}

/// Raw write acknowledgment returned by the provider for a redirect marker.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RedirectAck {
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

/// Storage abstraction trait
///
/// Both backends (S3, GCS) implement this trait so that calling code stays
/// backend-agnostic. Every operation targets an explicit `(bucket, key)` pair;
/// a pair identifies at most one object, and writes to the same pair
/// overwrite. Implementations perform a single attempt per call: no retries,
/// no timeout layer beyond the underlying client's defaults. Instances are
/// shared across all in-flight operations and must be safe for concurrent use.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `body` to `(bucket, key)`, overwriting any existing object.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<UploadResult>;

    /// Fetch the object's full content. Missing objects are `NotFound`.
    async fn get_file(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    /// Delete the object at `(bucket, key)`.
    async fn delete_file(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Probe the object's metadata. `Ok(false)` when the provider reports the
    /// object missing; other provider failures are errors.
    async fn file_exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Write a zero-length object whose website-redirect metadata points at
    /// `/destination`, with `no-cache` cache-control and public-read
    /// visibility. Only supported by the S3 backend; other backends return
    /// `StorageError::Unsupported`.
    async fn put_redirect(
        &self,
        bucket: &str,
        key: &str,
        destination: &str,
    ) -> StorageResult<RedirectAck>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Public URL for an object. Formed locally, without network I/O; for GCS
    /// the URL is independent of whether the object was made public.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_options_default_to_private_long_lived() {
        let options = UploadOptions::default();
        assert_eq!(options.acl, ObjectAcl::Private);
        assert_eq!(options.cache_control(), "public, max-age=31536000");
        assert!(options.content_type.is_none());
    }

    #[test]
    fn explicit_cache_control_wins() {
        let options = UploadOptions {
            cache_control: Some("no-cache".to_string()),
            ..Default::default()
        };
        assert_eq!(options.cache_control(), "no-cache");
    }
}
