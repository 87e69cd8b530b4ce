//! Durable memoization of resolved imports.
//!
//! Descriptor objects live in the imports bucket, keyed by filename. Reads
//! are forgiving: a missing file, a failed read, and a corrupt entry all
//! surface as a miss, and callers recompute. Writes are not: a caller that
//! believes it cached something must know when it did not, so `cache_obj`
//! escalates failures instead of swallowing them.

use std::sync::Arc;

use bytes::Bytes;
use snackager_core::constants::LONG_LIVED_CACHE_CONTROL;
use snackager_storage::{ObjectAcl, StorageHandle, UploadOptions, UploadResult};
use thiserror::Error;

use crate::descriptor::SnackDescriptor;

/// Errors raised by cache writes.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to serialize import descriptor {filename}: {source}")]
    Serialize {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to cache import descriptor {filename}: upload returned no result")]
    WriteFailed { filename: String },
}

/// Cache of import descriptors stored in the imports bucket.
#[derive(Clone)]
pub struct ImportCache {
    storage: Arc<StorageHandle>,
}

impl ImportCache {
    pub fn new(storage: Arc<StorageHandle>) -> Self {
        ImportCache { storage }
    }

    /// Read a cached descriptor. Missing files, read failures, and corrupt
    /// entries all collapse to `None`; callers treat absence as "must
    /// recompute".
    pub async fn get_cached_obj(&self, filename: &str) -> Option<SnackDescriptor> {
        let bytes = self
            .storage
            .get_file(self.storage.imports_bucket(), filename)
            .await?;

        match serde_json::from_slice(&bytes) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    filename = %filename,
                    "cached import descriptor is corrupt, treating as a miss"
                );
                None
            }
        }
    }

    /// Serialize and store a descriptor under `filename`.
    ///
    /// Cached descriptors are world-readable and cached for a year, like the
    /// artifacts they describe. Unlike reads, a failed write raises.
    pub async fn cache_obj(
        &self,
        descriptor: &SnackDescriptor,
        filename: &str,
    ) -> Result<UploadResult, CacheError> {
        let body = serde_json::to_vec_pretty(descriptor).map_err(|e| CacheError::Serialize {
            filename: filename.to_string(),
            source: e,
        })?;

        let options = UploadOptions {
            content_type: Some("application/json".to_string()),
            cache_control: Some(LONG_LIVED_CACHE_CONTROL.to_string()),
            acl: ObjectAcl::PublicRead,
        };

        self.storage
            .upload_file(
                self.storage.imports_bucket(),
                filename,
                Bytes::from(body),
                &options,
            )
            .await
            .ok_or_else(|| CacheError::WriteFailed {
                filename: filename.to_string(),
            })
    }

    /// Best-effort eviction; failures are ignored.
    pub async fn remove_from_cache(&self, filename: &str) {
        self.storage
            .delete_file(self.storage.imports_bucket(), filename)
            .await;
    }
}
