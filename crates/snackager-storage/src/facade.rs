//! Storage facade
//!
//! `StorageHandle` is the single storage handle for the process: the one
//! active client plus the two resolved bucket names. It is constructed once
//! at startup by the factory and passed explicitly to every component that
//! needs storage access; there is no ambient singleton.
//!
//! The facade is where recoverable provider failures stop propagating:
//! uploads and reads collapse to `None`, existence probes to `false`, and
//! deletes to a no-op. Eviction and existence checks are advisory; callers
//! of reads treat absence as "must recompute".

use std::sync::Arc;

use bytes::Bytes;
use snackager_core::StorageBackend;

use crate::traits::{ObjectStorage, UploadOptions, UploadResult};

/// The process-wide storage handle: one active backend client and the two
/// logical bucket names (artifacts, imports) resolved for it.
#[derive(Clone)]
pub struct StorageHandle {
    client: Arc<dyn ObjectStorage>,
    backend: StorageBackend,
    artifacts_bucket: String,
    imports_bucket: String,
}

impl StorageHandle {
    pub fn new(
        client: Arc<dyn ObjectStorage>,
        backend: StorageBackend,
        artifacts_bucket: String,
        imports_bucket: String,
    ) -> Self {
        StorageHandle {
            client,
            backend,
            artifacts_bucket,
            imports_bucket,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Bucket holding compiled bundles; objects here are world-readable.
    pub fn artifacts_bucket(&self) -> &str {
        &self.artifacts_bucket
    }

    /// Bucket holding cached import descriptors.
    pub fn imports_bucket(&self) -> &str {
        &self.imports_bucket
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        self.client.public_url(bucket, key)
    }

    pub(crate) fn client(&self) -> &dyn ObjectStorage {
        self.client.as_ref()
    }

    /// Write `body` to `(bucket, key)`. On any provider error the failure is
    /// logged by the client and `None` is returned; it is the caller's
    /// responsibility to decide whether absence means "retry" or "give up".
    pub async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Option<UploadResult> {
        self.client
            .upload_file(bucket, key, body, options)
            .await
            .ok()
    }

    /// Fetch an object's content. Missing objects and transient provider
    /// errors both surface as `None`; no distinction is made at this layer.
    pub async fn get_file(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.client.get_file(bucket, key).await.ok()
    }

    /// Best-effort delete. Provider errors are swallowed; deletion is
    /// fire-and-forget from the caller's perspective.
    pub async fn delete_file(&self, bucket: &str, key: &str) {
        let _ = self.client.delete_file(bucket, key).await;
    }

    /// True only if a metadata probe succeeds; any error, including
    /// "not found", yields false.
    pub async fn file_exists(&self, bucket: &str, key: &str) -> bool {
        self.client.file_exists(bucket, key).await.unwrap_or(false)
    }
}
