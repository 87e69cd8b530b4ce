//! URL-redirect objects.
//!
//! A redirect marker is a zero-length object whose website-redirect metadata
//! sends the client to `/destination`. Only S3 exposes that metadata; on any
//! other backend this is a known capability gap, not an error.

use crate::facade::StorageHandle;
use crate::traits::RedirectAck;
use snackager_core::StorageBackend;

/// Write a redirect marker at `(bucket, key)` pointing at `/destination`.
///
/// Returns the provider's raw write acknowledgment, or `None` when the write
/// fails or the active backend cannot represent redirects.
pub async fn add_redirect(
    storage: &StorageHandle,
    bucket: &str,
    key: &str,
    destination: &str,
) -> Option<RedirectAck> {
    if storage.backend() != StorageBackend::S3 {
        tracing::warn!(
            backend = %storage.backend(),
            bucket = %bucket,
            key = %key,
            "redirect objects are not supported on this backend"
        );
        return None;
    }

    storage
        .client()
        .put_redirect(bucket, key, destination)
        .await
        .ok()
}
