//! Artifact publishing.

use bytes::Bytes;
use snackager_core::constants::LONG_LIVED_CACHE_CONTROL;
use snackager_storage::{ObjectAcl, StorageHandle, UploadOptions, UploadResult};

/// Upload a compiled bundle to the artifacts bucket under `key`.
///
/// Artifacts are always world-readable and cached for a year; no content type
/// is forced. Failure is not escalated; callers must treat `None` as a
/// failed publish.
pub async fn upload_artifact(
    storage: &StorageHandle,
    key: &str,
    body: Bytes,
) -> Option<UploadResult> {
    let options = UploadOptions {
        content_type: None,
        cache_control: Some(LONG_LIVED_CACHE_CONTROL.to_string()),
        acl: ObjectAcl::PublicRead,
    };

    storage
        .upload_file(storage.artifacts_bucket(), key, body, &options)
        .await
}
