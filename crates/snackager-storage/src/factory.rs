use crate::facade::StorageHandle;
use crate::gcs::GcsStorage;
use crate::s3::S3Storage;
use crate::traits::{StorageError, StorageResult};
use snackager_core::{Config, StorageBackend};
use std::sync::Arc;

/// Construct the single active storage client per the resolved backend
/// identity and wrap it with the bucket names for that backend.
///
/// This runs once at process start. Required fields for the active backend
/// must already be present; missing ones fail here, before any storage
/// operation, never lazily.
pub async fn create_storage(config: &Config) -> StorageResult<StorageHandle> {
    match config.storage_backend() {
        StorageBackend::S3 => {
            let access_key_id = config.aws_access_key_id().ok_or_else(|| {
                StorageError::ConfigError("AWS_ACCESS_KEY_ID not configured".to_string())
            })?;
            let secret_access_key = config.aws_secret_access_key().ok_or_else(|| {
                StorageError::ConfigError("AWS_SECRET_ACCESS_KEY not configured".to_string())
            })?;
            let region = config.s3_region().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION not configured".to_string())
            })?;
            let artifacts_bucket = config.s3_bucket().ok_or_else(|| {
                StorageError::ConfigError("S3_BUCKET not configured".to_string())
            })?;
            let imports_bucket = config.s3_imports_bucket().ok_or_else(|| {
                StorageError::ConfigError("S3_IMPORTS_BUCKET not configured".to_string())
            })?;

            let storage = S3Storage::new(access_key_id, secret_access_key, region);

            Ok(StorageHandle::new(
                Arc::new(storage),
                StorageBackend::S3,
                artifacts_bucket.to_string(),
                imports_bucket.to_string(),
            ))
        }

        StorageBackend::Gcs => {
            let project_id = config.gcs_project_id().ok_or_else(|| {
                StorageError::ConfigError("GCS_PROJECT_ID not configured".to_string())
            })?;
            let artifacts_bucket = config.gcs_bucket().ok_or_else(|| {
                StorageError::ConfigError("GCS_BUCKET not configured".to_string())
            })?;
            let imports_bucket = config.gcs_imports_bucket().ok_or_else(|| {
                StorageError::ConfigError("GCS_IMPORTS_BUCKET not configured".to_string())
            })?;

            let storage = GcsStorage::new(project_id.to_string()).await?;

            Ok(StorageHandle::new(
                Arc::new(storage),
                StorageBackend::Gcs,
                artifacts_bucket.to_string(),
                imports_bucket.to_string(),
            ))
        }
    }
}
