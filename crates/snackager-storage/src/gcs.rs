use crate::traits::{
    ObjectAcl, ObjectStorage, RedirectAck, StorageError, StorageResult, UploadOptions,
    UploadResult,
};
use crate::urls::encode_key;
use async_trait::async_trait;
use bytes::Bytes;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::object_access_controls::insert::{
    InsertObjectAccessControlRequest, ObjectAccessControlCreationConfig,
};
use google_cloud_storage::http::object_access_controls::ObjectACLRole;
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::upload::{UploadObjectRequest, UploadType};
use google_cloud_storage::http::objects::Object;
use google_cloud_storage::http::Error as GcsError;
use snackager_core::StorageBackend;

/// GCS storage implementation
#[derive(Clone)]
pub struct GcsStorage {
    client: Client,
    project_id: String,
}

fn is_not_found(error: &GcsError) -> bool {
    matches!(error, GcsError::Response(response) if response.code == 404)
}

/// Public URL for a GCS object. Visibility on GCS is an object property set
/// after the write, so the URL shape never depends on the requested ACL.
pub(crate) fn public_object_url(bucket: &str, key: &str) -> String {
    format!(
        "https://storage.googleapis.com/{}/{}",
        bucket,
        encode_key(key)
    )
}

impl GcsStorage {
    /// Create a new GcsStorage instance.
    ///
    /// The project identifier is validated by the factory before this runs.
    /// Credential discovery happens here and fails construction, not the
    /// first operation.
    pub async fn new(project_id: String) -> StorageResult<Self> {
        let config = ClientConfig::default().with_auth().await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to initialize GCS credentials for project {}: {}",
                project_id, e
            ))
        })?;

        Ok(GcsStorage {
            client: Client::new(config),
            project_id,
        })
    }

    /// Grant `allUsers` read access to an already-written object.
    ///
    /// This is a second network call, not atomic with the write: the object
    /// exists but is not yet public until it completes.
    async fn make_public(&self, bucket: &str, key: &str) -> Result<(), GcsError> {
        self.client
            .insert_object_access_control(&InsertObjectAccessControlRequest {
                bucket: bucket.to_string(),
                object: key.to_string(),
                generation: None,
                acl: ObjectAccessControlCreationConfig {
                    entity: "allUsers".to_string(),
                    role: ObjectACLRole::READER,
                },
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for GcsStorage {
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<UploadResult> {
        let size = body.len() as u64;
        let start = std::time::Instant::now();

        let metadata = Object {
            name: key.to_string(),
            cache_control: Some(options.cache_control().to_string()),
            content_type: options.content_type.clone(),
            ..Default::default()
        };

        self.client
            .upload_object(
                &UploadObjectRequest {
                    bucket: bucket.to_string(),
                    ..Default::default()
                },
                body,
                &UploadType::Multipart(Box::new(metadata)),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    project = %self.project_id,
                    bucket = %bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        if options.acl == ObjectAcl::PublicRead {
            self.make_public(bucket, key).await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    "GCS make-public failed after write"
                );
                StorageError::UploadFailed(e.to_string())
            })?;
        }

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(UploadResult {
            location: self.public_url(bucket, key),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn get_file(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();

        let data = self
            .client
            .download_object(
                &GetObjectRequest {
                    bucket: bucket.to_string(),
                    object: key.to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    StorageError::NotFound(key.to_string())
                } else {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "GCS download failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS download successful"
        );

        Ok(Bytes::from(data))
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_object(&DeleteObjectRequest {
                bucket: bucket.to_string(),
                object: key.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS delete failed"
                );
                StorageError::DeleteFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS delete successful"
        );

        Ok(())
    }

    async fn file_exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        match self
            .client
            .get_object(&GetObjectRequest {
                bucket: bucket.to_string(),
                object: key.to_string(),
                ..Default::default()
            })
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn put_redirect(
        &self,
        _bucket: &str,
        _key: &str,
        _destination: &str,
    ) -> StorageResult<RedirectAck> {
        Err(StorageError::Unsupported("redirect objects"))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        public_object_url(bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_is_backend_fixed_and_percent_encoded() {
        assert_eq!(
            public_object_url("b", "a b.js"),
            "https://storage.googleapis.com/b/a%20b.js"
        );
    }

    #[test]
    fn public_url_preserves_key_separators() {
        assert_eq!(
            public_object_url("imports", "github/user repo.json"),
            "https://storage.googleapis.com/imports/github/user%20repo.json"
        );
    }
}
