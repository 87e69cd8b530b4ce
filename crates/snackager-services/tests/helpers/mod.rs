//! Test doubles for the `ObjectStorage` trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use snackager_storage::{
    ObjectAcl, ObjectStorage, RedirectAck, StorageBackend, StorageError, StorageResult,
    UploadOptions, UploadResult,
};

/// One stored object plus the write options that produced it, so tests can
/// assert on visibility and caching headers.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub cache_control: String,
    pub public: bool,
}

/// In-memory storage backend reporting a configurable backend identity.
pub struct MemoryStorage {
    backend: StorageBackend,
    objects: Mutex<HashMap<(String, String), StoredObject>>,
}

impl MemoryStorage {
    pub fn new(backend: StorageBackend) -> Self {
        MemoryStorage {
            backend,
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Store raw bytes directly, bypassing upload bookkeeping.
    pub fn insert_raw(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: None,
                cache_control: String::new(),
                public: false,
            },
        );
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<UploadResult> {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: options.content_type.clone(),
                cache_control: options.cache_control().to_string(),
                public: options.acl == ObjectAcl::PublicRead,
            },
        );
        Ok(UploadResult {
            location: self.public_url(bucket, key),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn get_file(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        self.object(bucket, key)
            .map(|o| o.body)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete_file(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn file_exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        Ok(self.object(bucket, key).is_some())
    }

    async fn put_redirect(
        &self,
        bucket: &str,
        key: &str,
        destination: &str,
    ) -> StorageResult<RedirectAck> {
        if self.backend != StorageBackend::S3 {
            return Err(StorageError::Unsupported("redirect objects"));
        }
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: Bytes::new(),
                content_type: None,
                cache_control: "no-cache".to_string(),
                public: true,
            },
        );
        Ok(RedirectAck {
            e_tag: Some(format!("\"redirect-{}\"", destination.trim_start_matches('/'))),
            version_id: None,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{}/{}", bucket, key)
    }
}

/// Storage backend where every operation fails with a provider error.
pub struct FailingStorage {
    backend: StorageBackend,
}

impl FailingStorage {
    pub fn new(backend: StorageBackend) -> Self {
        FailingStorage { backend }
    }
}

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload_file(
        &self,
        _bucket: &str,
        _key: &str,
        _body: Bytes,
        _options: &UploadOptions,
    ) -> StorageResult<UploadResult> {
        Err(StorageError::UploadFailed("injected failure".to_string()))
    }

    async fn get_file(&self, _bucket: &str, _key: &str) -> StorageResult<Bytes> {
        Err(StorageError::DownloadFailed("injected failure".to_string()))
    }

    async fn delete_file(&self, _bucket: &str, _key: &str) -> StorageResult<()> {
        Err(StorageError::DeleteFailed("injected failure".to_string()))
    }

    async fn file_exists(&self, _bucket: &str, _key: &str) -> StorageResult<bool> {
        Err(StorageError::BackendError("injected failure".to_string()))
    }

    async fn put_redirect(
        &self,
        _bucket: &str,
        _key: &str,
        _destination: &str,
    ) -> StorageResult<RedirectAck> {
        Err(StorageError::UploadFailed("injected failure".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{}/{}", bucket, key)
    }
}
