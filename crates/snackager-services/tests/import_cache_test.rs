mod helpers;

use std::sync::Arc;

use helpers::{FailingStorage, MemoryStorage};
use snackager_services::{ImportCache, SnackDescriptor};
use snackager_storage::{StorageBackend, StorageHandle};

fn memory_handle() -> (Arc<MemoryStorage>, Arc<StorageHandle>) {
    let client = Arc::new(MemoryStorage::new(StorageBackend::S3));
    let handle = Arc::new(StorageHandle::new(
        client.clone(),
        StorageBackend::S3,
        "artifacts".to_string(),
        "imports".to_string(),
    ));
    (client, handle)
}

fn failing_handle() -> Arc<StorageHandle> {
    Arc::new(StorageHandle::new(
        Arc::new(FailingStorage::new(StorageBackend::S3)),
        StorageBackend::S3,
        "artifacts".to_string(),
        "imports".to_string(),
    ))
}

fn sample_descriptor() -> SnackDescriptor {
    let mut descriptor = SnackDescriptor::new("left-pad", "1.3.0", "abc123");
    descriptor
        .dependencies
        .insert("lodash".to_string(), "4.17.21".to_string());
    descriptor
}

#[tokio::test]
async fn cache_then_get_round_trips_descriptor() {
    let (_client, handle) = memory_handle();
    let cache = ImportCache::new(handle);
    let descriptor = sample_descriptor();

    let result = cache
        .cache_obj(&descriptor, "left-pad.json")
        .await
        .expect("cache write should succeed");
    assert_eq!(result.bucket, "imports");
    assert_eq!(result.key, "left-pad.json");

    let cached = cache.get_cached_obj("left-pad.json").await;
    assert_eq!(cached, Some(descriptor));
}

#[tokio::test]
async fn cached_descriptors_are_public_json_with_long_lived_caching() {
    let (client, handle) = memory_handle();
    let cache = ImportCache::new(handle);

    cache
        .cache_obj(&sample_descriptor(), "left-pad.json")
        .await
        .expect("cache write should succeed");

    let stored = client
        .object("imports", "left-pad.json")
        .expect("descriptor stored in imports bucket");
    assert!(stored.public);
    assert_eq!(stored.cache_control, "public, max-age=31536000");
    assert_eq!(stored.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn get_on_missing_filename_returns_none() {
    let (_client, handle) = memory_handle();
    let cache = ImportCache::new(handle);
    assert_eq!(cache.get_cached_obj("never-cached.json").await, None);
}

#[tokio::test]
async fn corrupt_cache_entry_reads_as_miss() {
    let (client, handle) = memory_handle();
    let cache = ImportCache::new(handle);

    client.insert_raw("imports", "corrupt.json", &b"not valid json {"[..]);
    assert_eq!(cache.get_cached_obj("corrupt.json").await, None);
}

#[tokio::test]
async fn read_failure_reads_as_miss() {
    let cache = ImportCache::new(failing_handle());
    assert_eq!(cache.get_cached_obj("left-pad.json").await, None);
}

#[tokio::test]
async fn remove_then_get_returns_none() {
    let (_client, handle) = memory_handle();
    let cache = ImportCache::new(handle);

    cache
        .cache_obj(&sample_descriptor(), "left-pad.json")
        .await
        .expect("cache write should succeed");
    cache.remove_from_cache("left-pad.json").await;

    assert_eq!(cache.get_cached_obj("left-pad.json").await, None);
}

#[tokio::test]
async fn remove_failure_is_silent() {
    let cache = ImportCache::new(failing_handle());
    cache.remove_from_cache("left-pad.json").await;
}

#[tokio::test]
async fn write_failure_raises_error_naming_the_filename() {
    let cache = ImportCache::new(failing_handle());

    let err = cache
        .cache_obj(&sample_descriptor(), "left-pad.json")
        .await
        .expect_err("cache write should fail");
    assert!(err.to_string().contains("left-pad.json"));
}
