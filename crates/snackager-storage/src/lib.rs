//! Snackager Storage Library
//!
//! This crate provides the storage abstraction for the bundler's two logical
//! buckets (artifacts and imports). It includes the `ObjectStorage` trait, the
//! S3 and GCS implementations, and the `StorageHandle` facade through which
//! the rest of the process performs storage operations.
//!
//! The backend identity is decided once at process start from environment
//! signals; `factory::create_storage` constructs the single active client and
//! no other component constructs one. Recoverable provider failures never
//! raise past the facade: they surface as `None`/`false`/no-op, and callers
//! decide whether absence means "retry" or "give up".

pub mod facade;
pub mod factory;
pub mod gcs;
pub mod redirect;
pub mod s3;
pub mod traits;
pub(crate) mod urls;

// Re-export commonly used types
pub use facade::StorageHandle;
pub use factory::create_storage;
pub use gcs::GcsStorage;
pub use redirect::add_redirect;
pub use s3::S3Storage;
pub use snackager_core::StorageBackend;
pub use traits::{
    ObjectAcl, ObjectStorage, RedirectAck, StorageError, StorageResult, UploadOptions,
    UploadResult,
};
