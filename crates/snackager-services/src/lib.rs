//! Snackager Services Library
//!
//! Services built on top of the storage facade: the import cache, which
//! memoizes resolved git imports as descriptor objects in the imports bucket,
//! and the artifact upload utility for publishing compiled bundles.

pub mod artifacts;
pub mod descriptor;
pub mod import_cache;

// Re-export commonly used types
pub use artifacts::upload_artifact;
pub use descriptor::SnackDescriptor;
pub use import_cache::{CacheError, ImportCache};
