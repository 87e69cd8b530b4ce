//! Import descriptor objects.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one cached git import.
///
/// The storage layer treats this record as an opaque payload; the only schema
/// requirement is that it round-trips losslessly through JSON. Maps are
/// ordered so the serialized form stays stable and human-diffable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnackDescriptor {
    /// Package name of the import.
    pub name: String,
    pub version: String,
    /// Content hash of the imported source tree.
    pub hash: String,
    /// Resolved dependency versions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    /// Bundle files produced for this import, keyed by platform.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

impl SnackDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>, hash: impl Into<String>) -> Self {
        SnackDescriptor {
            name: name.into(),
            version: version.into(),
            hash: hash.into(),
            dependencies: BTreeMap::new(),
            files: BTreeMap::new(),
            cached_at: None,
        }
    }
}
