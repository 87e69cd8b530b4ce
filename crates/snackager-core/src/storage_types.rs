use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// This enum defines the available storage backend types. It's defined in core
/// because it's used in configuration and shared by every storage consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Gcs,
}

impl StorageBackend {
    /// Resolve the backend identity from environment signals.
    ///
    /// The identity is decided once, at process start, before any client is
    /// constructed, and never changes for the process lifetime. An explicit
    /// "use GCS" flag or the presence of a GCS project identifier selects
    /// GCS; everything else selects S3. No other input influences the
    /// decision.
    pub fn from_signals(use_gcs: bool, gcs_project_id: Option<&str>) -> Self {
        if use_gcs || gcs_project_id.is_some_and(|p| !p.trim().is_empty()) {
            StorageBackend::Gcs
        } else {
            StorageBackend::S3
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "gcs" => Ok(StorageBackend::Gcs),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Gcs => write!(f, "gcs"),
        }
    }
}
