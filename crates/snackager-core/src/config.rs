//! Configuration module
//!
//! This module provides the bundler's configuration, loaded once from the
//! environment at process start. Validation happens eagerly: a missing
//! required field for the active storage backend fails startup instead of
//! surfacing as a deferred runtime error.

use std::env;

use crate::storage_types::StorageBackend;

/// Bundler configuration.
///
/// The storage backend identity is resolved by [`StorageBackend::from_signals`]
/// while loading and is immutable afterwards; there is no runtime mechanism to
/// change it.
#[derive(Clone, Debug)]
pub struct BundlerConfig {
    pub environment: String,
    pub storage_backend: StorageBackend,
    // S3 backend
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub s3_region: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_imports_bucket: Option<String>,
    // GCS backend
    pub gcs_project_id: Option<String>,
    pub gcs_bucket: Option<String>,
    pub gcs_imports_bucket: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<BundlerConfig>);

impl Config {
    fn inner(&self) -> &BundlerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = BundlerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.inner().aws_access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.inner().aws_secret_access_key.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_imports_bucket(&self) -> Option<&str> {
        self.inner().s3_imports_bucket.as_deref()
    }

    pub fn gcs_project_id(&self) -> Option<&str> {
        self.inner().gcs_project_id.as_deref()
    }

    pub fn gcs_bucket(&self) -> Option<&str> {
        self.inner().gcs_bucket.as_deref()
    }

    pub fn gcs_imports_bucket(&self) -> Option<&str> {
        self.inner().gcs_imports_bucket.as_deref()
    }

    /// Artifacts bucket for the active backend.
    pub fn artifacts_bucket(&self) -> Option<&str> {
        match self.storage_backend() {
            StorageBackend::S3 => self.s3_bucket(),
            StorageBackend::Gcs => self.gcs_bucket(),
        }
    }

    /// Imports bucket for the active backend.
    pub fn imports_bucket(&self) -> Option<&str> {
        match self.storage_backend() {
            StorageBackend::S3 => self.s3_imports_bucket(),
            StorageBackend::Gcs => self.gcs_imports_bucket(),
        }
    }
}

impl BundlerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let use_gcs = env::var("USE_GCS")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true" || v == "yes"
            })
            .unwrap_or(false);
        let gcs_project_id = env::var("GCS_PROJECT_ID").ok().filter(|s| !s.is_empty());

        let storage_backend = StorageBackend::from_signals(use_gcs, gcs_project_id.as_deref());

        let config = BundlerConfig {
            environment,
            storage_backend,
            aws_access_key_id: env::var("AWS_ACCESS_KEY_ID").ok().filter(|s| !s.is_empty()),
            aws_secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_imports_bucket: env::var("S3_IMPORTS_BUCKET").ok().filter(|s| !s.is_empty()),
            gcs_project_id,
            gcs_bucket: env::var("GCS_BUCKET").ok().filter(|s| !s.is_empty()),
            gcs_imports_bucket: env::var("GCS_IMPORTS_BUCKET")
                .ok()
                .filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.aws_access_key_id.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_ACCESS_KEY_ID must be set when using the S3 storage backend"
                    ));
                }
                if self.aws_secret_access_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_SECRET_ACCESS_KEY must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_imports_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_IMPORTS_BUCKET must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Gcs => {
                if self.gcs_project_id.is_none() {
                    return Err(anyhow::anyhow!(
                        "GCS_PROJECT_ID must be set when using the GCS storage backend"
                    ));
                }
                if self.gcs_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "GCS_BUCKET must be set when using the GCS storage backend"
                    ));
                }
                if self.gcs_imports_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "GCS_IMPORTS_BUCKET must be set when using the GCS storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
