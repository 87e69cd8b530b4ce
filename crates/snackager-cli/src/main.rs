//! Snackager CLI, an operational client for the bundler's storage buckets.
//!
//! Reads the same environment configuration as the service (see
//! `snackager_core::config`). Object commands target the artifacts bucket by
//! default; pass `--imports` to target the imports bucket instead.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use serde::Serialize;
use snackager_cli::init_tracing;
use snackager_core::Config;
use snackager_services::{upload_artifact, ImportCache};
use snackager_storage::{add_redirect, create_storage, StorageHandle};

#[derive(Parser)]
#[command(name = "snackager", about = "Snackager storage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a file to the artifacts bucket
    Upload {
        /// Path to the file to publish
        file: PathBuf,
        /// Object key; defaults to the file name
        #[arg(long)]
        key: Option<String>,
    },
    /// Fetch an object and write it to stdout or a file
    Get {
        /// Object key
        key: String,
        /// Target the imports bucket instead of the artifacts bucket
        #[arg(long)]
        imports: bool,
        /// Write the object to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check whether an object exists
    Exists {
        /// Object key
        key: String,
        /// Target the imports bucket instead of the artifacts bucket
        #[arg(long)]
        imports: bool,
    },
    /// Delete an object (best-effort)
    Delete {
        /// Object key
        key: String,
        /// Target the imports bucket instead of the artifacts bucket
        #[arg(long)]
        imports: bool,
    },
    /// Write a URL-redirect marker (S3 backend only)
    Redirect {
        /// Object key of the marker
        key: String,
        /// Redirect destination path
        destination: String,
    },
    /// Print the public URL for an object key
    Url {
        /// Object key
        key: String,
        /// Target the imports bucket instead of the artifacts bucket
        #[arg(long)]
        imports: bool,
    },
    /// Import cache operations
    Cache {
        #[command(subcommand)]
        sub: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Fetch a cached import descriptor
    Get {
        /// Descriptor filename in the imports bucket
        filename: String,
    },
    /// Evict a cached import descriptor (best-effort)
    Remove {
        /// Descriptor filename in the imports bucket
        filename: String,
    },
}

fn bucket_for(storage: &StorageHandle, imports: bool) -> String {
    if imports {
        storage.imports_bucket().to_string()
    } else {
        storage.artifacts_bucket().to_string()
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context(
        "Failed to load configuration; check the storage backend variables for the active backend",
    )?;
    let storage = Arc::new(
        create_storage(&config)
            .await
            .context("Failed to construct the storage client")?,
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file, key } => {
            let key = match key {
                Some(key) => key,
                None => file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .context("File path has no file name; pass --key")?,
            };
            let body = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Read {}", file.display()))?;

            match upload_artifact(&storage, &key, Bytes::from(body)).await {
                Some(result) => print_json(&result)?,
                None => anyhow::bail!("Upload of {} failed", key),
            }
        }
        Commands::Get {
            key,
            imports,
            output,
        } => {
            let bucket = bucket_for(&storage, imports);
            let Some(body) = storage.get_file(&bucket, &key).await else {
                anyhow::bail!("Object {}/{} is absent", bucket, key);
            };
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &body)
                        .await
                        .with_context(|| format!("Write {}", path.display()))?;
                }
                None => std::io::stdout().write_all(&body)?,
            }
        }
        Commands::Exists { key, imports } => {
            let bucket = bucket_for(&storage, imports);
            let exists = storage.file_exists(&bucket, &key).await;
            print_json(&serde_json::json!({ "bucket": bucket, "key": key, "exists": exists }))?;
            if !exists {
                std::process::exit(1);
            }
        }
        Commands::Delete { key, imports } => {
            let bucket = bucket_for(&storage, imports);
            storage.delete_file(&bucket, &key).await;
            print_json(&serde_json::json!({ "bucket": bucket, "key": key, "deleted": true }))?;
        }
        Commands::Redirect { key, destination } => {
            let bucket = storage.artifacts_bucket().to_string();
            match add_redirect(&storage, &bucket, &key, &destination).await {
                Some(ack) => print_json(&ack)?,
                None => anyhow::bail!("Redirect marker for {} was not written", key),
            }
        }
        Commands::Url { key, imports } => {
            let bucket = bucket_for(&storage, imports);
            println!("{}", storage.public_url(&bucket, &key));
        }
        Commands::Cache { sub } => match sub {
            CacheCommands::Get { filename } => {
                let cache = ImportCache::new(storage.clone());
                match cache.get_cached_obj(&filename).await {
                    Some(descriptor) => print_json(&descriptor)?,
                    None => anyhow::bail!("No cached descriptor for {}", filename),
                }
            }
            CacheCommands::Remove { filename } => {
                let cache = ImportCache::new(storage.clone());
                cache.remove_from_cache(&filename).await;
                print_json(&serde_json::json!({ "filename": filename, "removed": true }))?;
            }
        },
    }

    Ok(())
}
