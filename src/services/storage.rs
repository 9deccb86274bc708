//! Blob storage for release builds.
//!
//! [`BlobStore`] is the seam between the catalog and wherever build files
//! live. [`S3BlobStore`] talks to AWS S3 or MinIO; [`MemoryBlobStore`] keeps
//! objects in process for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{Config, StorageBackend, StorageSettings};
use crate::error::{AppError, AppResult};

/// Result of storing a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Key the blob was stored under
    pub key: String,
    /// Stored size in bytes
    pub size: i64,
}

/// Storage backend for uploaded build files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<StoredBlob>;

    /// Public URL for a key. Does not check that the object exists.
    fn public_url(&self, key: &str) -> String;

    /// Size in bytes of a stored object.
    async fn size(&self, key: &str) -> AppResult<i64>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Shared handle to the configured blob store.
pub type SharedBlobStore = Arc<dyn BlobStore>;

/// Build the blob store selected by configuration.
pub async fn build_blob_store(config: &Config) -> AppResult<SharedBlobStore> {
    match config.storage.backend {
        StorageBackend::S3 => Ok(Arc::new(S3BlobStore::new(&config.storage).await?)),
        StorageBackend::Memory => {
            info!("Using in-memory blob storage");
            Ok(Arc::new(MemoryBlobStore::new(
                config.storage.public_base_url(),
            )))
        }
    }
}

/// Get the content type for a build file based on its extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "exe" => "application/vnd.microsoft.portable-executable",
        "dmg" => "application/x-apple-diskimage",
        "zip" => "application/zip",
        "love" => "application/x-love-game",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn join_url(base: &str, key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", base.trim_end_matches('/'), encoded.join("/"))
}

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3BlobStore {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &StorageSettings) -> AppResult<Self> {
        let credentials = Credentials::new(
            &config.access_key,
            config.secret_key.expose_secret(),
            None,
            None,
            "gamecast",
        );

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        let storage = Self {
            client,
            bucket: config.bucket.clone(),
            public_base: config.public_base_url(),
        };

        storage.ensure_bucket_exists().await?;

        info!("S3 storage initialized: bucket={}", config.bucket);

        Ok(storage)
    }

    /// Ensure the bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", self.bucket);
                    self.client
                        .create_bucket()
                        .bucket(&self.bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        self.bucket, service_error
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<StoredBlob> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file to S3: {}", e)))?;

        debug!(key, size, "Stored blob");

        Ok(StoredBlob {
            key: key.to_string(),
            size,
        })
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base, key)
    }

    async fn size(&self, key: &str) -> AppResult<i64> {
        let response = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    AppError::NotFound(format!("Blob {}", key))
                } else {
                    AppError::Storage(format!("Failed to stat S3 object: {}", service_error))
                }
            })?;

        Ok(response.content_length().unwrap_or(0))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete S3 object: {}", e)))?;

        debug!(key, "Deleted blob");
        Ok(())
    }
}

/// In-process blob store.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create an empty store whose URLs start with `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::default(),
        }
    }

    /// Whether an object exists under `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: Option<&str>,
    ) -> AppResult<StoredBlob> {
        let size = data.len() as i64;
        self.objects.write().await.insert(key.to_string(), data);

        Ok(StoredBlob {
            key: key.to_string(),
            size,
        })
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }

    async fn size(&self, key: &str) -> AppResult<i64> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|data| data.len() as i64)
            .ok_or_else(|| AppError::NotFound(format!("Blob {}", key)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}
