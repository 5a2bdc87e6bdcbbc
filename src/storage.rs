use crate::error::{Error, Result};
use chrono::{TimeDelta, Utc};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod backend;
pub mod constants;
pub(crate) mod operations;
pub mod options;
mod utils;

pub use self::backend::{OpenDalBackend, StorageBackend};
pub use self::operations::bucket::BucketDescriptor;
pub use self::operations::sign::{SignedUrlAction, SignedUrlOptions, SignedUrlVersion};
pub use self::operations::stat::ObjectMetadata;
pub use self::operations::upload::UploadOptions;
pub use self::options::{Location, PredefinedAcl, StorageClass};
pub use self::utils::OutputFormat;
pub use self::utils::size::format_size;

use self::constants::{DEFAULT_BUCKET, DEFAULT_SIGNED_URL_EXPIRES_MINUTES, PUBLIC_URL_BASE};

/// Storage provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Gcs,
    Fs,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gcs" => Ok(Self::Gcs),
            "fs" => Ok(Self::Fs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Storage configuration shared by every call of a client.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub default_bucket: String,
    pub credentials_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub root_path: Option<String>,
}

impl StorageConfig {
    pub fn gcs(credentials_path: impl Into<PathBuf>, default_bucket: impl Into<String>) -> Self {
        Self {
            provider: StorageProvider::Gcs,
            default_bucket: default_bucket.into(),
            credentials_path: Some(credentials_path.into()),
            endpoint: None,
            root_path: None,
        }
    }

    /// Local directory standing in for the service. Buckets are its subdirectories.
    pub fn fs(root_path: impl Into<String>, default_bucket: impl Into<String>) -> Self {
        Self {
            provider: StorageProvider::Fs,
            default_bucket: default_bucket.into(),
            credentials_path: None,
            endpoint: None,
            root_path: Some(root_path.into()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Gcs,
            default_bucket: DEFAULT_BUCKET.to_string(),
            credentials_path: None,
            endpoint: None,
            root_path: None,
        }
    }
}

/// Public URL of an object. The object must be publicly readable for it to resolve.
pub fn public_url(bucket: &str, object: &str) -> String {
    format!("{PUBLIC_URL_BASE}/{bucket}/{object}")
}

/// Cloud Storage client that fills in defaults and forwards to a backend.
///
/// Every method taking `bucket: Option<&str>` falls back to the configured
/// default bucket. Backend errors are returned untouched.
#[derive(Debug, Clone)]
pub struct StorageClient<B = OpenDalBackend> {
    backend: B,
    default_bucket: String,
}

impl StorageClient<OpenDalBackend> {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let default_bucket = config.default_bucket.clone();
        let backend = OpenDalBackend::new(config)?;
        Ok(Self::with_backend(backend, default_bucket))
    }
}

impl<B: StorageBackend> StorageClient<B> {
    pub fn with_backend(backend: B, default_bucket: impl Into<String>) -> Self {
        Self {
            backend,
            default_bucket: default_bucket.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn default_bucket(&self) -> &str {
        &self.default_bucket
    }

    fn bucket<'a>(&'a self, bucket: Option<&'a str>) -> &'a str {
        bucket.unwrap_or(&self.default_bucket)
    }

    /// Create a bucket, in `US` with the `COLDLINE` class unless told otherwise.
    pub async fn create_bucket(
        &self,
        name: &str,
        location: Option<Location>,
        storage_class: Option<StorageClass>,
    ) -> Result<BucketDescriptor> {
        let location = location.unwrap_or_default();
        let storage_class = storage_class.unwrap_or_default();
        log::debug!("create_bucket name={name} location={location} storage_class={storage_class}");
        self.backend
            .create_bucket(name, &location, &storage_class)
            .await
    }

    pub fn public_url(&self, file_name: &str, bucket: Option<&str>) -> String {
        public_url(self.bucket(bucket), file_name)
    }

    /// Signed V4 read URL valid for `expires_minutes` (15 by default) from now.
    pub async fn signed_url(
        &self,
        file_name: &str,
        bucket: Option<&str>,
        expires_minutes: Option<u32>,
    ) -> Result<String> {
        self.signed_url_for(file_name, bucket, expires_minutes, SignedUrlAction::Read)
            .await
    }

    /// Like [`signed_url`](Self::signed_url), for the given `action`.
    pub async fn signed_url_for(
        &self,
        file_name: &str,
        bucket: Option<&str>,
        expires_minutes: Option<u32>,
        action: SignedUrlAction,
    ) -> Result<String> {
        let bucket = self.bucket(bucket);
        let minutes = expires_minutes.unwrap_or(DEFAULT_SIGNED_URL_EXPIRES_MINUTES);
        let options = SignedUrlOptions {
            version: SignedUrlVersion::V4,
            action,
            expires: Utc::now() + TimeDelta::minutes(i64::from(minutes)),
        };
        log::debug!(
            "signed_url bucket={bucket} file_name={file_name} action={action} expires={}",
            options.expires
        );
        self.backend.signed_url(bucket, file_name, &options).await
    }

    /// Upload a local file and return its public URL.
    ///
    /// The object is named after `options.destination` when set, otherwise
    /// after the base name of `local_path`. No ACL is applied unless
    /// `options.predefined_acl` asks for one, so the returned URL is only
    /// reachable when the bucket or object is publicly readable.
    pub async fn upload_file(
        &self,
        local_path: impl AsRef<Path>,
        options: Option<&UploadOptions>,
        bucket: Option<&str>,
    ) -> Result<String> {
        let local_path = local_path.as_ref();
        let bucket = self.bucket(bucket);
        let defaults = UploadOptions::default();
        let options = options.unwrap_or(&defaults);
        log::info!(
            "upload_file local_path={} options={options:?}",
            local_path.display()
        );

        let object = options.resolve_object_name(local_path)?;
        self.backend
            .upload(bucket, local_path, &object, options)
            .await?;
        Ok(public_url(bucket, &object))
    }

    pub async fn download_file(
        &self,
        file_name: &str,
        dest_path: impl AsRef<Path>,
        bucket: Option<&str>,
    ) -> Result<()> {
        let dest_path = dest_path.as_ref();
        let bucket = self.bucket(bucket);
        log::debug!(
            "download_file bucket={bucket} file_name={file_name} dest_path={}",
            dest_path.display()
        );
        self.backend.download(bucket, file_name, dest_path).await
    }

    pub async fn delete_file(&self, file_name: &str, bucket: Option<&str>) -> Result<()> {
        let bucket = self.bucket(bucket);
        log::debug!("delete_file bucket={bucket} file_name={file_name}");
        self.backend.delete(bucket, file_name).await
    }

    pub async fn metadata(&self, file_name: &str, bucket: Option<&str>) -> Result<ObjectMetadata> {
        let bucket = self.bucket(bucket);
        log::debug!("metadata bucket={bucket} file_name={file_name}");
        self.backend.metadata(bucket, file_name).await
    }
}
