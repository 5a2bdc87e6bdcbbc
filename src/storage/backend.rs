use crate::error::{CredentialsNotFoundSnafu, InvalidBucketNameSnafu, Result};
use crate::storage::constants::DEFAULT_FS_ROOT;
use crate::storage::operations::bucket::{BucketDescriptor, FsBucketCreator};
use crate::storage::operations::delete::OpenDalDeleter;
use crate::storage::operations::download::OpenDalDownloader;
use crate::storage::operations::sign::{OpenDalSigner, SignedUrlOptions};
#[cfg(feature = "gcs")]
use crate::storage::operations::stat::GcsStater;
use crate::storage::operations::stat::{ObjectMetadata, OpenDalStater};
use crate::storage::operations::upload::{OpenDalUploader, UploadOptions};
use crate::storage::operations::{
    BucketCreator, Deleter, Downloader, Stater, UrlSigner, Uploader,
};
use crate::storage::options::{Location, PredefinedAcl, StorageClass};
use crate::storage::utils::path::{build_remote_path, ensure_trailing_slash, is_single_segment};
use crate::storage::{StorageConfig, StorageProvider};
use opendal::Operator;
#[cfg(feature = "gcs")]
use opendal::services::GcsConfig;
use snafu::{OptionExt, ensure};
use std::path::Path;

/// The calls a [`StorageClient`](crate::storage::StorageClient) delegates to.
///
/// Every method receives an already resolved bucket name. Errors are returned
/// to the caller of the client as they are. The returned futures carry no
/// `Send` bound; a client is driven from the task that owns it.
#[allow(async_fn_in_trait)]
pub trait StorageBackend {
    async fn create_bucket(
        &self,
        name: &str,
        location: &Location,
        storage_class: &StorageClass,
    ) -> Result<BucketDescriptor>;

    async fn signed_url(
        &self,
        bucket: &str,
        object: &str,
        options: &SignedUrlOptions,
    ) -> Result<String>;

    async fn upload(
        &self,
        bucket: &str,
        local_path: &Path,
        object: &str,
        options: &UploadOptions,
    ) -> Result<()>;

    async fn download(&self, bucket: &str, object: &str, local_path: &Path) -> Result<()>;

    async fn delete(&self, bucket: &str, object: &str) -> Result<()>;

    async fn metadata(&self, bucket: &str, object: &str) -> Result<ObjectMetadata>;
}

/// Backend built on OpenDAL operators, one per bucket and call.
#[derive(Debug, Clone)]
pub struct OpenDalBackend {
    config: StorageConfig,
}

impl OpenDalBackend {
    pub fn new(config: StorageConfig) -> Result<Self> {
        if let (StorageProvider::Gcs, Some(path)) = (config.provider, &config.credentials_path) {
            ensure!(path.is_file(), CredentialsNotFoundSnafu { path: path.clone() });
        }
        Ok(Self { config })
    }

    pub fn provider(&self) -> StorageProvider {
        self.config.provider
    }

    /// Operator bound to `bucket`.
    ///
    /// With the `fs` provider the bucket directory must already exist; a
    /// missing bucket fails with OpenDAL's `NotFound` and nothing is created.
    pub async fn operator(&self, bucket: &str) -> Result<Operator> {
        self.build_operator(bucket, None).await
    }

    fn fs_root(&self) -> &str {
        self.config.root_path.as_deref().unwrap_or(DEFAULT_FS_ROOT)
    }

    #[cfg(feature = "gcs")]
    fn gcs_config(&self, bucket: &str, acl: Option<PredefinedAcl>) -> GcsConfig {
        let mut config = GcsConfig::default();
        config.bucket = bucket.to_string();
        config.credential_path = self
            .config
            .credentials_path
            .as_ref()
            .map(|path| path.to_string_lossy().to_string());
        config.endpoint = self.config.endpoint.clone();
        config.predefined_acl = acl.map(|acl| acl.as_str().to_string());
        config
    }

    async fn build_operator(&self, bucket: &str, acl: Option<PredefinedAcl>) -> Result<Operator> {
        match self.config.provider {
            StorageProvider::Gcs => {
                #[cfg(feature = "gcs")]
                {
                    Ok(Operator::from_config(self.gcs_config(bucket, acl))?.finish())
                }

                #[cfg(not(feature = "gcs"))]
                {
                    let _ = (bucket, acl);
                    Err(crate::error::Error::UnsupportedProvider {
                        provider: "gcs (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::Fs => {
                #[cfg(feature = "fs")]
                {
                    ensure!(is_single_segment(bucket), InvalidBucketNameSnafu { bucket });
                    if let Some(acl) = acl {
                        log::debug!("fs provider ignores predefined ACL {acl}");
                    }
                    self.fs_root_operator()?
                        .stat(&ensure_trailing_slash(bucket))
                        .await?;

                    let root = build_remote_path(self.fs_root(), bucket);
                    let builder = opendal::services::Fs::default().root(&root);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "fs"))]
                {
                    let _ = (bucket, acl);
                    Err(crate::error::Error::UnsupportedProvider {
                        provider: "fs (feature disabled)".to_string(),
                    })
                }
            }
        }
    }

    #[cfg(feature = "fs")]
    fn fs_root_operator(&self) -> Result<Operator> {
        let builder = opendal::services::Fs::default().root(self.fs_root());
        Ok(Operator::new(builder)?.finish())
    }

    async fn create_bucket_inner(
        &self,
        name: &str,
        location: &Location,
        storage_class: &StorageClass,
    ) -> Result<BucketDescriptor> {
        match self.config.provider {
            StorageProvider::Gcs => {
                #[cfg(feature = "gcs")]
                {
                    let path = self
                        .config
                        .credentials_path
                        .clone()
                        .context(crate::error::MissingCredentialsSnafu)?;
                    crate::storage::operations::bucket::GcsBucketCreator::new(path)
                        .create_bucket(name, location, storage_class)
                        .await
                }

                #[cfg(not(feature = "gcs"))]
                {
                    let _ = (name, location, storage_class);
                    Err(crate::error::Error::UnsupportedProvider {
                        provider: "gcs (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::Fs => {
                #[cfg(feature = "fs")]
                {
                    FsBucketCreator::new(self.fs_root_operator()?)
                        .create_bucket(name, location, storage_class)
                        .await
                }

                #[cfg(not(feature = "fs"))]
                {
                    let _ = (name, location, storage_class);
                    Err(crate::error::Error::UnsupportedProvider {
                        provider: "fs (feature disabled)".to_string(),
                    })
                }
            }
        }
    }
}

impl StorageBackend for OpenDalBackend {
    async fn create_bucket(
        &self,
        name: &str,
        location: &Location,
        storage_class: &StorageClass,
    ) -> Result<BucketDescriptor> {
        self.create_bucket_inner(name, location, storage_class).await
    }

    async fn signed_url(
        &self,
        bucket: &str,
        object: &str,
        options: &SignedUrlOptions,
    ) -> Result<String> {
        let signer = OpenDalSigner::new(self.operator(bucket).await?);
        signer.sign(object, options).await
    }

    async fn upload(
        &self,
        bucket: &str,
        local_path: &Path,
        object: &str,
        options: &UploadOptions,
    ) -> Result<()> {
        let operator = self.build_operator(bucket, options.predefined_acl).await?;
        let uploader = OpenDalUploader::new(operator);
        uploader
            .upload(local_path, object, options.content_type.as_deref())
            .await
    }

    async fn download(&self, bucket: &str, object: &str, local_path: &Path) -> Result<()> {
        let downloader = OpenDalDownloader::new(self.operator(bucket).await?);
        downloader.download(object, local_path).await
    }

    async fn delete(&self, bucket: &str, object: &str) -> Result<()> {
        let deleter = OpenDalDeleter::new(self.operator(bucket).await?);
        deleter.delete(object).await
    }

    async fn metadata(&self, bucket: &str, object: &str) -> Result<ObjectMetadata> {
        // OpenDAL's stat drops most of the GCS object resource.
        #[cfg(feature = "gcs")]
        if self.config.provider == StorageProvider::Gcs {
            let stater = GcsStater::new(self.config.credentials_path.clone(), bucket);
            return stater.stat(object).await;
        }

        let stater = OpenDalStater::new(self.operator(bucket).await?, bucket);
        stater.stat(object).await
    }
}
