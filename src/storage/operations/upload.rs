use crate::error::{InvalidLocalPathSnafu, PathNotFoundSnafu, Result};
use crate::storage::constants::DEFAULT_CHUNK_SIZE;
use crate::storage::options::PredefinedAcl;
use crate::storage::utils::path::basename;
use opendal::Operator;
use snafu::{OptionExt, ensure};
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// Options accepted by an upload.
///
/// - `destination`: Object name in the bucket. Takes precedence over the
///   base name of the local file.
/// - `content_type`: MIME type stored with the object, if any.
/// - `predefined_acl`: Access control preset for the new object. When absent
///   the bucket's default object ACL applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub destination: Option<String>,
    pub content_type: Option<String>,
    pub predefined_acl: Option<PredefinedAcl>,
}

impl UploadOptions {
    pub fn with_destination(destination: impl Into<String>) -> Self {
        Self {
            destination: Some(destination.into()),
            ..Self::default()
        }
    }

    /// Object name an upload of `local_path` is stored under.
    pub fn resolve_object_name(&self, local_path: &Path) -> Result<String> {
        if let Some(destination) = &self.destination {
            return Ok(destination.clone());
        }
        basename(local_path).context(InvalidLocalPathSnafu {
            path: local_path.to_path_buf(),
        })
    }
}

/// Trait for uploading local files to storage.
pub trait Uploader {
    /// Upload a single local file.
    ///
    /// # Arguments
    /// * `local_path` - Source file on local filesystem
    /// * `object` - Destination object name
    /// * `content_type` - MIME type to store, if known
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn upload(&self, local_path: &Path, object: &str, content_type: Option<&str>)
    -> Result<()>;
}

/// Implementation of Uploader for OpenDAL Operator.
pub struct OpenDalUploader {
    operator: Operator,
}

impl OpenDalUploader {
    /// Create a new uploader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Uploader for OpenDalUploader {
    async fn upload(
        &self,
        local_path: &Path,
        object: &str,
        content_type: Option<&str>,
    ) -> Result<()> {
        ensure!(
            local_path.is_file(),
            PathNotFoundSnafu {
                path: local_path.to_path_buf()
            }
        );

        let file = fs::File::open(local_path).await?;
        let mut reader = BufReader::new(file);
        let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];
        let mut total_bytes = 0u64;

        let mut pending = self.operator.writer_with(object);
        if let Some(content_type) = content_type {
            pending = pending.content_type(content_type);
        }
        let mut writer = pending.await?;

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write(buffer[..bytes_read].to_vec()).await?;
            total_bytes += bytes_read as u64;
        }
        writer.close().await?;

        log::debug!(
            "uploaded {} -> {object} ({total_bytes} bytes)",
            local_path.display()
        );
        Ok(())
    }
}
