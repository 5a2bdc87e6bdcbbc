use crate::error::Result;
use opendal::Operator;
use std::path::Path;
use tokio::fs;

/// Trait for downloading objects from storage.
pub trait Downloader {
    /// Download a single object to a local file.
    ///
    /// # Arguments
    /// * `object` - Source object name
    /// * `local_path` - Destination path on local filesystem, e.g. `./file.txt`
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn download(&self, object: &str, local_path: &Path) -> Result<()>;
}

/// Implementation of Downloader for OpenDAL Operator.
pub struct OpenDalDownloader {
    operator: Operator,
}

impl OpenDalDownloader {
    /// Create a new downloader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Downloader for OpenDalDownloader {
    async fn download(&self, object: &str, local_path: &Path) -> Result<()> {
        let data = self.operator.read(object).await?;
        fs::write(local_path, data.to_vec()).await?;
        log::debug!("downloaded {object} -> {}", local_path.display());
        Ok(())
    }
}
