use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::storage::constants::{DEFAULT_BUCKET, DEFAULT_FS_ROOT};
use crate::storage::{StorageConfig, StorageProvider};

/// Load storage configuration from environment variables
pub fn load_storage_config() -> Result<StorageConfig> {
    load_storage_config_from(|key| env::var(key).ok())
}

/// Load storage configuration from an arbitrary variable lookup.
pub fn load_storage_config_from<F>(lookup: F) -> Result<StorageConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let provider_str = lookup("STORAGE_PROVIDER").unwrap_or_else(|| "gcs".to_string());
    let provider = StorageProvider::from_str(&provider_str)?;

    let default_bucket = lookup("STORAGE_BUCKET")
        .or_else(|| lookup("GCS_BUCKET"))
        .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

    match provider {
        StorageProvider::Gcs => load_gcs_config(&lookup, default_bucket),
        StorageProvider::Fs => Ok(load_fs_config(&lookup, default_bucket)),
    }
}

/// Load GCS configuration; a credentials file is required.
fn load_gcs_config<F>(lookup: &F, default_bucket: String) -> Result<StorageConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let key_file = lookup("GCS_KEY_FILE")
        .or_else(|| lookup("GOOGLE_APPLICATION_CREDENTIALS"))
        .ok_or_else(|| Error::MissingEnvVar {
            key: "GCS_KEY_FILE or GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        })?;

    let mut config = StorageConfig::gcs(PathBuf::from(key_file), default_bucket);
    config.endpoint = lookup("STORAGE_ENDPOINT");
    Ok(config)
}

/// Load filesystem configuration (for local development and tests)
fn load_fs_config<F>(lookup: &F, default_bucket: String) -> StorageConfig
where
    F: Fn(&str) -> Option<String>,
{
    let root_path = lookup("STORAGE_ROOT_PATH").unwrap_or_else(|| DEFAULT_FS_ROOT.to_string());
    StorageConfig::fs(root_path, default_bucket)
}
