use crate::error::{BucketAlreadyExistsSnafu, InvalidBucketNameSnafu, Result};
use crate::storage::options::{Location, StorageClass};
use crate::storage::utils::path::{ensure_trailing_slash, is_single_segment};
use opendal::Operator;
use serde::{Deserialize, Serialize};
use snafu::ensure;

/// Bucket as reported by the backend after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketDescriptor {
    pub name: String,
    pub id: Option<String>,
    pub location: Option<String>,
    pub storage_class: Option<String>,
}

/// Trait for creating buckets.
pub trait BucketCreator {
    async fn create_bucket(
        &self,
        name: &str,
        location: &Location,
        storage_class: &StorageClass,
    ) -> Result<BucketDescriptor>;
}

/// Buckets as directories under the root of a local `fs` operator.
pub struct FsBucketCreator {
    operator: Operator,
}

impl FsBucketCreator {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl BucketCreator for FsBucketCreator {
    async fn create_bucket(
        &self,
        name: &str,
        location: &Location,
        storage_class: &StorageClass,
    ) -> Result<BucketDescriptor> {
        ensure!(is_single_segment(name), InvalidBucketNameSnafu { bucket: name });
        let dir = ensure_trailing_slash(name);
        match self.operator.stat(&dir).await {
            Ok(_) => return BucketAlreadyExistsSnafu { bucket: name }.fail(),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.operator.create_dir(&dir).await?;

        Ok(BucketDescriptor {
            name: name.to_string(),
            id: Some(name.to_string()),
            location: Some(location.to_string()),
            storage_class: Some(storage_class.to_string()),
        })
    }
}

#[cfg(feature = "gcs")]
pub use self::gcs::GcsBucketCreator;

#[cfg(feature = "gcs")]
mod gcs {
    use super::{BucketCreator, BucketDescriptor};
    use crate::error::{GcsSnafu, JsonSnafu, MissingProjectIdSnafu, Result};
    use crate::storage::options::{Location, StorageClass};
    use crate::storage::utils::gcs::connect;
    use google_cloud_storage::http::buckets::insert::{
        BucketCreationConfig, InsertBucketParam, InsertBucketRequest,
    };
    use snafu::{OptionExt, ResultExt};
    use std::path::PathBuf;

    /// Creates buckets through the Cloud Storage JSON API, in the project
    /// named by the service account credentials.
    pub struct GcsBucketCreator {
        credentials_path: PathBuf,
    }

    impl GcsBucketCreator {
        pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
            Self {
                credentials_path: credentials_path.into(),
            }
        }
    }

    impl BucketCreator for GcsBucketCreator {
        async fn create_bucket(
            &self,
            name: &str,
            location: &Location,
            storage_class: &StorageClass,
        ) -> Result<BucketDescriptor> {
            let (client, project) = connect(Some(&self.credentials_path)).await?;
            let project = project.context(MissingProjectIdSnafu {
                path: self.credentials_path.clone(),
            })?;

            let request = InsertBucketRequest {
                name: name.to_string(),
                param: InsertBucketParam {
                    project,
                    ..Default::default()
                },
                bucket: BucketCreationConfig {
                    location: location.to_string(),
                    storage_class: Some(storage_class.to_string()),
                    ..Default::default()
                },
            };
            let bucket = client.insert_bucket(&request).await.context(GcsSnafu)?;

            serde_json::to_value(&bucket)
                .and_then(serde_json::from_value)
                .context(JsonSnafu)
        }
    }
}
