use crate::error::Result;
use opendal::Operator;
use serde::Serialize;
use serde_json::Value;

/// Object metadata as reported by the backend.
///
/// Field names serialize in the service's camelCase form. Anything the
/// backend does not report is left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_link: Option<String>,
    pub name: String,
    pub bucket: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metageneration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_storage_class_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl ObjectMetadata {
    /// Read an object resource in the Cloud Storage JSON form.
    ///
    /// Numeric fields are accepted as numbers or decimal strings. `name` and
    /// `bucket` fall back to the given values when the resource omits them.
    pub fn from_resource(resource: &Value, bucket: &str, object: &str) -> Self {
        let field = |key: &str| match resource.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            kind: field("kind"),
            id: field("id"),
            self_link: field("selfLink"),
            media_link: field("mediaLink"),
            name: field("name").unwrap_or_else(|| object.to_string()),
            bucket: field("bucket").unwrap_or_else(|| bucket.to_string()),
            size: field("size").and_then(|s| s.parse().ok()).unwrap_or_default(),
            metageneration: field("metageneration"),
            storage_class: field("storageClass"),
            crc32c: field("crc32c"),
            time_created: field("timeCreated"),
            time_storage_class_updated: field("timeStorageClassUpdated"),
            content_type: field("contentType"),
            content_encoding: field("contentEncoding"),
            md5_hash: field("md5Hash"),
            etag: field("etag"),
            generation: field("generation"),
            updated: field("updated"),
        }
    }
}

/// Trait for fetching object metadata from storage.
pub trait Stater {
    /// Fetch metadata for a single object.
    ///
    /// # Arguments
    /// * `object` - Object name to query
    ///
    /// # Returns
    /// * `Result<ObjectMetadata>` - Collected metadata for the object
    async fn stat(&self, object: &str) -> Result<ObjectMetadata>;
}

/// Implementation of `Stater` for OpenDAL `Operator`.
#[derive(Clone)]
pub struct OpenDalStater {
    operator: Operator,
    bucket: String,
}

impl OpenDalStater {
    /// Create a new `OpenDalStater` for an operator bound to `bucket`.
    pub fn new(operator: Operator, bucket: impl Into<String>) -> Self {
        Self {
            operator,
            bucket: bucket.into(),
        }
    }
}

impl Stater for OpenDalStater {
    async fn stat(&self, object: &str) -> Result<ObjectMetadata> {
        let meta = self.operator.stat(object).await?;

        Ok(ObjectMetadata {
            name: object.to_string(),
            bucket: self.bucket.clone(),
            size: meta.content_length(),
            content_type: meta.content_type().map(|s| s.to_string()),
            content_encoding: meta.content_encoding().map(|s| s.to_string()),
            md5_hash: meta.content_md5().map(|s| s.to_string()),
            etag: meta.etag().map(|s| s.to_string()),
            generation: meta.version().map(|s| s.to_string()),
            updated: meta.last_modified().map(|t| t.to_string()),
            ..Default::default()
        })
    }
}

#[cfg(feature = "gcs")]
pub use self::gcs::GcsStater;

#[cfg(feature = "gcs")]
mod gcs {
    use super::{ObjectMetadata, Stater};
    use crate::error::{GcsSnafu, JsonSnafu, Result};
    use crate::storage::utils::gcs::connect;
    use google_cloud_storage::http::objects::get::GetObjectRequest;
    use snafu::ResultExt;
    use std::path::PathBuf;

    /// Fetches the full object resource through the Cloud Storage JSON API.
    pub struct GcsStater {
        credentials_path: Option<PathBuf>,
        bucket: String,
    }

    impl GcsStater {
        pub fn new(credentials_path: Option<PathBuf>, bucket: impl Into<String>) -> Self {
            Self {
                credentials_path,
                bucket: bucket.into(),
            }
        }
    }

    impl Stater for GcsStater {
        async fn stat(&self, object: &str) -> Result<ObjectMetadata> {
            let (client, _) = connect(self.credentials_path.as_deref()).await?;
            let request = GetObjectRequest {
                bucket: self.bucket.clone(),
                object: object.to_string(),
                ..Default::default()
            };
            let resource = client.get_object(&request).await.context(GcsSnafu)?;
            let value = serde_json::to_value(&resource).context(JsonSnafu)?;
            Ok(ObjectMetadata::from_resource(&value, &self.bucket, object))
        }
    }
}
