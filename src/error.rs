use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Unknown predefined ACL: {acl}"))]
    UnknownAcl { acl: String },

    #[snafu(display("Credentials file does not exist: {}", path.display()))]
    CredentialsNotFound { path: PathBuf },

    #[snafu(display("Path does not exist: {}", path.display()))]
    PathNotFound { path: PathBuf },

    #[snafu(display("Cannot derive an object name from local path: {}", path.display()))]
    InvalidLocalPath { path: PathBuf },

    #[snafu(display("Invalid bucket name: '{bucket}'"))]
    InvalidBucketName { bucket: String },

    #[snafu(display("Bucket already exists: {bucket}"))]
    BucketAlreadyExists { bucket: String },

    #[snafu(display("Signed URL version {version} is not supported"))]
    UnsupportedSignedUrlVersion { version: String },

    #[snafu(display("Signed URL expiry {expires} is not in the future"))]
    SignedUrlExpired { expires: String },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    #[cfg(feature = "gcs")]
    #[snafu(display("Creating a bucket requires a service account credentials file"))]
    MissingCredentials,

    #[cfg(feature = "gcs")]
    #[snafu(display("Credentials file {} has no project_id", path.display()))]
    MissingProjectId { path: PathBuf },

    #[cfg(feature = "gcs")]
    #[snafu(display("GCS authentication error: {source}"))]
    GcsAuth {
        source: google_cloud_storage::client::google_cloud_auth::error::Error,
    },

    #[cfg(feature = "gcs")]
    #[snafu(display("GCS error: {source}"))]
    Gcs {
        source: google_cloud_storage::http::Error,
    },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
