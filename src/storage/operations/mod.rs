// Storage operation traits and implementations
pub mod bucket;
pub mod delete;
pub mod download;
pub mod sign;
pub mod stat;
pub mod upload;

// Re-export all operation traits
pub use bucket::BucketCreator;
pub use delete::Deleter;
pub use download::Downloader;
pub use sign::UrlSigner;
pub use stat::Stater;
pub use upload::Uploader;
