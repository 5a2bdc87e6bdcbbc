//! A thin Google Cloud Storage client.
//!
//! [`storage::StorageClient`] fills in a default bucket and default options,
//! then forwards each call to a [`storage::StorageBackend`]. The production
//! backend is built on OpenDAL; tests can substitute their own.

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;
