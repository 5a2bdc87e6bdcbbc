use assert_cmd::prelude::*;
use gcs_facade::error::{Error, Result};
use gcs_facade::storage::{StorageClient, StorageConfig};
use libtest_mimic::{Failed, Trial};
use opendal::Operator;
use rand::Rng;
use rand::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use uuid::Uuid;

pub const TEST_BUCKET: &str = "test-bucket";

pub static TEST_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

/// Scratch directory for one run; the fs backend root and local files live below it.
pub static TEST_DIR: LazyLock<PathBuf> =
    LazyLock::new(|| std::env::temp_dir().join(format!("gcs-facade-{}", Uuid::new_v4())));

pub fn storage_root() -> PathBuf {
    TEST_DIR.join("storage")
}

pub fn local_dir() -> PathBuf {
    TEST_DIR.join("local")
}

fn test_config() -> StorageConfig {
    StorageConfig::fs(storage_root().to_string_lossy().to_string(), TEST_BUCKET)
}

pub async fn init_test_service() -> Result<StorageClient> {
    tokio::fs::create_dir_all(local_dir()).await?;
    let client = StorageClient::new(test_config()).await?;

    ensure_bucket_exists(&client, TEST_BUCKET).await?;

    Ok(client)
}

/// Create the bucket for tests. Ignores 'already exists' errors.
pub async fn ensure_bucket_exists(client: &StorageClient, bucket: &str) -> Result<()> {
    match client.create_bucket(bucket, None, None).await {
        Ok(_) | Err(Error::BucketAlreadyExists { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Operator on the default test bucket, used to verify results independently of the client.
pub async fn verifier(client: &StorageClient) -> Operator {
    client
        .backend()
        .operator(TEST_BUCKET)
        .await
        .expect("failed to build verifier operator")
}

pub struct Fixture;

impl Fixture {
    pub const fn new() -> Self {
        Self
    }

    pub fn new_object_name(&self) -> String {
        format!("{}.bin", Uuid::new_v4())
    }

    pub fn new_local_path(&self) -> PathBuf {
        local_dir().join(Uuid::new_v4().to_string())
    }

    /// Write a local file of random content and size.
    pub async fn new_local_file(&self) -> Result<(PathBuf, Vec<u8>)> {
        self.new_local_file_with_range(Uuid::new_v4().to_string(), 1..256 * 1024)
            .await
    }

    pub async fn new_local_file_with_range(
        &self,
        name: impl AsRef<Path>,
        range: std::ops::Range<usize>,
    ) -> Result<(PathBuf, Vec<u8>)> {
        let path = local_dir().join(name);

        let content = {
            let mut rng = rand::rng();
            let size = rng.random_range(range);
            let mut content = vec![0; size];
            rng.fill_bytes(&mut content);
            content
        };

        tokio::fs::write(&path, &content).await?;
        Ok((path, content))
    }

    pub fn cleanup(&self) {
        let _ = std::fs::remove_dir_all(TEST_DIR.as_path());
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_async_trial<F, Fut>(name: &str, client: &StorageClient, f: F) -> Trial
where
    F: FnOnce(StorageClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>>,
{
    let handle = TEST_RUNTIME.handle().clone();
    let client = client.clone();

    Trial::test(format!("behavior::{name}"), move || {
        handle
            .block_on(f(client))
            .map_err(|err| Failed::from(err.to_string()))
    })
}

#[macro_export]
macro_rules! async_trials {
    ($client:ident, $($test:ident),*) => {
        vec![$(build_async_trial(stringify!($test), $client, $test),)*]
    };
}

pub static TEST_FIXTURE: Fixture = Fixture::new();

/// A `gcs-facade` command with a clean environment pointed at the test root.
pub fn gcs_facade_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gcs-facade").unwrap();
    cmd.env_clear()
        .env("RUST_LOG", "info")
        .env("STORAGE_PROVIDER", "fs")
        .env("STORAGE_ROOT_PATH", storage_root())
        .env("STORAGE_BUCKET", TEST_BUCKET);
    cmd
}
