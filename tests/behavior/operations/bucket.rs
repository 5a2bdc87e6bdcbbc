use crate::*;
use assert_cmd::prelude::*;
use gcs_facade::error::{Error, Result};
use gcs_facade::storage::{Location, StorageClass, StorageClient};
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_create_bucket_with_defaults,
        test_create_bucket_with_options,
        test_create_existing_bucket_fails,
        test_missing_bucket_is_not_created_by_object_calls,
        test_create_bucket_rejects_path_names
    ));

    tests.extend(async_trials!(client, e2e_test_mb_creates_bucket));
}

fn new_bucket_name() -> String {
    format!("bucket-{}", uuid::Uuid::new_v4())
}

async fn test_create_bucket_with_defaults(client: StorageClient) -> Result<()> {
    let name = new_bucket_name();

    let bucket = client.create_bucket(&name, None, None).await?;

    assert_eq!(bucket.name, name);
    assert_eq!(bucket.location.as_deref(), Some("US"));
    assert_eq!(bucket.storage_class.as_deref(), Some("COLDLINE"));
    assert!(storage_root().join(&name).is_dir());
    Ok(())
}

async fn test_create_bucket_with_options(client: StorageClient) -> Result<()> {
    let name = new_bucket_name();

    let bucket = client
        .create_bucket(&name, Some(Location::Eu), Some(StorageClass::Archive))
        .await?;

    assert_eq!(bucket.location.as_deref(), Some("EU"));
    assert_eq!(bucket.storage_class.as_deref(), Some("ARCHIVE"));
    Ok(())
}

async fn test_create_existing_bucket_fails(client: StorageClient) -> Result<()> {
    let err = client
        .create_bucket(TEST_BUCKET, None, None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::BucketAlreadyExists { ref bucket } if bucket == TEST_BUCKET),
        "unexpected error: {err}"
    );
    Ok(())
}

fn assert_not_found(result: Result<impl std::fmt::Debug>) {
    match result {
        Err(Error::OpenDal { source }) => {
            assert_eq!(source.kind(), opendal::ErrorKind::NotFound)
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

async fn test_missing_bucket_is_not_created_by_object_calls(client: StorageClient) -> Result<()> {
    let name = new_bucket_name();
    let (local_path, _) = TEST_FIXTURE.new_local_file().await?;

    assert_not_found(client.metadata("image.jpg", Some(&name)).await);
    assert_not_found(
        client
            .download_file("image.jpg", TEST_FIXTURE.new_local_path(), Some(&name))
            .await,
    );
    assert_not_found(client.delete_file("image.jpg", Some(&name)).await);
    assert_not_found(client.upload_file(&local_path, None, Some(&name)).await);
    assert!(!storage_root().join(&name).exists());

    let bucket = client.create_bucket(&name, None, None).await?;
    assert_eq!(bucket.name, name);
    Ok(())
}

async fn test_create_bucket_rejects_path_names(client: StorageClient) -> Result<()> {
    let escaped = format!("../{}", new_bucket_name());
    for name in ["", escaped.as_str(), "nested/bucket"] {
        let err = client.create_bucket(name, None, None).await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidBucketName { ref bucket } if bucket == name),
            "unexpected error for {name:?}: {err}"
        );
    }
    assert!(!storage_root().join(&escaped).exists());
    assert!(!storage_root().join("nested").exists());

    let err = client
        .metadata("image.jpg", Some(&escaped))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBucketName { .. }), "unexpected error: {err}");
    Ok(())
}

async fn e2e_test_mb_creates_bucket(_client: StorageClient) -> Result<()> {
    let name = new_bucket_name();

    gcs_facade_cmd()
        .arg("mb")
        .arg(&name)
        .arg("--location")
        .arg("ASIA")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Created bucket: {name}")));

    assert!(storage_root().join(&name).is_dir());
    Ok(())
}
