use crate::*;
use assert_cmd::prelude::*;
use gcs_facade::error::{Error, Result};
use gcs_facade::storage::StorageClient;
use predicates::prelude::*;
use tokio::fs;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_download_writes_object_to_disk,
        test_download_overwrites_existing_file,
        test_download_missing_object,
        test_download_into_missing_directory
    ));

    tests.extend(async_trials!(client, e2e_test_get_downloads_object));
}

async fn test_download_writes_object_to_disk(client: StorageClient) -> Result<()> {
    let (local_path, content) = TEST_FIXTURE.new_local_file().await?;
    let object = local_path.file_name().unwrap().to_string_lossy().to_string();
    client.upload_file(&local_path, None, None).await?;

    let dest = TEST_FIXTURE.new_local_path();
    client.download_file(&object, &dest, None).await?;

    assert_eq!(fs::read(&dest).await?, content);
    Ok(())
}

async fn test_download_overwrites_existing_file(client: StorageClient) -> Result<()> {
    let (dest, _) = TEST_FIXTURE.new_local_file().await?;
    let object = TEST_FIXTURE.new_object_name();
    verifier(&client).await.write(&object, b"fresh".to_vec()).await?;

    client.download_file(&object, &dest, None).await?;

    assert_eq!(fs::read(&dest).await?, b"fresh");
    Ok(())
}

async fn test_download_missing_object(client: StorageClient) -> Result<()> {
    let dest = TEST_FIXTURE.new_local_path();

    let err = client
        .download_file("no_such_object", &dest, None)
        .await
        .unwrap_err();

    match err {
        Error::OpenDal { source } => assert_eq!(source.kind(), opendal::ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dest.exists());
    Ok(())
}

async fn test_download_into_missing_directory(client: StorageClient) -> Result<()> {
    let object = TEST_FIXTURE.new_object_name();
    verifier(&client).await.write(&object, b"data".to_vec()).await?;
    let dest = TEST_FIXTURE.new_local_path().join("nested").join("out.bin");

    let err = client.download_file(&object, &dest, None).await.unwrap_err();

    assert!(matches!(err, Error::Io { .. }), "unexpected error: {err}");
    Ok(())
}

async fn e2e_test_get_downloads_object(client: StorageClient) -> Result<()> {
    let object = TEST_FIXTURE.new_object_name();
    verifier(&client).await.write(&object, b"hello".to_vec()).await?;
    let dest = TEST_FIXTURE.new_local_path();

    gcs_facade_cmd()
        .arg("get")
        .arg(&object)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded"));

    assert_eq!(fs::read(&dest).await?, b"hello");
    Ok(())
}
