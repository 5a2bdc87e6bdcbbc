use crate::*;
use assert_cmd::prelude::*;
use gcs_facade::error::{Error, Result};
use gcs_facade::storage::StorageClient;
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_delete_removes_object,
        test_delete_missing_object_fails,
        test_delete_leaves_siblings
    ));

    tests.extend(async_trials!(
        client,
        e2e_test_rm_force_deletes,
        e2e_test_rm_without_confirmation_keeps_object,
        e2e_test_rm_missing_object_fails
    ));
}

async fn test_delete_removes_object(client: StorageClient) -> Result<()> {
    let object = TEST_FIXTURE.new_object_name();
    let op = verifier(&client).await;
    op.write(&object, b"bye".to_vec()).await?;

    client.delete_file(&object, None).await?;

    let err = op.stat(&object).await.unwrap_err();
    assert_eq!(err.kind(), opendal::ErrorKind::NotFound);
    Ok(())
}

async fn test_delete_missing_object_fails(client: StorageClient) -> Result<()> {
    let err = client
        .delete_file("no_such_object", None)
        .await
        .unwrap_err();

    match err {
        Error::OpenDal { source } => assert_eq!(source.kind(), opendal::ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

async fn test_delete_leaves_siblings(client: StorageClient) -> Result<()> {
    let dir = format!("{}/", uuid::Uuid::new_v4());
    let target = format!("{dir}a.txt");
    let sibling = format!("{dir}b.txt");
    let op = verifier(&client).await;
    op.write(&target, b"a".to_vec()).await?;
    op.write(&sibling, b"b".to_vec()).await?;

    client.delete_file(&target, None).await?;

    assert_eq!(op.read(&sibling).await?.to_vec(), b"b");
    Ok(())
}

async fn e2e_test_rm_force_deletes(client: StorageClient) -> Result<()> {
    let object = TEST_FIXTURE.new_object_name();
    let op = verifier(&client).await;
    op.write(&object, b"bye".to_vec()).await?;

    gcs_facade_cmd()
        .arg("rm")
        .arg(&object)
        .arg("-f")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted: {object}")));

    assert!(op.stat(&object).await.is_err());
    Ok(())
}

async fn e2e_test_rm_without_confirmation_keeps_object(client: StorageClient) -> Result<()> {
    let object = TEST_FIXTURE.new_object_name();
    let op = verifier(&client).await;
    op.write(&object, b"keep".to_vec()).await?;

    gcs_facade_cmd()
        .arg("rm")
        .arg(&object)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted"));

    assert_eq!(op.read(&object).await?.to_vec(), b"keep");
    Ok(())
}

async fn e2e_test_rm_missing_object_fails(_client: StorageClient) -> Result<()> {
    gcs_facade_cmd()
        .arg("rm")
        .arg("no_such_object")
        .arg("-f")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}
