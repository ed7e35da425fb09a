use std::path::Path;

use anyhow::Result;
use fcm_batch::{
    FileStore, LocalFileStore,
    models::fcm::{FcmRequest, Payload},
    utils::{closing_boundary, subrequest_part, write_batch_body},
};
use tempfile::tempdir;

fn android_payloads(count: usize) -> Vec<Payload> {
    (0..count)
        .map(|i| {
            Payload::Message(FcmRequest::android(
                &format!("token-{}", i),
                &format!("Title {}", i),
                "Body",
                None,
                "default",
            ))
        })
        .collect()
}

/// Test: A sub-request carries the fixed embedded HTTP headers before the JSON
#[tokio::test]
async fn test_subrequest_part_layout() -> Result<()> {
    let part = subrequest_part("demo-project", r#"{"message":{}}"#);

    let expected = "--subrequest_boundary\n\
                    Content-Type: application/http\n\
                    Content-Transfer-Encoding: binary\n\
                    \n\
                    POST /v1/projects/demo-project/messages:send\n\
                    Content-Type: application/json\n\
                    accept: application/json\n\
                    \n\
                    {\"message\":{}}\n";

    assert_eq!(part, expected);
    assert_eq!(closing_boundary(), "--subrequest_boundary--");

    Ok(())
}

/// Test: The body holds one part per payload and ends with the closing boundary
#[tokio::test]
async fn test_body_part_count_matches_payload_count() -> Result<()> {
    let dir = tempdir()?;
    let store = LocalFileStore::new(dir.path());

    for count in [0usize, 1, 7, 500] {
        let path = Path::new("firebase").join(format!("count_{}.txt", count));

        write_batch_body(&store, &path, "demo-project", &android_payloads(count)).await?;
        let body = store.read_all(&path).await?;

        let parts = body
            .matches("--subrequest_boundary\nContent-Type: application/http")
            .count();
        assert_eq!(parts, count, "Unexpected part count for {} payloads", count);

        assert_eq!(body.matches("--subrequest_boundary").count(), count + 1);
        assert!(body.trim_end().ends_with("--subrequest_boundary--"));
    }

    Ok(())
}

/// Test: Parts appear in the same order as the payloads
#[tokio::test]
async fn test_body_preserves_payload_order() -> Result<()> {
    let dir = tempdir()?;
    let store = LocalFileStore::new(dir.path());
    let path = Path::new("firebase/ordered.txt");

    write_batch_body(&store, path, "demo-project", &android_payloads(3)).await?;
    let body = store.read_all(path).await?;

    let positions = (0..3)
        .map(|i| body.find(&format!("\"token\":\"token-{}\"", i)))
        .collect::<Option<Vec<_>>>()
        .expect("every token should be present in the body");

    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    Ok(())
}

/// Test: Local store creates folders on append and tolerates double deletes
#[tokio::test]
async fn test_local_file_store_lifecycle() -> Result<()> {
    let dir = tempdir()?;
    let store = LocalFileStore::new(dir.path());
    let path = Path::new("nested/folder/batch.txt");

    store.append(path, "first").await?;
    store.append(path, "second").await?;

    assert_eq!(store.read_all(path).await?, "first\nsecond\n");
    assert!(dir.path().join(path).exists());

    store.delete(path).await?;
    assert!(!dir.path().join(path).exists());

    store.delete(path).await?;
    assert!(store.read_all(path).await.is_err());

    Ok(())
}
