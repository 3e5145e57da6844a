use super::*;

/// Expected: 200 with status `healthy` and the crate version, no token needed
#[tokio::test]
async fn reports_healthy() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let (status, body) = call(test.into_app_state(), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());

    Ok(())
}
