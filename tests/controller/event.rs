use axum::{body::Body, http::Request};
use civicwatch::server::controller::util::event_source::EVENT_SECRET_HEADER;

use super::*;

fn event(uri: &str, secret: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let builder = Request::post(uri).header("content-type", "application/json");
    let builder = match secret {
        Some(secret) => builder.header(EVENT_SECRET_HEADER, secret),
        None => builder,
    };
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Expected: a default citizen profile exists after the account-created event
#[tokio::test]
async fn user_created_provisions_profile() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_civic_tables().build().await?;

    let request = event(
        "/api/events/auth/user-created",
        Some(TEST_EVENT_SECRET),
        json!({ "uid": "u1", "email": "u1@example.com", "displayName": "Jane" }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let profile = test.user().get("u1").await?.unwrap();
    assert_eq!(profile.role, "citizen");
    assert_eq!(profile.language, "en");

    Ok(())
}

/// Expected: 401 and no profile when the event secret is wrong
#[tokio::test]
async fn user_created_rejects_wrong_secret() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_civic_tables().build().await?;

    let request = event(
        "/api/events/auth/user-created",
        Some("guess"),
        json!({ "uid": "u1" }),
    );
    let (status, _) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(test.user().get("u1").await?.is_none());

    Ok(())
}

/// Expected: the event is acknowledged even when the profile already exists
#[tokio::test]
async fn user_created_acknowledges_failure() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .build()
        .await?;

    let request = event(
        "/api/events/auth/user-created",
        Some(TEST_EVENT_SECRET),
        json!({ "uid": "u1" }),
    );
    let (status, _) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);

    Ok(())
}

/// Tests the account-deleted event for a reporter of two issues.
///
/// Expected: profile removed and both issues credited to `deleted_user`
#[tokio::test]
async fn user_deleted_anonymizes_issues() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .with_issue(factory::issue("u1"))
        .with_issue(factory::issue("u1"))
        .build()
        .await?;

    let request = event(
        "/api/events/auth/user-deleted",
        Some(TEST_EVENT_SECRET),
        json!({ "uid": "u1" }),
    );
    let (status, _) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(test.user().get("u1").await?.is_none());
    assert_eq!(test.issue().by_reporter("deleted_user").await?.len(), 2);
    assert!(test.issue().by_reporter("u1").await?.is_empty());

    Ok(())
}
