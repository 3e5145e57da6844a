use std::sync::Arc;

use civicwatch::server::provider::recording::{RecordingAuthProvider, RecordingPushProvider};

use super::*;

/// Expected: the role changed on the profile and in the auth provider claims
#[tokio::test]
async fn role_update_by_admin() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .build()
        .await?;
    let auth = Arc::new(RecordingAuthProvider::new());
    let state = test.into_app_state_with(Arc::new(RecordingPushProvider::new()), auth.clone());
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json(
        "/api/users/role",
        Some(&token),
        &json!({ "userId": "u1", "newRole": "authority" }),
    );
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User role updated successfully");
    assert_eq!(test.user().get("u1").await?.unwrap().role, "authority");
    assert_eq!(auth.claims().await.len(), 1);

    Ok(())
}

/// Expected: 404 `not-found` for a user without a profile
#[tokio::test]
async fn role_update_for_missing_profile() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json(
        "/api/users/role",
        Some(&token),
        &json!({ "userId": "ghost", "newRole": "admin" }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not-found");
    assert_eq!(body["error"], "User profile not found");

    Ok(())
}

/// Expected: 200 with counts computed from the caller's issues
#[tokio::test]
async fn stats_for_caller() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .with_issue(factory::issue("u1"))
        .build()
        .await?;
    let token = sign_token("u1", Some("citizen"))?;

    let (status, body) = call(test.into_app_state(), get("/api/users/stats", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReports"], 1);
    assert_eq!(body["resolvedReports"], 0);
    assert_eq!(body["resolutionRate"], 0.0);
    assert_eq!(body["city"], TEST_CITY);

    Ok(())
}

/// Expected: 400 when the preferences object is absent
#[tokio::test]
async fn preferences_are_required() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .build()
        .await?;
    let token = sign_token("u1", None)?;

    let request = post_json("/api/users/preferences", Some(&token), &json!({}));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Preferences are required");

    Ok(())
}

/// Expected: the submitted preference set replaces the stored one
#[tokio::test]
async fn preferences_are_replaced() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .build()
        .await?;
    let token = sign_token("u1", None)?;

    let request = post_json(
        "/api/users/preferences",
        Some(&token),
        &json!({
            "preferences": {
                "language": "fr",
                "theme": "light",
                "notifications": {
                    "pushEnabled": true,
                    "emailEnabled": false,
                    "whatsappEnabled": false,
                    "alerts": false
                }
            }
        }),
    );
    let (status, _) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    let profile = test.user().get("u1").await?.unwrap();
    assert_eq!(profile.language, "fr");
    assert!(!profile.alerts_enabled);

    Ok(())
}
