use std::sync::Arc;

use civicwatch::server::provider::recording::{RecordingAuthProvider, RecordingPushProvider};

use super::*;

/// Tests a bulk notification to citizens of the test city.
///
/// Expected: only the citizen's device is targeted and the delivery is counted
#[tokio::test]
async fn bulk_notification_reaches_audience() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::recipient("c1", "citizen"))
        .with_user(factory::recipient("a1", "authority"))
        .build()
        .await?;
    let push = Arc::new(RecordingPushProvider::new());
    let state = test.into_app_state_with(push.clone(), Arc::new(RecordingAuthProvider::new()));
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json(
        "/api/notifications/bulk",
        Some(&token),
        &json!({
            "title": "Road closure",
            "body": "Main Street closed tomorrow",
            "targetAudience": "citizens",
            "city": TEST_CITY
        }),
    );
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["sentCount"], 1);
    assert_eq!(body["totalTargeted"], 1);
    let calls = push.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tokens, vec!["token-c1".to_string()]);
    assert_eq!(test.notification_log().count().await?, 1);

    Ok(())
}

/// Expected: 400 when the title is missing
#[tokio::test]
async fn bulk_notification_requires_title() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json("/api/notifications/bulk", Some(&token), &json!({ "body": "b" }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and body are required");

    Ok(())
}

/// Tests an emergency alert sent by an authority.
///
/// Expected: the alert is stored and its id returned with the delivery count
#[tokio::test]
async fn emergency_alert_is_stored_and_sent() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::recipient("c1", "citizen"))
        .build()
        .await?;
    let push = Arc::new(RecordingPushProvider::new());
    let state = test.into_app_state_with(push.clone(), Arc::new(RecordingAuthProvider::new()));
    let token = sign_token("officer", Some("authority"))?;

    let request = post_json(
        "/api/notifications/emergency",
        Some(&token),
        &json!({ "title": "Flood", "message": "Move to higher ground", "city": TEST_CITY }),
    );
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentCount"], 1);
    let alert_id = body["alertId"].as_i64().unwrap() as i32;
    let alert = test.alert().get(alert_id).await?.unwrap();
    assert_eq!(alert.title, "Flood");
    assert!(alert.is_active);
    assert_eq!(
        push.calls().await[0].message.notification.title,
        "🚨 EMERGENCY: Flood"
    );

    Ok(())
}

/// Expected: 403 for a citizen sending an emergency alert
#[tokio::test]
async fn emergency_alert_denies_citizen() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("u1", Some("citizen"))?;

    let request = post_json(
        "/api/notifications/emergency",
        Some(&token),
        &json!({ "title": "Flood", "message": "m", "city": TEST_CITY }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only authorities can send emergency alerts");

    Ok(())
}

/// Expected: the device token stored on the caller's own profile
#[tokio::test]
async fn token_update_stores_device_token() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .build()
        .await?;
    let token = sign_token("u1", None)?;

    let request = post_json("/api/notifications/token", Some(&token), &json!({ "token": "device-9" }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FCM token updated successfully");
    let profile = test.user().get("u1").await?.unwrap();
    assert_eq!(profile.fcm_token.as_deref(), Some("device-9"));

    Ok(())
}
