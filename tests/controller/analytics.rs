use chrono::NaiveDate;
use civicwatch::server::data::daily_analytics::DailyAnalyticsRepository;

use super::*;

/// Expected: 401 `unauthenticated` without a bearer token
#[tokio::test]
async fn dashboard_requires_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;

    let request = post_json("/api/analytics/dashboard", None, &json!({ "city": TEST_CITY }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthenticated");

    Ok(())
}

/// Expected: 401 for a token signed with another secret
#[tokio::test]
async fn dashboard_rejects_forged_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "sub": "admin", "role": "admin", "exp": 4_000_000_000u64 }),
        &jsonwebtoken::EncodingKey::from_secret(b"not-the-secret"),
    )
    .unwrap();

    let request = post_json("/api/analytics/dashboard", Some(&token), &json!({ "city": TEST_CITY }));
    let (status, _) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expected: 403 with the dashboard permission message for a citizen
#[tokio::test]
async fn dashboard_denies_citizen() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("u1", Some("citizen"))?;

    let request = post_json("/api/analytics/dashboard", Some(&token), &json!({ "city": TEST_CITY }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "permission-denied");
    assert_eq!(body["error"], "Only authorities can access analytics");

    Ok(())
}

/// Expected: 400 `invalid-argument` for a body that is not JSON
#[tokio::test]
async fn dashboard_rejects_malformed_body() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("officer", Some("authority"))?;

    let request = axum::http::Request::post("/api/analytics/dashboard")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{city"))
        .unwrap();
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");

    Ok(())
}

/// Expected: 400 when the city is missing
#[tokio::test]
async fn dashboard_requires_city() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("officer", Some("authority"))?;

    let request = post_json("/api/analytics/dashboard", Some(&token), &json!({}));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City is required");

    Ok(())
}

/// Tests dashboard counters for two recent issues, one resolved.
///
/// Expected: 200 with camelCase summary fields and the category histogram
#[tokio::test]
async fn dashboard_summarizes_recent_issues() -> Result<(), TestError> {
    let now = chrono::Utc::now().naive_utc();
    let test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .with_issue(factory::issue("u1"))
        .with_issue(factory::resolved_issue("u1", now - chrono::Duration::hours(5), 2))
        .build()
        .await?;
    let token = sign_token("officer", Some("authority"))?;

    let request = post_json(
        "/api/analytics/dashboard",
        Some(&token),
        &json!({ "city": TEST_CITY, "timeRange": "week" }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &body["summary"];
    assert_eq!(summary["totalIssues"], 2);
    assert_eq!(summary["resolvedIssues"], 1);
    assert_eq!(summary["pendingIssues"], 1);
    assert_eq!(summary["averageResolutionTime"], 2);
    assert_eq!(summary["totalUsers"], 1);
    assert_eq!(body["breakdowns"]["category"]["roads"], 2);
    assert!(body["timeRange"]["start"].is_string());

    Ok(())
}

/// Expected: 403 for an authority requesting performance metrics
#[tokio::test]
async fn performance_requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let token = sign_token("officer", Some("authority"))?;

    let request = post_json("/api/analytics/performance", Some(&token), &json!({ "city": TEST_CITY }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admins can access performance metrics");

    Ok(())
}

/// Expected: issues grouped per department with the unassigned bucket
#[tokio::test]
async fn performance_groups_by_department() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_civic_tables()
        .with_issue(entity::issue::Model {
            assigned_department: Some("public_works".to_string()),
            ..factory::issue("u1")
        })
        .with_issue(factory::issue("u2"))
        .build()
        .await?;
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json("/api/analytics/performance", Some(&token), &json!({ "city": TEST_CITY }));
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], TEST_CITY);
    assert_eq!(body["departmentMetrics"]["public_works"]["totalIssues"], 1);
    assert_eq!(body["departmentMetrics"]["unassigned"]["totalIssues"], 1);

    Ok(())
}

/// Tests CSV export of two stored snapshots.
///
/// Expected: `format` is `csv` and `data` holds a header line plus one line per snapshot
#[tokio::test]
async fn export_returns_csv_text() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let repo = DailyAnalyticsRepository::new(&test.db);
    for d in [10, 11] {
        let day = NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        repo.upsert(factory::daily_analytics(TEST_CITY, day)).await?;
    }
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json(
        "/api/analytics/export",
        Some(&token),
        &json!({
            "city": TEST_CITY,
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "format": "csv"
        }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["format"], "csv");
    let csv = body["data"].as_str().unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("id,city,date,"));

    Ok(())
}

/// Expected: JSON export is an array of snapshot records
#[tokio::test]
async fn export_defaults_to_json() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let day = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    DailyAnalyticsRepository::new(&test.db)
        .upsert(factory::daily_analytics(TEST_CITY, day))
        .await?;
    let token = sign_token("admin", Some("admin"))?;

    let request = post_json(
        "/api/analytics/export",
        Some(&token),
        &json!({ "city": TEST_CITY, "startDate": "2024-01-01", "endDate": "2024-01-31" }),
    );
    let (status, body) = call(test.into_app_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["format"], "json");
    assert_eq!(body["data"][0]["date"], "2024-01-10");
    assert_eq!(body["data"][0]["totalIssues"], 3);

    Ok(())
}
