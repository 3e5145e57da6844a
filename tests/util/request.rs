use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
};
use civicwatch::server::{model::app::AppState, router};
use serde_json::Value;
use tower::ServiceExt;

/// Build a JSON POST request, optionally carrying a bearer token
pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    with_token(Request::post(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request, optionally carrying a bearer token
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    with_token(Request::get(uri), token)
        .body(Body::empty())
        .unwrap()
}

fn with_token(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Route a single request through the full router and decode the JSON response body
pub async fn call(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router::routes()
        .with_state(state)
        .oneshot(request)
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
