//! Push delivery over the FCM HTTP v1 API.
//!
//! The v1 API addresses one token per request, so a multicast issues one request per token
//! concurrently and collects the results in token order. A request that fails in transport
//! only fails its own token; the batch fails only when the credentials are rejected.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::server::{
    error::provider::ProviderError,
    provider::{MulticastMessage, PushMessage, PushProvider, BatchResponse, SendFailure, SendResponse},
};

const UNREGISTERED: &str = "UNREGISTERED";

pub struct FcmPushProvider {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Deserialize)]
struct FcmErrorBody {
    error: FcmError,
}

#[derive(Deserialize)]
struct FcmError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<FcmErrorDetail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FcmErrorDetail {
    error_code: Option<String>,
}

impl FcmPushProvider {
    /// Creates a client posting to `{api_url}/v1/projects/{project_id}/messages:send`.
    pub fn new(client: reqwest::Client, api_url: &str, project_id: &str, access_token: String) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/v1/projects/{}/messages:send",
                api_url.trim_end_matches('/'),
                project_id
            ),
            access_token,
        }
    }

    async fn send_one(&self, token: &str, message: &PushMessage) -> Result<SendResponse, ProviderError> {
        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&json!({ "message": message_body(token, message) }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("Push request failed in transport: {}", err);
                return Ok(SendResponse::Failure(SendFailure::Other(err.to_string())));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(SendResponse::Success);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(status = status.as_u16(), "Failed to read push error body: {}", err);
                String::new()
            }
        };
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ProviderError::PushRejected {
                status: status.as_u16(),
                message: text,
            });
        }

        let error = serde_json::from_str::<FcmErrorBody>(&text).ok().map(|body| body.error);
        let unregistered = status == StatusCode::NOT_FOUND
            || error.as_ref().is_some_and(|e| {
                e.details
                    .iter()
                    .any(|d| d.error_code.as_deref() == Some(UNREGISTERED))
            });

        if unregistered {
            return Ok(SendResponse::Failure(SendFailure::Unregistered));
        }

        let reason = error.map(|e| e.message).unwrap_or(text);
        Ok(SendResponse::Failure(SendFailure::Other(format!("{status}: {reason}"))))
    }
}

fn message_body(token: &str, message: &PushMessage) -> Value {
    let mut body = Map::new();
    body.insert("token".to_string(), json!(token));
    body.insert(
        "notification".to_string(),
        json!({
            "title": message.notification.title,
            "body": message.notification.body,
        }),
    );
    if !message.data.is_empty() {
        body.insert("data".to_string(), json!(message.data));
    }
    if let Some(android) = &message.android {
        let mut notification = Map::new();
        if let Some(sound) = &android.sound {
            notification.insert("sound".to_string(), json!(sound));
        }
        if android.default_vibrate {
            notification.insert("default_vibrate_timings".to_string(), json!(true));
        }
        body.insert(
            "android".to_string(),
            json!({
                "priority": if android.high_priority { "high" } else { "normal" },
                "notification": notification,
            }),
        );
    }
    if let Some(apns) = &message.apns {
        body.insert(
            "apns".to_string(),
            json!({ "payload": { "aps": { "sound": apns.sound, "badge": apns.badge } } }),
        );
    }

    Value::Object(body)
}

#[async_trait]
impl PushProvider for FcmPushProvider {
    async fn send_multicast(&self, message: MulticastMessage<'_>) -> Result<BatchResponse, ProviderError> {
        let results = join_all(
            message
                .tokens
                .iter()
                .map(|token| self.send_one(token, message.message)),
        )
        .await;

        // Only credential rejection surfaces as Err; it applies to every token alike
        let responses = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        Ok(BatchResponse { responses })
    }
}
