//! External collaborators: the push messaging service and the auth provider's admin API.
//!
//! Both are traits so handlers receive them through [`AppState`](crate::server::model::app::AppState)
//! and tests can substitute the recording implementations in `recording`, built for tests
//! and with the `test-utils` feature.

pub mod fcm;
pub mod identity;
#[cfg(any(test, feature = "test-utils"))]
pub mod recording;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::server::{error::provider::ProviderError, model::auth::Role};

pub use fcm::FcmPushProvider;
pub use identity::HttpAuthProvider;

/// Visible part of a push notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// Android delivery options.
#[derive(Debug, Clone, PartialEq)]
pub struct AndroidConfig {
    pub high_priority: bool,
    pub sound: Option<String>,
    pub default_vibrate: bool,
}

/// APNs delivery options.
#[derive(Debug, Clone, PartialEq)]
pub struct ApnsConfig {
    pub sound: String,
    pub badge: u32,
}

/// Payload shared by every token of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub notification: PushNotification,
    pub data: HashMap<String, String>,
    pub android: Option<AndroidConfig>,
    pub apns: Option<ApnsConfig>,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: PushNotification {
                title: title.into(),
                body: body.into(),
            },
            data: HashMap::new(),
            android: None,
            apns: None,
        }
    }
}

/// One provider call: a payload addressed to at most one batch of tokens.
#[derive(Debug, Clone, Copy)]
pub struct MulticastMessage<'a> {
    pub tokens: &'a [String],
    pub message: &'a PushMessage,
}

/// Why delivery to a single token failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendFailure {
    /// The token is permanently invalid and should be removed from its profile.
    Unregistered,
    Other(String),
}

/// Delivery result for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResponse {
    Success,
    Failure(SendFailure),
}

impl SendResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Per-token results of a multicast, in the order the tokens were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResponse {
    pub responses: Vec<SendResponse>,
}

impl BatchResponse {
    pub fn success_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.responses.len() - self.success_count()
    }

    /// Tokens of `tokens` the provider reported as unregistered.
    pub fn unregistered<'a>(&self, tokens: &'a [String]) -> Vec<&'a String> {
        tokens
            .iter()
            .zip(&self.responses)
            .filter(|(_, response)| {
                matches!(response, SendResponse::Failure(SendFailure::Unregistered))
            })
            .map(|(token, _)| token)
            .collect()
    }
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Sends one payload to every token of the batch.
    ///
    /// # Returns
    /// - `Ok(BatchResponse)` - One response per token; individual tokens may have failed
    /// - `Err(ProviderError)` - The whole batch failed
    async fn send_multicast(&self, message: MulticastMessage<'_>) -> Result<BatchResponse, ProviderError>;
}

/// Authorization claims stored on an account by the auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomClaims {
    pub role: Role,
    pub is_active: bool,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Replaces the custom claims of account `uid`.
    async fn set_custom_claims(&self, uid: &str, claims: &CustomClaims) -> Result<(), ProviderError>;
}
