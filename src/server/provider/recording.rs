//! In-memory providers that record every call.
//!
//! Used in place of the HTTP providers when exercising handlers without network access.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::server::{
    error::provider::ProviderError,
    provider::{
        AuthProvider, BatchResponse, CustomClaims, MulticastMessage, PushMessage, PushProvider,
        SendFailure, SendResponse,
    },
};

/// A multicast as received by [`RecordingPushProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMulticast {
    pub tokens: Vec<String>,
    pub message: PushMessage,
}

/// Push provider that delivers to every token except the configured unregistered and
/// transient ones.
#[derive(Default)]
pub struct RecordingPushProvider {
    unregistered: HashSet<String>,
    transient: HashSet<String>,
    failing_calls: HashSet<usize>,
    calls: Mutex<Vec<RecordedMulticast>>,
}

impl RecordingPushProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these tokens as permanently invalid.
    pub fn with_unregistered<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unregistered.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Report these tokens as failed for a reason that may clear up before the next send.
    pub fn with_transient<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transient.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Fail the whole call with the given zero-based index.
    pub fn with_failing_call(mut self, index: usize) -> Self {
        self.failing_calls.insert(index);
        self
    }

    pub async fn calls(&self) -> Vec<RecordedMulticast> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PushProvider for RecordingPushProvider {
    async fn send_multicast(&self, message: MulticastMessage<'_>) -> Result<BatchResponse, ProviderError> {
        let mut calls = self.calls.lock().await;
        let index = calls.len();
        calls.push(RecordedMulticast {
            tokens: message.tokens.to_vec(),
            message: message.message.clone(),
        });

        if self.failing_calls.contains(&index) {
            return Err(ProviderError::PushRejected {
                status: 503,
                message: format!("call {index} configured to fail"),
            });
        }

        let responses = message
            .tokens
            .iter()
            .map(|token| {
                if self.unregistered.contains(token) {
                    SendResponse::Failure(SendFailure::Unregistered)
                } else if self.transient.contains(token) {
                    SendResponse::Failure(SendFailure::Other("device temporarily unavailable".to_string()))
                } else {
                    SendResponse::Success
                }
            })
            .collect();

        Ok(BatchResponse { responses })
    }
}

/// Auth provider that stores claims updates, optionally rejecting all of them.
#[derive(Default)]
pub struct RecordingAuthProvider {
    reject: bool,
    claims: Mutex<Vec<(String, CustomClaims)>>,
}

impl RecordingAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every update as the admin API would for an unknown account.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub async fn claims(&self) -> Vec<(String, CustomClaims)> {
        self.claims.lock().await.clone()
    }
}

#[async_trait]
impl AuthProvider for RecordingAuthProvider {
    async fn set_custom_claims(&self, uid: &str, claims: &CustomClaims) -> Result<(), ProviderError> {
        if self.reject {
            return Err(ProviderError::ClaimsRejected {
                uid: uid.to_string(),
                status: 404,
            });
        }

        self.claims.lock().await.push((uid.to_string(), *claims));

        Ok(())
    }
}
