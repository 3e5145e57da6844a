//! Custom claims updates through the auth provider's admin API.

use async_trait::async_trait;

use crate::server::{
    error::provider::ProviderError,
    provider::{AuthProvider, CustomClaims},
};

pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
    admin_key: String,
}

impl HttpAuthProvider {
    pub fn new(client: reqwest::Client, base_url: &str, admin_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key,
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn set_custom_claims(&self, uid: &str, claims: &CustomClaims) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(format!("{}/accounts/{}/claims", self.base_url, uid))
            .bearer_auth(&self.admin_key)
            .json(claims)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ClaimsRejected {
                uid: uid.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(uid, role = %claims.role, "Updated custom claims");

        Ok(())
    }
}
