//! Bearer token verification.
//!
//! The auth provider issues HS256 tokens whose `sub` is the account identity and whose
//! `role` claim mirrors the profile role.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::server::{error::auth::AuthError, model::auth::TokenClaims};

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry and returns the token's claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthError::Unauthenticated
            })
    }
}
