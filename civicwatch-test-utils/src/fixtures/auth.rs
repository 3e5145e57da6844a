use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::{constant::TEST_TOKEN_SECRET, error::TestError};

/// Sign an HS256 bearer token valid for one hour with [`TEST_TOKEN_SECRET`].
///
/// # Arguments
/// - `uid` - Account identity placed in `sub`
/// - `role` - Optional role claim (`citizen`, `authority`, `admin`)
pub fn sign_token(uid: &str, role: Option<&str>) -> Result<String, TestError> {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let claims = match role {
        Some(role) => json!({ "sub": uid, "role": role, "exp": exp }),
        None => json!({ "sub": uid, "exp": exp }),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_TOKEN_SECRET.as_bytes()),
    )?)
}
