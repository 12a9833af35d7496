use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::token::CachedToken;
use crate::config::credentials::Credentials;
use crate::error::AuthError;
use crate::helpers::status::is_success;
use crate::sources::fetch::TokenTransport;
use crate::utils::constants::{CONTENT_TYPE_JSON, GRANT_TYPE_CLIENT_CREDENTIALS};

/// Client-credentials grant body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub audience: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub fn from_credentials(credentials: &'a Credentials) -> Self {
        Self {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
            audience: &credentials.audience,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, AuthError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

impl TokenResponse {
    pub fn into_cached(self, issued_at: DateTime<Utc>) -> CachedToken {
        CachedToken::new(self.access_token, self.scope, self.expires_in, self.token_type, issued_at)
    }
}

/// One client-credentials round trip against `credentials.token_endpoint`.
///
/// `issued_at` is evaluated after the response has been decoded.
pub async fn fetch_token<T, N>(transport: &T, credentials: &Credentials, issued_at: N) -> Result<CachedToken, AuthError>
where
    T: TokenTransport,
    N: Fn() -> DateTime<Utc>,
{
    let body = TokenRequest::from_credentials(credentials).to_json()?;

    debug!(endpoint = %credentials.token_endpoint, audience = %credentials.audience, "requesting client-credentials token");
    let response = transport
        .post(&credentials.token_endpoint, CONTENT_TYPE_JSON, body)
        .await?;

    if !is_success(response.status) {
        return Err(AuthError::AuthServer { status: response.status });
    }

    let parsed: TokenResponse = serde_json::from_slice(&response.body)?;
    let token = parsed.into_cached(issued_at());
    debug!(valid_until = %token.valid_until, expires_in = token.expires_in, "token received");
    Ok(token)
}
