use chrono::{DateTime, Utc};

use crate::helpers::time::{is_expired_at, valid_until};

/// Token obtained from the authorization server, with its local deadline.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub access_token: String,
    pub scope: String,
    /// lifetime declared by the server, seconds
    pub expires_in: i64,
    pub token_type: String,
    pub valid_until: DateTime<Utc>,
}

impl CachedToken {
    pub fn new(
        access_token: String,
        scope: String,
        expires_in: i64,
        token_type: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            scope,
            expires_in,
            token_type,
            valid_until: valid_until(issued_at, expires_in),
        }
    }

    /// An empty access token is never usable.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && !is_expired_at(self.valid_until, now)
    }
}

// the token value stays out of logs
impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("valid_until", &self.valid_until)
            .finish_non_exhaustive()
    }
}
