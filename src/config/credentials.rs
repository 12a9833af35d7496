use std::fmt;

use serde::Deserialize;

/// Client-credentials grant parameters for one audience.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub audience: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_endpoint: String,
}

impl Credentials {
    pub fn new(
        audience: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            audience: audience.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: token_endpoint.into(),
        }
    }

    /// Names of the fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("audience", &self.audience),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("token_endpoint", &self.token_endpoint),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

// client_secret must never reach logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.client_secret.is_empty() { "" } else { "***" };
        f.debug_struct("Credentials")
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .field("client_secret", &secret)
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}
