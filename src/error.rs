//! Error taxonomy for token acquisition and attachment.

use std::error::Error as StdError;
use std::fmt;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// One or more credential fields are empty.
    #[error("initialize request objects first: missing {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The transport could not complete the round trip.
    #[error("token endpoint unreachable: {0}")]
    Network(#[source] BoxError),

    /// Token endpoint answered outside of the success set.
    #[error("token not generated successfully: status {status}")]
    AuthServer { status: u16 },

    #[error("token codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("access token is not a valid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

impl AuthError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Configuration { .. } => "configuration",
            AuthError::Network(_) => "network",
            AuthError::AuthServer { .. } => "auth_server",
            AuthError::Codec(_) => "codec",
            AuthError::InvalidHeader(_) => "invalid_header",
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(Box::new(err))
    }
}

/// Failure of [`attach_token`](crate::provider::token_provider::TokenProvider::attach_token).
///
/// Hands the caller's request back untouched so it can decide whether to
/// send it anyway, abort or retry. `request` is `None` when the provider was
/// never initialized.
pub struct AttachError<R> {
    pub request: Option<R>,
    pub error: AuthError,
}

impl<R> AttachError<R> {
    pub fn new(request: Option<R>, error: AuthError) -> Self {
        Self { request, error }
    }

    pub fn into_parts(self) -> (Option<R>, AuthError) {
        (self.request, self.error)
    }
}

// Requests are not required to be Debug.
impl<R> fmt::Debug for AttachError<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("has_request", &self.request.is_some())
            .field("error", &self.error)
            .finish()
    }
}

impl<R> fmt::Display for AttachError<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<R> StdError for AttachError<R> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}
