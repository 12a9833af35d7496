use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::token::CachedToken;
use crate::cache::token_cache::{Lookup, TokenCache};
use crate::config::credentials::Credentials;
use crate::config::settings::ServiceConfig;
use crate::error::{AttachError, AuthError};
use crate::helpers::time::{self, get_instant};
use crate::observability::metrics::get_metrics;
use crate::sinks::request_header::{apply, bearer_value, BearerTarget, HeaderOptions};
use crate::sources::fetch::TokenTransport;
use crate::sources::oauth2::fetch_token;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Client-credentials token source for a single audience.
///
/// Holds the credentials and exactly one cached token. Refresh is lazy: the
/// token endpoint is only contacted from [`TokenProvider::attach_token`] (or
/// [`TokenProvider::token`]) when nothing usable is cached. Share it behind an
/// `Arc` to use it from several tasks.
pub struct TokenProvider<T> {
    credentials: Credentials,
    cache: TokenCache,
    transport: T,
    header_options: HeaderOptions,
    clock: Clock,
}

impl<T: TokenTransport> TokenProvider<T> {
    /// Provider without credentials; [`initialize`](Self::initialize) it
    /// before use.
    pub fn new(transport: T) -> Self {
        Self::with_credentials(transport, Credentials::default())
    }

    pub fn with_credentials(transport: T, credentials: Credentials) -> Self {
        Self {
            credentials,
            cache: TokenCache::new(),
            transport,
            header_options: HeaderOptions::default(),
            clock: Arc::new(time::now),
        }
    }

    pub fn from_config(transport: T, config: &ServiceConfig) -> Self {
        Self::with_credentials(transport, config.credentials.clone()).with_header_options(HeaderOptions {
            set_content_type_json: config.settings.set_content_type_json,
        })
    }

    pub fn with_header_options(mut self, header_options: HeaderOptions) -> Self {
        self.header_options = header_options;
        self
    }

    /// Replace the wall clock used for issue times and expiry checks.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Store the credentials, overwriting previous ones. No validation.
    pub fn initialize(
        &mut self,
        audience: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) {
        self.credentials = Credentials::new(audience, client_id, client_secret, token_endpoint);
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Last cached token, possibly expired.
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cache.peek().await
    }

    /// A usable token, fetched only when the cache is empty or expired.
    pub async fn token(&self) -> Result<CachedToken, AuthError> {
        let missing = self.credentials.missing_fields();
        if !missing.is_empty() {
            return Err(AuthError::Configuration { missing });
        }

        let metrics = get_metrics().await;
        let audience = self.credentials.audience.as_str();
        let (transport, credentials, clock) = (&self.transport, &self.credentials, &self.clock);

        let (token, lookup) = self
            .cache
            .get_or_refresh(
                || clock(),
                move || async move {
                    metrics.token_fetch_requests.with_label_values(&[audience]).inc();
                    let start = get_instant();
                    let fetched = fetch_token(transport, credentials, || clock()).await;
                    metrics
                        .token_fetch_duration
                        .with_label_values(&[audience])
                        .observe(start.elapsed().as_secs_f64());
                    fetched.inspect_err(|e| {
                        metrics.token_fetch_failures.with_label_values(&[audience, e.kind()]).inc();
                    })
                },
            )
            .await?;

        match lookup {
            Lookup::Cached => {
                metrics.cache_hits.with_label_values(&[audience]).inc();
                debug!(audience, valid_until = %token.valid_until, "reusing cached token");
            }
            Lookup::Fetched => {
                metrics
                    .token_valid_until_unix
                    .with_label_values(&[audience])
                    .set(token.valid_until.timestamp());
                info!(audience, valid_until = %token.valid_until, "token refreshed");
            }
        }
        Ok(token)
    }

    /// Set the `Bearer` header on `request` to a valid access token.
    ///
    /// On failure the request comes back untouched inside the error, except
    /// for an uninitialized provider where no request is returned.
    pub async fn attach_token<R: BearerTarget>(&self, mut request: R) -> Result<R, AttachError<R>> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(error @ AuthError::Configuration { .. }) => return Err(AttachError::new(None, error)),
            Err(error) => return Err(AttachError::new(Some(request), error)),
        };

        let value = match bearer_value(&token.access_token) {
            Ok(value) => value,
            Err(error) => return Err(AttachError::new(Some(request), error)),
        };
        apply(&mut request, value, self.header_options);
        Ok(request)
    }
}
