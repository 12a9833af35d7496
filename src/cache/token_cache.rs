use chrono::{DateTime, Utc};
use std::future::Future;
use tokio::sync::Mutex;

use crate::cache::token::CachedToken;

/// Where a token handed out by [`TokenCache::get_or_refresh`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Cached,
    Fetched,
}

/// Single-slot token cache.
///
/// The check-and-update sequence runs under one lock, so at most one refresh
/// is in flight and callers queued behind it reuse its result.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self { inner: Mutex::new(None) }
    }

    /// Current token, whether or not it is still valid.
    pub async fn peek(&self) -> Option<CachedToken> {
        self.inner.lock().await.clone()
    }

    pub async fn set(&self, token: CachedToken) {
        *self.inner.lock().await = Some(token);
    }

    /// Return the cached token if usable at `now()`, otherwise run `refresh`
    /// and store its result. A failed refresh leaves the slot untouched.
    pub async fn get_or_refresh<N, F, Fut, E>(&self, now: N, refresh: F) -> Result<(CachedToken, Lookup), E>
    where
        N: Fn() -> DateTime<Utc>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken, E>>,
    {
        let mut slot = self.inner.lock().await;
        if let Some(token) = slot.as_ref().filter(|t| t.is_usable_at(now())) {
            return Ok((token.clone(), Lookup::Cached));
        }

        let token = refresh().await?;
        *slot = Some(token.clone());
        Ok((token, Lookup::Fetched))
    }
}
