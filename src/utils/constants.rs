//! Shared constants and invariants

pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header key carrying the raw access token. Downstream services read
/// `Bearer: <token>`, not `Authorization: Bearer <token>`. Stored lowercase,
/// header names are case-insensitive.
pub const BEARER_HEADER: &str = "bearer";

/// Cached tokens are considered valid until `expires_in` minus this margin.
pub const SAFETY_MARGIN_MINUTES: i64 = 5;
/// A token with this many whole minutes left (or fewer) is refreshed.
pub const REFRESH_THRESHOLD_MINUTES: i64 = 1;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
