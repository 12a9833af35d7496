//! # Dispatch Auth
//!
//! Fetches client-credentials OAuth2 tokens, caches them until shortly before
//! they expire and attaches them to outgoing requests.
//!
//! Modules:
//! - `config` — credentials, YAML settings, loading and validation
//! - `cache` — the cached token and its single-slot cache
//! - `sources` — token endpoint transport and the client-credentials fetch
//! - `sinks` — propagation of the token into request headers
//! - `provider` — `TokenProvider`, the entry point tying the above together

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod provider;
pub mod sinks;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::credentials::Credentials;
pub use crate::error::{AttachError, AuthError};
pub use crate::provider::TokenProvider;
pub use crate::sinks::request_header::BearerTarget;
