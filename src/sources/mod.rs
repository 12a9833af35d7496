pub mod fetch;
pub mod oauth2;

pub use fetch::{TokenTransport, TransportResponse};
pub use oauth2::{fetch_token, TokenRequest, TokenResponse};
