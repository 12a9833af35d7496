//! Transport seam for the token endpoint round trip.
//!
//! The token flow only needs "POST a body, get back status and body", so any
//! HTTP stack can sit behind this trait. `reqwest::Client` is supported out
//! of the box.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }
}

pub trait TokenTransport: Send + Sync {
    fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<TransportResponse, AuthError>> + Send;
}

impl TokenTransport for Client {
    async fn post(&self, url: &str, content_type: &'static str, body: Vec<u8>) -> Result<TransportResponse, AuthError> {
        let response = self
            .request(reqwest::Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // consumes the response, the connection goes back to the pool
        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

impl<T: TokenTransport> TokenTransport for std::sync::Arc<T> {
    fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<TransportResponse, AuthError>> + Send {
        (**self).post(url, content_type, body)
    }
}
