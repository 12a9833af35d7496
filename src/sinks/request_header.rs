//! Propagation of the cached token into outgoing requests.

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::HeaderMap;

use crate::error::AuthError;
use crate::utils::constants::{BEARER_HEADER, CONTENT_TYPE_JSON};

/// Anything whose headers can be decorated with a token.
pub trait BearerTarget {
    fn headers_mut(&mut self) -> &mut HeaderMap;
}

impl<B> BearerTarget for http::Request<B> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        http::Request::headers_mut(self)
    }
}

impl BearerTarget for reqwest::Request {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        reqwest::Request::headers_mut(self)
    }
}

impl BearerTarget for HeaderMap {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    pub set_content_type_json: bool,
}

/// Validate `access_token` as a header value. Done before touching the
/// request so a failure leaves it unmodified.
pub fn bearer_value(access_token: &str) -> Result<HeaderValue, AuthError> {
    let mut value = HeaderValue::from_str(access_token)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Sets `Bearer: <token>`, replacing any previous value.
pub fn apply<R: BearerTarget>(target: &mut R, value: HeaderValue, options: HeaderOptions) {
    let headers = target.headers_mut();
    headers.insert(HeaderName::from_static(BEARER_HEADER), value);
    if options.set_content_type_json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    }
}
