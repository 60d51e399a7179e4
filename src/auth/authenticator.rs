//! Authenticator implementations
//!
//! An authenticator turns a [`RequestDescriptor`] into the headers that
//! prove the caller's identity. It never touches the request itself, so
//! the pipeline stays in control of what is actually sent.

use super::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::types::{
    RequestDescriptor, HEADER_ACCESS_KEY, HEADER_ACCESS_SIGN, HEADER_ACCESS_TIMESTAMP,
};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Produces authentication headers for an outgoing request
pub trait Authenticator: Send + Sync {
    /// Compute the headers to attach to `request`
    fn auth_headers(&self, request: &RequestDescriptor) -> Result<HeaderMap>;
}

// ============================================================================
// API Key (HMAC-SHA256)
// ============================================================================

/// Signs requests with an API key and secret.
///
/// The signature is the hex-encoded HMAC-SHA256 of
/// `timestamp + METHOD + request_uri + body`, keyed by the secret.
pub struct ApiKeyAuthenticator {
    key: String,
    secret: String,
    clock: Arc<dyn Clock>,
}

impl ApiKeyAuthenticator {
    /// Create an authenticator using the system clock
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::with_clock(key, secret, Arc::new(SystemClock))
    }

    /// Create an authenticator with a custom time source
    pub fn with_clock(
        key: impl Into<String>,
        secret: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            clock,
        }
    }

    /// The public key identifier
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Compute the hex signature for a request at a given timestamp
    pub fn sign(&self, timestamp: &str, request: &RequestDescriptor) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| Error::credential(format!("invalid api secret: {e}")))?;
        mac.update(timestamp.as_bytes());
        mac.update(request.method.as_str().as_bytes());
        mac.update(request.request_uri().as_bytes());
        mac.update(&request.body);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Authenticator for ApiKeyAuthenticator {
    fn auth_headers(&self, request: &RequestDescriptor) -> Result<HeaderMap> {
        if self.key.is_empty() || self.secret.is_empty() {
            return Err(Error::credential("api key/secret can't be empty"));
        }

        // Read once: the signed timestamp and the header must match.
        let timestamp = self.clock.timestamp();
        let signature = self.sign(&timestamp, request)?;

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(HEADER_ACCESS_KEY, HeaderValue::from_str(&self.key)?);
        headers.insert(HEADER_ACCESS_SIGN, HeaderValue::from_str(&signature)?);
        headers.insert(HEADER_ACCESS_TIMESTAMP, HeaderValue::from_str(&timestamp)?);

        Ok(headers)
    }
}

impl fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

// ============================================================================
// OAuth2 Bearer
// ============================================================================

/// Presents an OAuth2 access token as a bearer credential
#[derive(Clone)]
pub struct OAuthAuthenticator {
    token: String,
}

impl OAuthAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authenticator for OAuthAuthenticator {
    fn auth_headers(&self, _request: &RequestDescriptor) -> Result<HeaderMap> {
        if self.token.is_empty() {
            return Err(Error::credential("authentication token can't be empty"));
        }

        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(AUTHORIZATION, bearer(&self.token)?);
        Ok(headers)
    }
}

impl fmt::Debug for OAuthAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// `Authorization: Bearer <token>` header value, marked sensitive
pub(crate) fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}
