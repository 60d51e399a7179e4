//! Client facade
//!
//! Binds one authenticator (or none) to a request pipeline and exposes
//! typed domain operations on top of it.

use crate::auth::{ApiKeyAuthenticator, Authenticator, OAuthAuthenticator};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::oauth::OAuthTokens;
use crate::types::User;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::sync::Arc;
use tracing::debug;

/// Coinbase API client
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Client for public, unauthenticated endpoints
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), None)
    }

    /// Client signing requests with an API key and secret
    pub fn api_key(key: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let auth = ApiKeyAuthenticator::new(key, secret);
        Self::with_config(ClientConfig::default(), Some(Arc::new(auth)))
    }

    /// Client acting on a user's behalf with an OAuth2 access token
    pub fn oauth(token: impl Into<String>) -> Result<Self> {
        let auth = OAuthAuthenticator::new(token);
        Self::with_config(ClientConfig::default(), Some(Arc::new(auth)))
    }

    /// Client using the access token of a token pair
    pub fn from_tokens(tokens: &OAuthTokens) -> Result<Self> {
        Self::oauth(tokens.access_token.clone())
    }

    /// Client with explicit configuration and authenticator
    pub fn with_config(
        config: ClientConfig,
        authenticator: Option<Arc<dyn Authenticator>>,
    ) -> Result<Self> {
        let http = HttpClient::with_config(config)?;
        let http = match authenticator {
            Some(auth) => http.with_authenticator(auth),
            None => http,
        };
        Ok(Self { http })
    }

    /// Wrap an already configured pipeline
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying request pipeline, for endpoints not wrapped here
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Show the user the credentials belong to
    pub async fn current_user(&self) -> Result<User> {
        debug!("Fetching current user");
        self.http.get_json("/v2/user").await
    }

    /// Show any user's public information
    pub async fn user(&self, id: &str) -> Result<User> {
        debug!("Fetching user {}", id);
        let path = format!("/v2/users/{}", path_segment(id)?);
        self.http.get_json(&path).await
    }
}

/// Percent-encode a value used as a single path segment.
///
/// `.` and `..` are rejected: URL parsing resolves them (encoded or not)
/// as dot segments.
fn path_segment(value: &str) -> Result<String> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(Error::invalid_input(format!("'{value}' is not a valid path segment")));
    }
    Ok(utf8_percent_encode(value, NON_ALPHANUMERIC).to_string())
}
