//! Client configuration
//!
//! Defaults point at the production Coinbase endpoints. Overriding the base
//! URLs is mostly useful for sandboxes and mock servers.

use crate::error::{Error, Result};
use crate::types::{API_URL, WEB_URL};
use std::time::Duration;
use url::Url;

/// Configuration shared by the request pipeline and the OAuth2 flow
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for data, token and revoke calls
    pub api_url: String,
    /// Base URL for the consent redirect
    pub web_url: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout applied to the transport
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_string(),
            web_url: WEB_URL.to_string(),
            user_agent: format!("coinbase-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve a path against the API base URL
    pub fn api_endpoint(&self, path: &str) -> Result<Url> {
        join(&self.api_url, path)
    }

    /// Resolve a path against the web base URL
    pub fn web_endpoint(&self, path: &str) -> Result<Url> {
        join(&self.web_url, path)
    }

    /// Build a transport honoring this config
    pub(crate) fn transport(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(Error::Http)
    }
}

fn join(base: &str, path: &str) -> Result<Url> {
    if base.is_empty() {
        return Err(Error::config("base URL can't be empty"));
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the web base URL
    pub fn web_url(mut self, url: impl Into<String>) -> Self {
        self.config.web_url = url.into();
        self
    }

    /// Point both base URLs at the same host
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.api_url.clone_from(&url);
        self.config.web_url = url;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
