//! Request pipeline
//!
//! Every call goes through the same three steps:
//! - build: resolve the URL, sniff the content type, attach auth headers
//! - execute: send through the transport and read the whole body
//! - decode: hand back the raw body on 200, a structured error otherwise

use super::content::sniff_content_type;
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::types::RequestDescriptor;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client bound to the API base URL and, optionally, an authenticator
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl HttpClient {
    /// Create an unauthenticated client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an unauthenticated client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = config.transport()?;
        Ok(Self::with_transport(client, config))
    }

    /// Create a client around an existing transport
    pub fn with_transport(client: Client, config: ClientConfig) -> Self {
        Self {
            client,
            config,
            authenticator: None,
        }
    }

    /// Bind an authenticator
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether requests are authenticated
    pub fn has_authenticator(&self) -> bool {
        self.authenticator.is_some()
    }

    /// Make a GET request. GET never carries a body.
    pub async fn get(&self, path: &str) -> Result<Bytes> {
        self.request(Method::GET, path, Bytes::new()).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: impl Into<Bytes>) -> Result<Bytes> {
        self.request(Method::POST, path, body).await
    }

    /// Make a PUT request
    pub async fn put(&self, path: &str, body: impl Into<Bytes>) -> Result<Bytes> {
        self.request(Method::PUT, path, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, body: impl Into<Bytes>) -> Result<Bytes> {
        self.request(Method::DELETE, path, body).await
    }

    /// Make a generic request and return the raw success body
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: impl Into<Bytes>,
    ) -> Result<Bytes> {
        let request = self.build_request(method, path, body.into())?;
        self.execute(request).await
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: impl Into<Bytes>,
    ) -> Result<T> {
        let bytes = self.request(method, path, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, Bytes::new()).await
    }

    /// Build a request without sending it.
    ///
    /// The body buffer that is sniffed and signed is the one placed on the
    /// request.
    pub fn build_request(&self, method: Method, path: &str, body: Bytes) -> Result<Request> {
        let url = self.config.api_endpoint(path)?;
        let content_type = sniff_content_type(&body);
        let descriptor = RequestDescriptor::new(method, url, body);

        let mut req = self
            .client
            .request(descriptor.method.clone(), descriptor.url.clone())
            .header(USER_AGENT, self.config.user_agent.as_str())
            .header(CONTENT_TYPE, content_type);

        if let Some(ref auth) = self.authenticator {
            req = req.headers(auth.auth_headers(&descriptor)?);
        }

        debug!(
            "Built request: {} {} ({}, {} bytes)",
            descriptor.method,
            descriptor.url,
            content_type,
            descriptor.body.len()
        );

        Ok(req.body(descriptor.body).build()?)
    }

    /// Send a built request and decode the outcome
    pub async fn execute(&self, request: Request) -> Result<Bytes> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.client.execute(request).await.map_err(Error::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(Error::Http)?;

        if status != StatusCode::OK {
            warn!("Request failed with {}: {} {}", status.as_u16(), method, url);
            return Err(ApiError::from_response_lossy(
                status.as_u16(),
                method.as_str(),
                url.as_str(),
                &body,
            )
            .into());
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(body)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}
