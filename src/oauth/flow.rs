//! OAuth2 authorization-code flow
//!
//! Talks to the token and revoke endpoints directly. These calls carry the
//! credentials as payload, so they bypass the pipeline's authenticator.

use super::types::OAuthTokens;
use crate::auth::bearer;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::types::{AUTHORIZE_PATH, REVOKE_PATH, TOKEN_PATH};
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// Grant used at the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant<'a> {
    AuthorizationCode(&'a str),
    RefreshToken(&'a str),
}

impl Grant<'_> {
    fn grant_type(self) -> &'static str {
        match self {
            Grant::AuthorizationCode(_) => "authorization_code",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }
}

/// OAuth2 application credentials and the calls made with them
#[derive(Clone)]
pub struct OAuth {
    client_id: String,
    client_secret: String,
    /// When unset, the provider uses the first redirect URL registered
    /// for the application. The code exchange then sends it empty.
    redirect_url: Option<String>,
    config: ClientConfig,
    client: Client,
}

impl OAuth {
    /// Create a flow manager against the production endpoints
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::default();
        let client = config.transport()?;
        Ok(Self::with_transport(client_id, client_secret, client, config))
    }

    /// Create a flow manager with an existing transport and configuration
    pub fn with_transport(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        client: Client,
        config: ClientConfig,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: None,
            config,
            client,
        }
    }

    /// Replace the configuration, rebuilding the transport
    pub fn with_config(mut self, config: ClientConfig) -> Result<Self> {
        self.client = config.transport()?;
        self.config = config;
        Ok(self)
    }

    /// Set the redirect URL sent with the authorize and code exchange calls
    #[must_use]
    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        let redirect_url = redirect_url.into();
        self.redirect_url = (!redirect_url.is_empty()).then_some(redirect_url);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Build the consent URL the user is sent to.
    ///
    /// `state` should be an unguessable string (see [`generate_state`]);
    /// scopes are sent comma-joined.
    pub fn authorization_url(&self, state: Option<&str>, scopes: &[&str]) -> Result<Url> {
        let mut url = self.config.web_endpoint(AUTHORIZE_PATH)?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id);

            if let Some(redirect_url) = &self.redirect_url {
                query.append_pair("redirect_uri", redirect_url);
            }
            if let Some(state) = state.filter(|s| !s.is_empty()) {
                query.append_pair("state", state);
            }
            if !scopes.is_empty() {
                query.append_pair("scope", &scopes.join(","));
            }
        }

        Ok(url)
    }

    /// Exchange a temporary authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokens> {
        self.request_tokens(Grant::AuthorizationCode(code)).await
    }

    /// Use the refresh token of `tokens` to obtain a new pair
    pub async fn refresh_token(&self, tokens: &OAuthTokens) -> Result<OAuthTokens> {
        self.refresh(&tokens.refresh_token).await
    }

    /// Use a refresh token to obtain a new pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<OAuthTokens> {
        self.request_tokens(Grant::RefreshToken(refresh_token)).await
    }

    /// Revoke an access token
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        let url = self.config.api_endpoint(REVOKE_PATH)?;
        let form = [("token", token)];

        let response = self
            .client
            .post(url.clone())
            .header(AUTHORIZATION, bearer(token)?)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &url, &body)?;

        debug!("Revoked token at {}", url);
        Ok(())
    }

    async fn request_tokens(&self, grant: Grant<'_>) -> Result<OAuthTokens> {
        let url = self.config.api_endpoint(TOKEN_PATH)?;

        let mut form = vec![
            ("grant_type", grant.grant_type()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        match grant {
            Grant::AuthorizationCode(code) => {
                form.push(("code", code));
                form.push(("redirect_uri", self.redirect_url().unwrap_or_default()));
            }
            Grant::RefreshToken(refresh_token) => form.push(("refresh_token", refresh_token)),
        }

        let response = self.client.post(url.clone()).form(&form).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &url, &body)?;

        debug!("Obtained tokens via {} grant", grant.grant_type());
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Turn a non-200 token/revoke response into an error.
///
/// A non-empty body that does not decode is reported as a JSON error.
fn check_status(status: StatusCode, url: &Url, body: &Bytes) -> Result<()> {
    if status == StatusCode::OK {
        return Ok(());
    }

    warn!("OAuth2 request failed with {}: {}", status.as_u16(), url);
    let err =
        ApiError::from_response_strict(status.as_u16(), Method::POST.as_str(), url.as_str(), body)?;
    Err(err.into())
}

impl fmt::Debug for OAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_url", &self.redirect_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Generate an unguessable anti-forgery `state` value
pub fn generate_state() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
