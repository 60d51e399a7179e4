//! OAuth2 data types

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Token pair returned by the token endpoint.
///
/// `obtained_at` is not sent by the server; it is stamped when the
/// response is decoded so expiry can be checked later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

impl OAuthTokens {
    /// When the access token expires, if the server gave a usable lifetime.
    ///
    /// A lifetime that overflows the representable date range is treated
    /// as no expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expires_in <= 0 {
            return None;
        }
        Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| self.obtained_at.checked_add_signed(lifetime))
    }

    /// Check if the access token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => Utc::now() + Duration::seconds(30) >= expires_at,
            None => false,
        }
    }

    /// Scopes granted, split on commas or spaces
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .split([',', ' '])
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Temporary code (and optional state) delivered to the redirect URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub code: String,
    /// Empty when the redirect carried no state
    pub state: String,
}

impl AuthorizationCode {
    /// Extract the code from a full redirect URL
    pub fn from_url(url: &Url) -> Result<Self> {
        Self::from_pairs(url.query_pairs())
    }

    /// Extract the code from a raw query string (with or without `?`)
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Result<Self> {
        let mut code = None;
        let mut state = None;

        for (key, value) in pairs {
            match key.as_ref() {
                "code" if code.is_none() => code = Some(value.into_owned()),
                "state" if state.is_none() => state = Some(value.into_owned()),
                _ => {}
            }
        }

        match code {
            Some(code) if !code.is_empty() => Ok(Self {
                code,
                state: state.unwrap_or_default(),
            }),
            _ => Err(Error::InvalidAuthorizationCode),
        }
    }
}
