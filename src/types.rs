//! Common types used throughout the client
//!
//! Fixed endpoint constants, the per-call request descriptor, and the
//! user profile payload.

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

// ============================================================================
// Endpoints
// ============================================================================

/// Web-facing base URL, used for the OAuth2 consent redirect
pub const WEB_URL: &str = "https://www.coinbase.com";

/// API base URL, used for data, token and revoke calls
pub const API_URL: &str = "https://api.coinbase.com";

/// OAuth2 authorization path (relative to [`WEB_URL`])
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// OAuth2 token exchange path (relative to [`API_URL`])
pub const TOKEN_PATH: &str = "/oauth/token";

/// OAuth2 revoke path (relative to [`API_URL`])
pub const REVOKE_PATH: &str = "/oauth/revoke";

// ============================================================================
// Headers
// ============================================================================

pub const HEADER_ACCESS_KEY: &str = "CB-ACCESS-KEY";
pub const HEADER_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
pub const HEADER_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

// ============================================================================
// Request Descriptor
// ============================================================================

/// A request as seen by an authenticator: method, target and body.
///
/// The body is buffered so it can be sniffed, signed and sent without
/// being read twice.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub body: Bytes,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: Url, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            url,
            body: body.into(),
        }
    }

    /// Path plus query string, as it appears on the request line
    pub fn request_uri(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

// ============================================================================
// User
// ============================================================================

/// Envelope returned by the user endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub data: UserData,
}

/// Public profile of a Coinbase account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_bio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

/// Coinbase sends `null` for unset profile fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
