//! Error types for the Coinbase client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Non-success HTTP responses are surfaced as a structured [`ApiError`]
//! so callers can branch on the status code.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("No or invalid OAuth2 temporary code found in the redirect URL")]
    InvalidAuthorizationCode,

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a credential error
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error came from a non-success API response
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// The structured API error, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code associated with this error, if known
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

/// A non-success response from the API.
///
/// `status`, `method` and `url` are always filled in from the request
/// itself. The descriptive fields come from the response body and stay
/// empty when the body could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Method of the originating request
    pub method: String,
    /// URL of the originating request
    pub url: String,
    /// Machine-readable error code (e.g. `authentication_error`)
    pub error: String,
    /// Human-readable description
    pub error_description: String,
    /// Optional warning attached to the response
    pub warning: Option<String>,
}

impl ApiError {
    /// Create an error carrying only the request context
    pub fn new(status: u16, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status,
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Fill the descriptive fields from a JSON error body.
    ///
    /// On failure the error is left untouched.
    pub fn merge_body(&mut self, body: &[u8]) -> serde_json::Result<()> {
        let parsed: ErrorBody = serde_json::from_slice(body)?;

        match parsed.error {
            Some(error) => {
                self.error = error;
                self.error_description = parsed.error_description.unwrap_or_default();
            }
            None => {
                if let Some(first) = parsed.errors.into_iter().next() {
                    self.error = first.id;
                    self.error_description = first.message;
                }
            }
        }
        self.warning = parsed.warning.filter(|w| !w.is_empty());

        Ok(())
    }

    /// Build from a response, tolerating an unparsable body
    pub(crate) fn from_response_lossy(
        status: u16,
        method: impl Into<String>,
        url: impl Into<String>,
        body: &[u8],
    ) -> Self {
        let mut err = Self::new(status, method, url);
        if !body.is_empty() {
            if let Err(e) = err.merge_body(body) {
                tracing::warn!("Could not decode error body for status {}: {}", status, e);
            }
        }
        err
    }

    /// Build from a response, failing if a non-empty body does not decode
    pub(crate) fn from_response_strict(
        status: u16,
        method: impl Into<String>,
        url: impl Into<String>,
        body: &[u8],
    ) -> Result<Self> {
        let mut err = Self::new(status, method, url);
        if !body.is_empty() {
            err.merge_body(body)?;
        }
        Ok(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status code: {} request method: {} request url: {}",
            self.status, self.method, self.url
        )?;

        if !self.error.is_empty() {
            write!(
                f,
                " err: {} description: {}",
                self.error, self.error_description
            )?;
        }

        if let Some(warning) = &self.warning {
            write!(f, " warning: {warning}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Wire shape of an error body.
///
/// OAuth endpoints answer with `error`/`error_description`, the v2 data
/// endpoints with an `errors` array.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    warning: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
}
