//! # Coinbase Client
//!
//! An async client for the Coinbase v2 API.
//!
//! ## Features
//!
//! - **API Key Auth**: HMAC-SHA256 request signing (`CB-ACCESS-*` headers)
//! - **OAuth2 Auth**: Bearer tokens for acting on a user's behalf
//! - **OAuth2 Flow**: Consent URL, code exchange, refresh and revoke
//! - **Structured Errors**: Non-200 responses decode into `ApiError`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinbase_client::{Client, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::api_key("my-key", "my-secret")?;
//!     let user = client.current_user().await?;
//!     println!("{}", user.data.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Client ──► HttpClient ──► build ──► execute ──► decode
//!                             │                     │
//!                      Authenticator          Bytes / ApiError
//!                   (ApiKey | OAuth | none)
//!
//! OAuth ──► /oauth/token, /oauth/revoke   (no authenticator)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Endpoint constants and shared types
pub mod types;

/// Client configuration
pub mod config;

/// Authentication implementations
pub mod auth;

/// Request pipeline
pub mod http;

/// OAuth2 authorization-code flow
pub mod oauth;

/// Client facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{ApiKeyAuthenticator, Authenticator, OAuthAuthenticator};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ApiError, Error, Result};
pub use oauth::{generate_state, AuthorizationCode, OAuth, OAuthTokens};
pub use types::{User, UserData};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
