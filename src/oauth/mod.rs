//! OAuth2 module
//!
//! Authorization-code flow: build the consent URL, read the code from the
//! redirect, exchange it for tokens, refresh and revoke them.
//!
//! Token persistence is left to the caller. `OAuthTokens` is serializable
//! for that purpose.

mod flow;
mod types;

pub use flow::{generate_state, OAuth};
pub use types::{AuthorizationCode, OAuthTokens};
