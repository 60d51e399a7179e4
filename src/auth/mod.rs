//! Authentication module
//!
//! Supports: API Key (HMAC-SHA256 request signing) and OAuth2 bearer tokens.
//!
//! An [`Authenticator`] is bound to a client at construction time and
//! never changes afterwards. Unauthenticated clients simply bind none.

mod authenticator;
mod clock;

pub(crate) use authenticator::bearer;
pub use authenticator::{ApiKeyAuthenticator, Authenticator, OAuthAuthenticator};
pub use clock::{Clock, FixedClock, SystemClock};
