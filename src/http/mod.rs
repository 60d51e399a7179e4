//! HTTP client module
//!
//! Provides the request pipeline used by every data endpoint.
//!
//! # Features
//!
//! - **Fixed Base URL**: Paths are resolved against the configured API URL
//! - **Content Sniffing**: JSON or form content type picked from the body
//! - **Authentication**: Headers from the bound authenticator, if any
//! - **Structured Errors**: Non-200 responses decode into `ApiError`

mod client;
mod content;

pub use client::HttpClient;
pub use content::sniff_content_type;
