//! Authentication module
//!
//! Supports: API key in a header (the Syncro default) or a query parameter,
//! and no authentication.
//!
//! The `Authenticator` places the configured credential on every request
//! before it is sent.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
