//! Authentication types consumed by the dispatcher.
//!
//! - [`AuthContext`]: the read-only capability the dispatcher builds headers from
//! - [`Session`]: a shop, its access token, granted scopes and optional expiry
//! - [`AuthScopes`]: a validated set of OAuth scopes
//!
//! Token acquisition (OAuth, token exchange) happens elsewhere; a `Session`
//! is simply constructed from its results.

mod scopes;
pub mod session;

pub use scopes::{AuthScopes, KNOWN_SCOPES};
pub use session::{AuthContext, Session};
