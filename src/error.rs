//! Configuration error types.
//!
//! This module contains the error type returned when building configuration
//! values: validated newtypes, OAuth scopes, the client configuration, and the
//! declarative [`ResourceGraph`](crate::endpoints::ResourceGraph).
//!
//! # Example
//!
//! ```rust
//! use shopify_endpoints::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration values.
///
/// Each variant carries the offending value so the message is actionable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The transport retry count must be at least one.
    #[error("Invalid tries value {tries}. At least one attempt is required.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },

    /// A resource graph key is not a lower-camel-case identifier.
    #[error("Invalid resource key '{key}'. Keys must be lowerCamelCase ASCII identifiers.")]
    InvalidResourceKey {
        /// The offending key.
        key: String,
    },

    /// The same top-level resource was declared twice.
    #[error("Duplicate resource '{key}' in resource graph.")]
    DuplicateResource {
        /// The duplicated key.
        key: String,
    },

    /// A resource declares a tier-3 bucket without any nested resources.
    #[error("Resource '{key}' declares tier-3 resources but has no nested resources.")]
    OrphanTierThree {
        /// The resource key.
        key: String,
    },

    /// The resource graph document could not be parsed.
    #[error("Failed to parse resource graph: {reason}")]
    InvalidResourceGraph {
        /// The parser's error message.
        reason: String,
    },
}
