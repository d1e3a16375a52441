//! Configuration types for the endpoint dispatcher.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: settings shared by every dispatched call
//! - [`ShopifyConfigBuilder`]: a builder for [`ShopifyConfig`]
//! - [`AccessToken`], [`ShopDomain`], [`HostUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version used for the path prefix
//!
//! # Example
//!
//! ```rust
//! use shopify_endpoints::{ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_version(ApiVersion::V2025_07)
//!     .user_agent_prefix("MyApp/1.0")
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.admin_path(), "/admin/api/2025-07");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::endpoints::KeywordMatching;
use crate::error::ConfigError;

/// Settings shared by every call made through a
/// [`CallDispatcher`](crate::dispatch::CallDispatcher).
///
/// `ShopifyConfig` is `Clone + Send + Sync`. The resource graph is not part of
/// the configuration; it is constructed once and handed to the dispatcher.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    tries: u32,
    keyword_matching: KeywordMatching,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the admin path prefix, e.g. `/admin/api/2025-10`.
    #[must_use]
    pub fn admin_path(&self) -> String {
        self.api_version.admin_path()
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times the transport attempts a rate-limited or
    /// failed (429/500) request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the keyword matching mode used to parse call names.
    #[must_use]
    pub const fn keyword_matching(&self) -> KeywordMatching {
        self.keyword_matching
    }
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::latest(),
            api_host: None,
            user_agent_prefix: None,
            tries: 1,
            keyword_matching: KeywordMatching::default(),
        }
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// # Defaults
///
/// - `api_version`: latest stable version
/// - `api_host`: `None` (calls go to `https://{shop}`)
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no retries)
/// - `keyword_matching`: [`KeywordMatching::Anchored`]
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
    keyword_matching: Option<KeywordMatching>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes every call to `host` instead of the shop's own origin.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of transport attempts for 429 and 500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Selects how action prefixes, suffixes and resource keys are matched.
    #[must_use]
    pub const fn keyword_matching(mut self, matching: KeywordMatching) -> Self {
        self.keyword_matching = Some(matching);
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ShopifyConfig {
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            tries,
            keyword_matching: self.keyword_matching.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ShopifyConfig::builder().build().unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.api_host().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.tries(), 1);
        assert_eq!(config.keyword_matching(), KeywordMatching::Anchored);
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = ShopifyConfig::builder()
            .api_version(ApiVersion::V2025_01)
            .api_host(HostUrl::new("http://localhost:9000").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .tries(4)
            .keyword_matching(KeywordMatching::Substring)
            .build()
            .unwrap();

        assert_eq!(config.admin_path(), "/admin/api/2025-01");
        assert_eq!(config.api_host().unwrap().as_ref(), "http://localhost:9000");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.tries(), 4);
        assert_eq!(config.keyword_matching(), KeywordMatching::Substring);
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = ShopifyConfig::builder().tries(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidTries { tries: 0 })));
    }

    #[test]
    fn test_default_matches_empty_builder() {
        let default = ShopifyConfig::default();
        let built = ShopifyConfig::builder().build().unwrap();
        assert_eq!(default.admin_path(), built.admin_path());
        assert_eq!(default.tries(), built.tries());
    }
}
