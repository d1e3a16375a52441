//! OAuth scope handling.
//!
//! Scopes are validated against the access scopes the Admin API grants, so a
//! typo in a requested scope is reported at construction.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Access scopes a session may carry.
pub const KNOWN_SCOPES: &[&str] = &[
    "read_content",
    "write_content",
    "read_themes",
    "write_themes",
    "read_products",
    "write_products",
    "read_customers",
    "write_customers",
    "read_orders",
    "write_orders",
    "read_draft_orders",
    "write_draft_orders",
    "read_script_tags",
    "write_script_tags",
    "read_fulfillments",
    "write_fulfillments",
    "read_shipping",
    "write_shipping",
    "read_analytics",
    "read_users",
    "write_users",
    "read_checkouts",
    "write_checkouts",
    "read_reports",
    "write_reports",
];

/// A set of OAuth scopes.
///
/// Parsing expands implied scopes: `write_products` implies `read_products`.
/// The set serializes to a sorted, comma-separated string.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::AuthScopes;
///
/// let scopes: AuthScopes = "write_products, read_orders".parse().unwrap();
/// assert!(scopes.contains("read_products"));
/// assert_eq!(scopes.to_string(), "read_orders,read_products,write_products");
///
/// assert!("write_everything".parse::<AuthScopes>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: BTreeSet<String>,
}

impl AuthScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if `scope` is granted, directly or by implication.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns `true` if this set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.scopes.is_subset(&self.scopes)
    }

    /// Returns an iterator over the scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        for scope in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !KNOWN_SCOPES.contains(&scope) {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Unknown scope '{scope}'"),
                });
            }
            if let Some(resource) = scope.strip_prefix("write_") {
                scopes.insert(format!("read_{resource}"));
            }
            scopes.insert(scope.to_string());
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_scopes_parses_comma_separated() {
        let scopes: AuthScopes = "read_products, read_orders".parse().unwrap();
        assert!(scopes.contains("read_products"));
        assert!(scopes.contains("read_orders"));
        assert!(!scopes.contains("write_orders"));
    }

    #[test]
    fn test_write_scope_implies_read_scope() {
        let scopes: AuthScopes = "write_script_tags".parse().unwrap();
        assert!(scopes.contains("write_script_tags"));
        assert!(scopes.contains("read_script_tags"));
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let result = "read_products,write_galaxies".parse::<AuthScopes>();
        match result {
            Err(ConfigError::InvalidScopes { reason }) => {
                assert!(reason.contains("write_galaxies"));
            }
            other => panic!("expected InvalidScopes, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_scopes_covers() {
        let granted: AuthScopes = "write_products, read_orders".parse().unwrap();
        let required: AuthScopes = "read_products".parse().unwrap();
        assert!(granted.covers(&required));

        let more: AuthScopes = "read_products, read_customers".parse().unwrap();
        assert!(!granted.covers(&more));
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let scopes: AuthScopes = " , ".parse().unwrap();
        assert!(scopes.is_empty());
        assert_eq!(serde_json::to_string(&scopes).unwrap(), r#""""#);
    }

    #[test]
    fn test_auth_scopes_serde_uses_sorted_string() {
        let scopes: AuthScopes = "write_orders,read_content".parse().unwrap();
        let json = serde_json::to_string(&scopes).unwrap();
        assert_eq!(json, r#""read_content,read_orders,write_orders""#);

        let restored: AuthScopes = serde_json::from_str(&json).unwrap();
        assert_eq!(scopes, restored);
    }
}
