//! The declarative resource graph.
//!
//! A [`ResourceGraph`] maps each top-level resource to the resources nested
//! beneath it. It is built once, validated, and then shared read-only by every
//! resolver through an `Arc`.
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "resources": {
//!     "products": ["images", "variants"],
//!     "orders": { "nested": ["fulfillments"], "tier3": ["events"] }
//!   },
//!   "noIdentifierResources": ["themesAssets"]
//! }
//! ```
//!
//! Declaration order is kept: when several resource keys could prefix a call
//! name, the first declared wins.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Embedded default graph covering the common Admin REST resources.
const DEFAULT_GRAPH: &str = include_str!("../../resources/endpoints.json");

/// The resources nested beneath one top-level resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceNode {
    nested: Vec<String>,
    tier3: Vec<String>,
}

impl ResourceNode {
    /// Returns the tier-2 keys in declaration order.
    #[must_use]
    pub fn nested(&self) -> &[String] {
        &self.nested
    }

    /// Returns the tier-3 keys in declaration order.
    #[must_use]
    pub fn tier3(&self) -> &[String] {
        &self.tier3
    }
}

/// Immutable mapping from top-level resources to their nested resources.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::ResourceGraph;
///
/// let graph = ResourceGraph::builder()
///     .resource("products", ["images", "variants"])
///     .resource_with_tier3("orders", ["fulfillments"], ["events"])
///     .no_identifier("themesAssets")
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.get("products").unwrap().nested(), ["images", "variants"]);
/// assert!(graph.is_no_identifier("themesAssets"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceGraph {
    resources: Vec<(String, ResourceNode)>,
    no_identifier: BTreeSet<String>,
}

// Verify ResourceGraph is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceGraph>();
};

impl ResourceGraph {
    /// Creates a new builder for constructing a `ResourceGraph`.
    #[must_use]
    pub fn builder() -> ResourceGraphBuilder {
        ResourceGraphBuilder::default()
    }

    /// Returns the embedded default graph.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] only if the embedded document is malformed.
    pub fn shopify_default() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_GRAPH)
    }

    /// Parses and validates a graph from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceGraph`] if the document does not
    /// have the expected shape, and the builder's validation errors otherwise.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: GraphDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidResourceGraph {
                reason: e.to_string(),
            })?;

        let mut builder = Self::builder();
        for (key, node) in document.resources.0 {
            builder = match node {
                NodeDocument::Plain(nested) => builder.resource(key, nested),
                NodeDocument::Tiered { nested, tier3 } => {
                    builder.resource_with_tier3(key, nested, tier3)
                }
            };
        }
        for key in document.no_identifier_resources {
            builder = builder.no_identifier(key);
        }
        builder.build()
    }

    /// Looks up a top-level resource.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResourceNode> {
        self.resources
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Returns `true` if `key` is a top-level resource.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over top-level resources in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &ResourceNode)> {
        self.resources.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// Returns `true` if the combined category key modifies and deletes at its
    /// bare path.
    #[must_use]
    pub fn is_no_identifier(&self, category: &str) -> bool {
        self.no_identifier.contains(category)
    }

    /// Returns the number of top-level resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the graph declares no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Builder for [`ResourceGraph`].
///
/// Validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ResourceGraphBuilder {
    resources: Vec<(String, ResourceNode)>,
    no_identifier: Vec<String>,
}

impl ResourceGraphBuilder {
    /// Declares a top-level resource and its nested resources.
    #[must_use]
    pub fn resource<K, I, S>(self, key: K, nested: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_with_tier3(key, nested, std::iter::empty::<String>())
    }

    /// Declares a top-level resource with a tier-3 bucket.
    #[must_use]
    pub fn resource_with_tier3<K, I, S, J, T>(mut self, key: K, nested: I, tier3: J) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let node = ResourceNode {
            nested: nested.into_iter().map(Into::into).collect(),
            tier3: tier3.into_iter().map(Into::into).collect(),
        };
        self.resources.push((key.into(), node));
        self
    }

    /// Registers a combined category key (e.g. `themesAssets`) whose modify
    /// and delete URIs carry no identifier.
    #[must_use]
    pub fn no_identifier(mut self, category: impl Into<String>) -> Self {
        self.no_identifier.push(category.into());
        self
    }

    /// Validates the declarations and builds the graph.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidResourceKey`] for a key that is not lowerCamelCase
    /// - [`ConfigError::DuplicateResource`] for a resource declared twice
    /// - [`ConfigError::OrphanTierThree`] for a tier-3 bucket without nested keys
    pub fn build(self) -> Result<ResourceGraph, ConfigError> {
        let mut seen = HashSet::new();
        for (key, node) in &self.resources {
            validate_key(key)?;
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateResource { key: key.clone() });
            }
            for nested in node.nested.iter().chain(&node.tier3) {
                validate_key(nested)?;
            }
            if !node.tier3.is_empty() && node.nested.is_empty() {
                return Err(ConfigError::OrphanTierThree { key: key.clone() });
            }
        }
        for category in &self.no_identifier {
            validate_key(category)?;
        }

        Ok(ResourceGraph {
            resources: self.resources,
            no_identifier: self.no_identifier.into_iter().collect(),
        })
    }
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    let mut chars = key.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidResourceKey {
            key: key.to_string(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDocument {
    resources: OrderedResources,
    #[serde(default)]
    no_identifier_resources: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeDocument {
    Plain(Vec<String>),
    Tiered {
        #[serde(default)]
        nested: Vec<String>,
        #[serde(default)]
        tier3: Vec<String>,
    },
}

/// Resource entries in document order, duplicates included.
struct OrderedResources(Vec<(String, NodeDocument)>);

impl<'de> Deserialize<'de> for OrderedResources {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedResources;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of resource keys to nested resources")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, NodeDocument>()? {
                    entries.push(entry);
                }
                Ok(OrderedResources(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph_loads() {
        let graph = ResourceGraph::shopify_default().unwrap();
        assert_eq!(graph.len(), 9);

        let keys: Vec<&str> = graph.resources().map(|(k, _)| k).collect();
        assert_eq!(keys[0], "products");
        assert_eq!(keys[8], "metafields");

        let orders = graph.get("orders").unwrap();
        assert_eq!(orders.nested(), ["transactions", "fulfillments", "risks"]);
        assert_eq!(orders.tier3(), ["events"]);
        assert!(graph.is_no_identifier("themesAssets"));
        assert!(graph.get("smartCollections").unwrap().nested().is_empty());
    }

    #[test]
    fn test_json_accepts_plain_and_object_nodes() {
        let graph = ResourceGraph::from_json(
            r#"{
                "resources": {
                    "customers": ["addresses"],
                    "orders": { "nested": ["risks"], "tier3": ["events"] }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.get("customers").unwrap().nested(), ["addresses"]);
        assert_eq!(graph.get("orders").unwrap().tier3(), ["events"]);
        assert!(!graph.is_no_identifier("customersAddresses"));
    }

    #[test]
    fn test_json_preserves_declaration_order() {
        let graph = ResourceGraph::from_json(
            r#"{ "resources": { "zebras": [], "apples": [], "mangos": [] } }"#,
        )
        .unwrap();
        let keys: Vec<&str> = graph.resources().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zebras", "apples", "mangos"]);
    }

    #[test]
    fn test_json_rejects_duplicate_resources() {
        let result = ResourceGraph::from_json(
            r#"{ "resources": { "pages": [], "pages": ["metafields"] } }"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateResource { key }) if key == "pages"
        ));
    }

    #[test]
    fn test_json_rejects_wrong_shape() {
        let result = ResourceGraph::from_json(r#"{ "resources": ["products"] }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidResourceGraph { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_invalid_keys() {
        let result = ResourceGraph::builder()
            .resource("smart_collections", Vec::<String>::new())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidResourceKey { key }) if key == "smart_collections"
        ));

        let result = ResourceGraph::builder()
            .resource("products", ["Images"])
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidResourceKey { .. })));
    }

    #[test]
    fn test_builder_rejects_tier3_without_nested() {
        let result = ResourceGraph::builder()
            .resource_with_tier3("orders", Vec::<String>::new(), ["events"])
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::OrphanTierThree { key }) if key == "orders"
        ));
    }

    #[test]
    fn test_empty_graph() {
        let graph = ResourceGraph::builder().build().unwrap();
        assert!(graph.is_empty());
        assert!(!graph.contains("products"));
    }
}
