//! Tiered endpoint resolution.
//!
//! [`EndpointResolver`] walks a resource path through the [`ResourceGraph`]:
//! the top-level resource first, then a nested resource, then a tier-3
//! resource, attaching one identifier per tier. Each category it builds is
//! cached by its canonical key (`products`, `productsImages`,
//! `ordersFulfillmentsEvents`) for the lifetime of the resolver.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::endpoints::case::{
    at_word_boundary, lower_first, pascal_boundaries, singular, to_snake_case, upper_first,
};
use crate::endpoints::name::split_suffix;
use crate::endpoints::{
    Action, EndpointError, InvalidEndpointReason, KeywordMatching, ResourceGraph, ResourceNode,
    Suffix,
};

/// Maximum identifiers a resource path accepts, one per tier.
pub const MAX_IDENTIFIERS: usize = 3;

/// The URIs of one resolved category.
///
/// `by_id` exists only when the category was resolved with an identifier;
/// nested tiers are built on top of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCategory {
    key: String,
    uri_base: String,
    id: Option<u64>,
    count: String,
    search: String,
    by_id: Option<String>,
    no_identifier: bool,
}

impl ResolvedCategory {
    fn new(key: String, uri_base: String, id: Option<u64>, no_identifier: bool) -> Self {
        Self {
            count: format!("{uri_base}/count"),
            search: format!("{uri_base}/search"),
            by_id: id.map(|id| format!("{uri_base}/{id}")),
            key,
            uri_base,
            id,
            no_identifier,
        }
    }

    /// Returns the canonical category key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the collection path, e.g. `/products/1/images`.
    #[must_use]
    pub fn uri_base(&self) -> &str {
        &self.uri_base
    }

    /// Returns the identifier the category was resolved with.
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    /// Returns the collection URI.
    #[must_use]
    pub fn all(&self) -> &str {
        &self.uri_base
    }

    /// Returns the count URI.
    #[must_use]
    pub fn count(&self) -> &str {
        &self.count
    }

    /// Returns the search URI.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the single-resource URI, if an identifier was supplied.
    #[must_use]
    pub fn by_id(&self) -> Option<&str> {
        self.by_id.as_deref()
    }

    /// Returns the URI new resources are posted to.
    #[must_use]
    pub fn create(&self) -> &str {
        &self.uri_base
    }

    /// Returns the URI modify and delete act on: `by_id`, or the bare
    /// collection path for a no-identifier category.
    #[must_use]
    pub fn modify_target(&self) -> Option<&str> {
        self.by_id()
            .or_else(|| self.no_identifier.then_some(self.uri_base.as_str()))
    }

    /// Selects the URI for an action and optional suffix.
    ///
    /// # Errors
    ///
    /// Returns the reason when the action needs an identifier the category
    /// lacks, or the suffix does not apply to the action.
    pub fn uri_for(
        &self,
        action: Action,
        suffix: Option<Suffix>,
    ) -> Result<&str, InvalidEndpointReason> {
        let unsupported = |suffix: Suffix| InvalidEndpointReason::UnsupportedSuffix {
            suffix: suffix.keyword(),
        };

        match (action, suffix) {
            (Action::Get, Some(Suffix::All)) => Ok(self.all()),
            (Action::Get, Some(Suffix::Count)) => Ok(self.count()),
            (Action::Get, Some(Suffix::Search)) => Ok(self.search()),
            (Action::Get, Some(Suffix::ById)) => {
                self.by_id().ok_or(InvalidEndpointReason::MissingIdentifier)
            }
            (Action::Get, None) => Ok(self.by_id().unwrap_or(self.all())),
            (Action::Create, None | Some(Suffix::All)) => Ok(self.create()),
            (Action::Modify | Action::Delete, None | Some(Suffix::ById)) => self
                .modify_target()
                .ok_or(InvalidEndpointReason::MissingIdentifier),
            (_, Some(other)) => Err(unsupported(other)),
        }
    }
}

/// The outcome of resolving one resource path for one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Host-relative URI without query string.
    pub uri: String,
    /// Canonical key of the deepest category.
    pub category: String,
    /// The top-level resource key.
    pub tier_one: String,
    /// The deepest resource key (equal to `tier_one` for top-level paths).
    pub leaf: String,
}

/// Resolves resource paths to URIs, caching categories as it goes.
///
/// Resolution mutates the cache, so one resolver serves one call chain.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use shopify_endpoints::{Action, EndpointResolver, ResourceGraph};
///
/// let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
/// let mut resolver = EndpointResolver::new(graph);
///
/// let uri = resolver
///     .resolve(Action::Get, "ordersFulfillmentsEvents", &[1, 2, 3])
///     .unwrap();
/// assert_eq!(uri, "/orders/1/fulfillments/2/events/3");
/// ```
#[derive(Debug)]
pub struct EndpointResolver {
    graph: Arc<ResourceGraph>,
    matching: KeywordMatching,
    cache: HashMap<String, ResolvedCategory>,
}

impl EndpointResolver {
    /// Creates a resolver with anchored keyword matching.
    #[must_use]
    pub fn new(graph: Arc<ResourceGraph>) -> Self {
        Self::with_matching(graph, KeywordMatching::default())
    }

    /// Creates a resolver with the given keyword matching mode.
    #[must_use]
    pub fn with_matching(graph: Arc<ResourceGraph>, matching: KeywordMatching) -> Self {
        Self {
            graph,
            matching,
            cache: HashMap::new(),
        }
    }

    /// Returns the graph being resolved against.
    #[must_use]
    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    /// Returns the keyword matching mode.
    #[must_use]
    pub const fn matching(&self) -> KeywordMatching {
        self.matching
    }

    /// Returns a cached category.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&ResolvedCategory> {
        self.cache.get(key)
    }

    /// Returns how many categories are cached.
    #[must_use]
    pub fn cached_categories(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached category.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolves a top-level resource.
    ///
    /// Errors from the direct tier methods are reported against
    /// [`Action::Get`].
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::UnknownResource`] if `name` is not in the graph.
    pub fn resolve_tier_one(
        &mut self,
        name: &str,
        id: Option<u64>,
    ) -> Result<&ResolvedCategory, EndpointError> {
        self.tier_one(Action::Get, name, id)
    }

    /// Resolves a nested category such as `productsImages` or
    /// `ordersFulfillmentsEvents`, returning the deepest category.
    ///
    /// The top-level parent must already be resolved with an identifier.
    /// A tier-3 key also resolves its tier-2 category with `id`, which is
    /// then required.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidEndpoint`] if no top-level resource
    /// prefixes the key, the parent is unresolved, or the remainder is not a
    /// declared nesting.
    pub fn resolve_tier_two(
        &mut self,
        combined: &str,
        id: Option<u64>,
        tier3_id: Option<u64>,
    ) -> Result<&ResolvedCategory, EndpointError> {
        let (tier_one, rest) =
            self.match_tier_one(combined)
                .ok_or_else(|| EndpointError::InvalidEndpoint {
                    key: combined.to_string(),
                    action: Action::Get,
                    reason: InvalidEndpointReason::NoTierOneMatch,
                })?;
        self.tier_two(Action::Get, combined, &tier_one, &rest, id, tier3_id)
            .map(|(category, _)| category)
    }

    /// Resolves an endpoint key (suffix allowed) to the action's URI.
    ///
    /// # Errors
    ///
    /// See [`resolve_endpoint`](Self::resolve_endpoint).
    pub fn resolve(
        &mut self,
        action: Action,
        key: &str,
        ids: &[u64],
    ) -> Result<String, EndpointError> {
        self.resolve_endpoint(action, key, ids)
            .map(|resolution| resolution.uri)
    }

    /// Resolves a get endpoint key, e.g. `productsCount` or `productImagesById`.
    ///
    /// # Errors
    ///
    /// See [`resolve_endpoint`](Self::resolve_endpoint).
    pub fn resolve_get(&mut self, key: &str, ids: &[u64]) -> Result<String, EndpointError> {
        self.resolve(Action::Get, key, ids)
    }

    /// Walks tier 1, 2 and 3, consuming `ids` in order, and selects the URI
    /// for `action`.
    ///
    /// # Errors
    ///
    /// - [`EndpointError::UnknownResource`] if no top-level resource matches
    /// - [`EndpointError::InvalidEndpoint`] for an undeclared nesting, a
    ///   missing identifier, a suffix the action does not support, or more
    ///   identifiers than tiers
    pub fn resolve_endpoint(
        &mut self,
        action: Action,
        key: &str,
        ids: &[u64],
    ) -> Result<Resolution, EndpointError> {
        let invalid = |reason| EndpointError::InvalidEndpoint {
            key: key.to_string(),
            action,
            reason,
        };

        if ids.len() > MAX_IDENTIFIERS {
            return Err(invalid(InvalidEndpointReason::TooManyIdentifiers {
                accepted: MAX_IDENTIFIERS,
                supplied: ids.len(),
            }));
        }

        let (path, suffix) = split_suffix(self.matching, key);
        let (tier_one, rest) =
            self.match_tier_one(&path)
                .ok_or_else(|| EndpointError::UnknownResource {
                    key: path.clone(),
                    action,
                })?;

        let tier_one_id = ids.first().copied();
        let (category, leaf) = if rest.is_empty() {
            if ids.len() > 1 {
                return Err(invalid(InvalidEndpointReason::TooManyIdentifiers {
                    accepted: 1,
                    supplied: ids.len(),
                }));
            }
            (self.tier_one(action, &tier_one, tier_one_id)?, tier_one.clone())
        } else {
            self.tier_one(action, &tier_one, tier_one_id)?;
            self.tier_two(
                action,
                key,
                &tier_one,
                &rest,
                ids.get(1).copied(),
                ids.get(2).copied(),
            )?
        };

        let uri = category.uri_for(action, suffix).map_err(invalid)?.to_string();
        let category = category.key().to_string();
        tracing::debug!(%action, key, %uri, "resolved endpoint");

        Ok(Resolution {
            uri,
            category,
            tier_one,
            leaf,
        })
    }

    fn tier_one(
        &mut self,
        action: Action,
        name: &str,
        id: Option<u64>,
    ) -> Result<&ResolvedCategory, EndpointError> {
        if !self.graph.contains(name) {
            return Err(EndpointError::UnknownResource {
                key: name.to_string(),
                action,
            });
        }
        let uri_base = format!("/{}", to_snake_case(name));
        Ok(self.cache_category(name.to_string(), uri_base, id))
    }

    fn tier_two(
        &mut self,
        action: Action,
        key: &str,
        tier_one: &str,
        rest: &str,
        id: Option<u64>,
        tier3_id: Option<u64>,
    ) -> Result<(&ResolvedCategory, String), EndpointError> {
        let invalid = |reason| EndpointError::InvalidEndpoint {
            key: key.to_string(),
            action,
            reason,
        };

        let nested = lower_first(rest);
        if nested.is_empty() {
            return Err(invalid(InvalidEndpointReason::UnknownNested { nested }));
        }

        let parent_by_id = self
            .cache
            .get(tier_one)
            .and_then(ResolvedCategory::by_id)
            .map(str::to_string)
            .ok_or_else(|| {
                invalid(InvalidEndpointReason::ParentNotResolved {
                    parent: tier_one.to_string(),
                })
            })?;

        let graph = Arc::clone(&self.graph);
        let node = graph
            .get(tier_one)
            .ok_or_else(|| invalid(InvalidEndpointReason::NoTierOneMatch))?;

        if let Some(member) = match_member(node.nested(), &nested) {
            if tier3_id.is_some() {
                return Err(invalid(InvalidEndpointReason::TooManyIdentifiers {
                    accepted: 2,
                    supplied: 3,
                }));
            }
            let category_key = format!("{tier_one}{}", upper_first(member));
            let uri_base = format!("{parent_by_id}/{}", to_snake_case(member));
            let category = self.cache_category(category_key, uri_base, id);
            return Ok((category, member.to_string()));
        }

        let (second, third) = split_tier_three(node, &nested).ok_or_else(|| {
            invalid(InvalidEndpointReason::UnknownNested {
                nested: nested.clone(),
            })
        })?;

        let tier_two_key = format!("{tier_one}{}", upper_first(second));
        let Some(id) = id else {
            return Err(invalid(InvalidEndpointReason::ParentNotResolved {
                parent: tier_two_key,
            }));
        };
        let tier_two_base = format!("{parent_by_id}/{}", to_snake_case(second));
        let tier_two_by_id = self
            .cache_category(tier_two_key.clone(), tier_two_base, Some(id))
            .by_id()
            .map(str::to_string)
            .ok_or_else(|| {
                invalid(InvalidEndpointReason::ParentNotResolved {
                    parent: tier_two_key.clone(),
                })
            })?;

        let category_key = format!("{tier_two_key}{}", upper_first(third));
        let uri_base = format!("{tier_two_by_id}/{}", to_snake_case(third));
        let category = self.cache_category(category_key, uri_base, tier3_id);
        Ok((category, third.to_string()))
    }

    /// Finds the first declared top-level resource (plural, then singular)
    /// that matches `path`, returning it with the unmatched remainder.
    fn match_tier_one(&self, path: &str) -> Option<(String, String)> {
        for (key, _) in self.graph.resources() {
            let singular_key = singular(key);
            for candidate in [key, singular_key.as_str()] {
                let rest = match self.matching {
                    KeywordMatching::Anchored => path
                        .strip_prefix(candidate)
                        .filter(|rest| at_word_boundary(rest))
                        .map(str::to_string),
                    KeywordMatching::Substring => path
                        .contains(candidate)
                        .then(|| path.replacen(candidate, "", 1)),
                };
                if let Some(rest) = rest {
                    return Some((key.to_string(), rest));
                }
            }
        }
        None
    }

    fn cache_category(
        &mut self,
        key: String,
        uri_base: String,
        id: Option<u64>,
    ) -> &ResolvedCategory {
        let no_identifier = self.graph.is_no_identifier(&key);
        match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                let cached = entry.into_mut();
                if cached.id == id && cached.uri_base == uri_base {
                    tracing::debug!(category = %cached.key, "category cache hit");
                } else {
                    tracing::debug!(category = %cached.key, ?id, "rebuilding cached category");
                    *cached =
                        ResolvedCategory::new(cached.key.clone(), uri_base, id, no_identifier);
                }
                cached
            }
            Entry::Vacant(entry) => {
                tracing::debug!(category = %entry.key(), %uri_base, ?id, "caching category");
                let category =
                    ResolvedCategory::new(entry.key().clone(), uri_base, id, no_identifier);
                entry.insert(category)
            }
        }
    }
}

/// Matches a nested key against declared members, accepting the singular.
fn match_member<'a>(members: &'a [String], key: &str) -> Option<&'a str> {
    members
        .iter()
        .find(|member| member.as_str() == key)
        .or_else(|| members.iter().find(|member| singular(member) == key))
        .map(String::as_str)
}

/// Splits `fulfillmentsEvents` into a tier-2 member and a tier-3 member.
fn split_tier_three<'a>(node: &'a ResourceNode, nested: &str) -> Option<(&'a str, &'a str)> {
    pascal_boundaries(nested).find_map(|at| {
        let second = match_member(node.nested(), &nested[..at])?;
        let third = match_member(node.tier3(), &lower_first(&nested[at..]))?;
        Some((second, third))
    })
}
