//! Endpoint resolution engine.
//!
//! Turns a symbolic call name into a host-relative REST path:
//!
//! 1. [`NameParser`] splits `getProductImagesById` into an [`Action`], the
//!    resource path `productImages` and the [`Suffix`] `ById`
//! 2. [`EndpointResolver`] matches the path against the [`ResourceGraph`],
//!    resolving the top-level category, then the nested one, attaching one
//!    identifier per tier
//! 3. The resolved [`ResolvedCategory`] supplies the URI for the action
//!
//! ```rust
//! use std::sync::Arc;
//! use shopify_endpoints::{EndpointResolver, NameParser, ResourceGraph};
//!
//! let parsed = NameParser::default().parse("getProductImagesById").unwrap();
//!
//! let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
//! let mut resolver = EndpointResolver::new(graph);
//! let uri = resolver
//!     .resolve(parsed.action, &parsed.endpoint_key, &[123, 456])
//!     .unwrap();
//!
//! assert_eq!(uri, "/products/123/images/456");
//! ```

pub(crate) mod case;
mod errors;
mod graph;
mod name;
mod resolver;

pub use errors::{EndpointError, InvalidEndpointReason};
pub use graph::{ResourceGraph, ResourceGraphBuilder, ResourceNode};
pub use name::{Action, KeywordMatching, NameParser, ParsedName, Suffix};
pub use resolver::{EndpointResolver, Resolution, ResolvedCategory, MAX_IDENTIFIERS};
