//! # Shopify Endpoints
//!
//! Convention-based endpoint resolution and dispatch for the Shopify Admin
//! REST API.
//!
//! A call such as `getProductImagesById` with identifiers `123` and `456` is
//! decomposed into an action, a resource path and a suffix, resolved against a
//! declarative [`ResourceGraph`] into `/products/123/images/456`, and sent as
//! one authenticated HTTP request.
//!
//! ## Overview
//!
//! - [`ResourceGraph`]: which resources nest under which, loaded from JSON or
//!   built in code
//! - [`NameParser`]: splits call names into [`Action`], resource path and
//!   [`Suffix`]
//! - [`EndpointResolver`]: the tier-1/2/3 resolution engine with its
//!   per-category cache
//! - [`CallDispatcher`]: partitions call arguments into identifiers, path
//!   literals, body and query, then sends through a
//!   [`Transport`](clients::Transport)
//! - [`ShopifyConfig`], [`Session`]: configuration and the authentication
//!   context
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use shopify_endpoints::{
//!     AccessToken, CallDispatcher, ResourceGraph, Session, ShopDomain, ShopifyConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(
//!     ShopDomain::new("my-store")?,
//!     AccessToken::new("shpat_123")?,
//!     "read_products,write_products".parse()?,
//!     None,
//! );
//! let graph = Arc::new(ResourceGraph::shopify_default()?);
//! let mut shopify = CallDispatcher::new(ShopifyConfig::default(), session, graph)?;
//!
//! // GET /admin/api/2025-10/products/count.json
//! let count = shopify.invoke_json("getProductsCount", vec![]).await?;
//!
//! // POST /admin/api/2025-10/products.json
//! let created = shopify
//!     .invoke_json("createProduct", vec![json!({"product": {"title": "T"}})])
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolution Without I/O
//!
//! ```rust
//! use std::sync::Arc;
//! use shopify_endpoints::{EndpointResolver, ResourceGraph};
//!
//! let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
//! let mut resolver = EndpointResolver::new(graph);
//!
//! assert_eq!(
//!     resolver.resolve_get("productImagesById", &[123, 456]).unwrap(),
//!     "/products/123/images/456"
//! );
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the graph and configuration are passed explicitly
//! - **Fail-fast validation**: newtypes and graphs validate on construction
//! - **No wasted I/O**: every resolution error is raised before a request is sent
//! - **Async-first**: the transport is awaited on the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod endpoints;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{AuthContext, AuthScopes, Session};
pub use config::{AccessToken, ApiVersion, HostUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder};
pub use error::ConfigError;

// Re-export resolution and dispatch types
pub use dispatch::{CallArg, CallDispatcher, DispatchError, QueryString, ResolvedRequest};
pub use endpoints::{
    Action, EndpointError, EndpointResolver, InvalidEndpointReason, KeywordMatching, NameParser,
    ParsedName, ResolvedCategory, ResourceGraph, Suffix,
};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, MaxHttpRetriesExceededError, Transport,
};
