//! Symbolic call dispatch.
//!
//! [`CallDispatcher::invoke`] takes a call name and positional
//! [`CallArg`]s and makes exactly one HTTP call:
//!
//! - integer arguments are tier identifiers, consumed in order
//! - string arguments are literal path segments appended after resolution
//! - for create and modify, the map whose single key names the resource is
//!   the request body; every other map is merged into the query string
//!
//! Resolution and argument errors are raised before the transport is called.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use shopify_endpoints::{
//!     AccessToken, CallArg, CallDispatcher, ResourceGraph, Session, ShopDomain, ShopifyConfig,
//! };
//!
//! let session = Session::new(
//!     ShopDomain::new("my-store").unwrap(),
//!     AccessToken::new("shpat_123").unwrap(),
//!     "write_products".parse().unwrap(),
//!     None,
//! );
//! let graph = Arc::new(ResourceGraph::shopify_default().unwrap());
//! let mut dispatcher = CallDispatcher::new(ShopifyConfig::default(), session, graph).unwrap();
//!
//! let args = CallArg::from_json_args(vec![json!({"product": {"title": "T"}})]).unwrap();
//! let request = dispatcher.prepare("createProduct", args).unwrap();
//! assert_eq!(request.uri, "/products");
//! assert_eq!(request.wire_body(), Some(json!({"product": {"title": "T"}})));
//! ```

mod args;
mod dispatcher;
mod errors;
mod request;

pub use args::CallArg;
pub use dispatcher::CallDispatcher;
pub use errors::DispatchError;
pub use request::{QueryString, ResolvedRequest};
