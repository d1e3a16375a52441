//! Symbolic call dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::auth::{AuthContext, Session};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, Transport, SDK_VERSION};
use crate::config::ShopifyConfig;
use crate::dispatch::args::{partition, CallArg};
use crate::dispatch::{DispatchError, QueryString, ResolvedRequest};
use crate::endpoints::case::{singular, to_camel_case};
use crate::endpoints::{EndpointResolver, NameParser, Resolution, ResourceGraph};

/// Turns symbolic calls like `getProductImagesById` into one HTTP call each.
///
/// A dispatcher owns its resolver, so calls through one dispatcher share a
/// category cache and must not overlap; `prepare` and `invoke` take
/// `&mut self`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use serde_json::json;
/// use shopify_endpoints::{
///     AccessToken, CallDispatcher, ResourceGraph, Session, ShopDomain, ShopifyConfig,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Session::new(
///     ShopDomain::new("my-store")?,
///     AccessToken::new("shpat_123")?,
///     "read_products".parse()?,
///     None,
/// );
/// let graph = Arc::new(ResourceGraph::shopify_default()?);
/// let mut dispatcher = CallDispatcher::new(ShopifyConfig::default(), session, graph)?;
///
/// let images = dispatcher
///     .invoke_json("getProductImages", vec![json!(632910392)])
///     .await?;
/// println!("{images}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CallDispatcher<A = Session, T = HttpClient> {
    config: ShopifyConfig,
    auth: A,
    transport: T,
    parser: NameParser,
    resolver: EndpointResolver,
    base_uri: String,
}

impl<A: AuthContext> CallDispatcher<A, HttpClient> {
    /// Creates a dispatcher sending through a reqwest [`HttpClient`] that
    /// makes up to `config.tries()` attempts per request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Http`] if the HTTP client cannot be built.
    pub fn new(
        config: ShopifyConfig,
        auth: A,
        graph: Arc<ResourceGraph>,
    ) -> Result<Self, DispatchError> {
        let transport = HttpClient::new(config.tries())?;
        Ok(Self::with_transport(config, auth, graph, transport))
    }
}

impl<A: AuthContext, T: Transport> CallDispatcher<A, T> {
    /// Creates a dispatcher sending through the given transport.
    #[must_use]
    pub fn with_transport(
        config: ShopifyConfig,
        auth: A,
        graph: Arc<ResourceGraph>,
        transport: T,
    ) -> Self {
        let matching = config.keyword_matching();
        let base_uri = config
            .api_host()
            .map_or_else(|| auth.shop().origin(), |host| host.as_ref().to_string());
        if let Some(host) = config.api_host() {
            tracing::debug!(
                "Using api_host {} for shop {}",
                host.as_ref(),
                auth.shop().as_ref()
            );
        }

        Self {
            parser: NameParser::new(matching),
            resolver: EndpointResolver::with_matching(graph, matching),
            base_uri,
            config,
            auth,
            transport,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopifyConfig {
        &self.config
    }

    /// Returns the authentication context.
    #[must_use]
    pub const fn auth(&self) -> &A {
        &self.auth
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the resolver and its category cache.
    #[must_use]
    pub const fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Returns the scheme and host requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Resolves a get endpoint key directly, e.g. `productImagesCount`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Endpoint`] if the key does not resolve.
    pub fn resolve(&mut self, key: &str, ids: &[u64]) -> Result<String, DispatchError> {
        Ok(self.resolver.resolve_get(key, ids)?)
    }

    /// Resolves a call without sending it.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Endpoint`] if the name or path does not resolve
    /// - [`DispatchError::MissingBody`] for create and modify without a body
    /// - [`DispatchError::InvalidArgument`] for a second body or a non-object body
    pub fn prepare(
        &mut self,
        name: &str,
        args: Vec<CallArg>,
    ) -> Result<ResolvedRequest, DispatchError> {
        let parsed = self.parser.parse(name)?;
        let action = parsed.action;
        let parts = partition(args);

        let resolution = self
            .resolver
            .resolve_endpoint(action, &parsed.endpoint_key, &parts.ids)?;

        let mut uri = resolution.uri.clone();
        for (index, literal) in &parts.literals {
            append_literal(&mut uri, *index, literal)?;
        }

        let mut body: Option<(String, Map<String, Value>)> = None;
        let mut query = QueryString::default();
        for (index, map) in parts.maps {
            if !action.takes_body() || !names_category(&map, &resolution) {
                query.extend_map(&map);
                continue;
            }
            if body.is_some() {
                return Err(DispatchError::InvalidArgument {
                    index,
                    reason: format!(
                        "a request body for '{}' was already given",
                        resolution.category
                    ),
                });
            }
            let Some((envelope, inner)) = map.into_iter().next() else {
                continue;
            };
            let Value::Object(fields) = inner else {
                return Err(DispatchError::InvalidArgument {
                    index,
                    reason: format!("the '{envelope}' body must be an object"),
                });
            };
            body = Some((envelope, fields));
        }

        if action.takes_body() && body.is_none() {
            return Err(DispatchError::MissingBody {
                key: resolution.category,
                action,
            });
        }

        let (envelope, body) = body.unzip();
        let request = ResolvedRequest {
            action,
            method: action.http_method(),
            uri,
            query: (!query.is_empty()).then_some(query),
            body,
            envelope,
            category: resolution.category,
        };
        tracing::debug!(
            name,
            method = %request.method,
            path = %request.path_and_query(),
            "prepared call"
        );
        Ok(request)
    }

    /// Resolves a call and sends it, returning the decoded response body.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Unauthenticated`] if the session is not active
    /// - any [`prepare`](Self::prepare) error, before the transport is called
    /// - [`DispatchError::Http`] for transport failures and non-2xx responses
    /// - [`DispatchError::Decode`] if a 2xx body is not JSON
    pub async fn invoke(&mut self, name: &str, args: Vec<CallArg>) -> Result<Value, DispatchError> {
        self.ensure_active()?;
        let resolved = self.prepare(name, args)?;
        let request = self.http_request(&resolved)?;
        self.send(request).await
    }

    /// Like [`invoke`](Self::invoke), taking JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArgument`] for a value that is not an
    /// object, a non-negative integer or a string, then as `invoke`.
    pub async fn invoke_json(
        &mut self,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, DispatchError> {
        let args = CallArg::from_json_args(args)?;
        self.invoke(name, args).await
    }

    /// Sends a GET to an arbitrary admin path such as `shop` or
    /// `products/1/metafields`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArgument`] for an empty path, and the
    /// [`invoke`](Self::invoke) transport errors.
    pub async fn get_raw(
        &self,
        path: &str,
        query: Option<&Map<String, Value>>,
    ) -> Result<Value, DispatchError> {
        self.ensure_active()?;

        let path = path.trim_start_matches('/');
        let path = path.strip_suffix(".json").unwrap_or(path);
        if path.is_empty() {
            return Err(DispatchError::InvalidArgument {
                index: 0,
                reason: "the request path is empty".to_string(),
            });
        }

        let mut wire_path = format!("/{path}.json");
        if let Some(query) = query.map(QueryString::from_map).filter(|q| !q.is_empty()) {
            wire_path.push('?');
            wire_path.push_str(&query.to_string());
        }

        let request = HttpRequest::builder(HttpMethod::Get, self.url(&wire_path))
            .headers(self.headers(false))
            .build()
            .map_err(HttpError::from)?;
        self.send(request).await
    }

    /// Fetches the shop record for the authenticated shop.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Decode`] if the response has no `shop`
    /// object, and the [`get_raw`](Self::get_raw) errors.
    pub async fn fetch_shop(&self) -> Result<Value, DispatchError> {
        let mut response = self.get_raw("shop", None).await?;
        response
            .get_mut("shop")
            .map(Value::take)
            .filter(Value::is_object)
            .ok_or_else(|| {
                DispatchError::Decode(serde::de::Error::custom(
                    "response has no 'shop' object",
                ))
            })
    }

    /// Builds the wire request for a resolved call.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Http`] if the request fails validation.
    pub fn http_request(&self, resolved: &ResolvedRequest) -> Result<HttpRequest, DispatchError> {
        let wire_body = resolved.wire_body();
        let mut builder = HttpRequest::builder(resolved.method, self.url(&resolved.wire_path()))
            .headers(self.headers(wire_body.is_some()));
        if let Some(body) = wire_body {
            builder = builder.body(body);
        }
        Ok(builder.build().map_err(HttpError::from)?)
    }

    fn ensure_active(&self) -> Result<(), DispatchError> {
        if self.auth.is_active() {
            Ok(())
        } else {
            Err(DispatchError::Unauthenticated {
                shop: self.auth.shop().as_ref().to_string(),
            })
        }
    }

    fn url(&self, wire_path: &str) -> String {
        format!("{}{}{wire_path}", self.base_uri, self.config.admin_path())
    }

    fn headers(&self, with_body: bool) -> HashMap<String, String> {
        let user_agent_prefix = self
            .config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Shopify Endpoints v{SDK_VERSION} | Rust {rust_version}");

        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), user_agent);
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert(
            "X-Shopify-Access-Token".to_string(),
            self.auth.access_token().as_ref().to_string(),
        );
        if self.config.api_host().is_some() {
            headers.insert("Host".to_string(), self.auth.shop().as_ref().to_string());
        }
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, DispatchError> {
        tracing::debug!(method = %request.http_method, url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        if !response.is_ok() {
            return Err(HttpError::Response(response.to_error()).into());
        }
        Ok(response.json()?)
    }
}

/// Appends a literal argument to `uri` as percent-encoded path segments.
///
/// Interior `/` separates segments. Empty segments, `..`, `?` and `#` are
/// rejected.
fn append_literal(uri: &mut String, index: usize, literal: &str) -> Result<(), DispatchError> {
    let invalid = |reason: &str| DispatchError::InvalidArgument {
        index,
        reason: format!("path literal '{literal}' {reason}"),
    };

    if literal.contains(['?', '#']) {
        return Err(invalid("must not contain '?' or '#'"));
    }
    let trimmed = literal.trim_matches('/');
    if trimmed.is_empty() {
        return Err(invalid("is empty"));
    }
    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(invalid("contains an empty segment"));
        }
        if segment.contains("..") {
            return Err(invalid("must not contain '..'"));
        }
        uri.push('/');
        uri.push_str(&urlencoding::encode(segment));
    }
    Ok(())
}

/// Returns `true` if `map` has a single key naming the resolved category:
/// the top-level or leaf resource, plural or singular, camel or snake case.
fn names_category(map: &Map<String, Value>, resolution: &Resolution) -> bool {
    if map.len() != 1 {
        return false;
    }
    let Some(key) = map.keys().next() else {
        return false;
    };
    let key = to_camel_case(key);
    [&resolution.tier_one, &resolution.leaf]
        .into_iter()
        .any(|name| key == *name || key == singular(name))
}
