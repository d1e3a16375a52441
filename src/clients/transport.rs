//! The transport capability the dispatcher sends requests through.

use std::future::Future;

use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// Sends one [`HttpRequest`] and reports the raw [`HttpResponse`].
///
/// Implementations own network concerns: TLS, timeouts and retry policy.
/// A non-2xx status is a successful send; only failures to obtain a response
/// are errors. [`HttpClient`](crate::clients::HttpClient) is the stock
/// implementation; tests substitute recording fakes.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::clients::{HttpError, HttpRequest, HttpResponse, Transport};
/// use std::collections::HashMap;
///
/// struct AlwaysEmpty;
///
/// impl Transport for AlwaysEmpty {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(200, HashMap::new(), "{}"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends the request once the returned future is awaited.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(request)
    }
}
