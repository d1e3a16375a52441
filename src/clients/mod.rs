//! HTTP transport collaborator.
//!
//! The dispatcher hands a fully-built [`HttpRequest`] (method, absolute URL,
//! headers, optional JSON body) to a [`Transport`] and receives the raw
//! [`HttpResponse`] back.
//!
//! - [`Transport`]: the capability the dispatcher depends on
//! - [`HttpClient`]: the reqwest implementation, with 429/500 retries
//! - [`HttpError`]: transport failures, propagated unchanged by dispatch
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried after `Retry-After` seconds, or 1 second
//! - **500 (Server Error)**: retried after a fixed 1-second delay
//! - **Anything else**: returned immediately
//!
//! The default of one try disables retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
