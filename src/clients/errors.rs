//! Transport error types.
//!
//! - [`HttpResponseError`]: a non-2xx response from the API
//! - [`MaxHttpRetriesExceededError`]: retries for 429/500 were exhausted
//! - [`InvalidHttpRequestError`]: a request rejected before it was sent
//! - [`HttpError`]: the unified transport error
//!
//! # Example
//!
//! ```rust,ignore
//! match dispatcher.invoke("getProducts", vec![]).await {
//!     Err(DispatchError::Http(HttpError::Response(e))) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(DispatchError::Http(HttpError::Network(e))) => println!("Network error: {e}"),
//!     _ => {}
//! }
//! ```

use thiserror::Error;

/// A non-successful response from the API.
///
/// `message` holds a JSON object with whichever of `errors`, `error`,
/// `error_description` the response carried, plus an `error_reference`
/// naming the `X-Request-Id` when present.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Returned when every attempt at a 429/500-failing request was used up.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last status: {code}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// A request that failed validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request URL is not absolute.
    #[error("Request URL '{url}' must be absolute.")]
    RelativeUrl {
        /// The rejected URL.
        url: String,
    },
}

/// Unified error type for the transport collaborator.
///
/// Dispatch propagates this unchanged, wrapped in
/// [`DispatchError::Http`](crate::dispatch::DispatchError::Http).
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}
