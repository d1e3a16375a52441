//! Dispatch error types.
//!
//! Every variant except [`DispatchError::Http`] and [`DispatchError::Decode`]
//! is raised before the transport is called.
//!
//! # Example
//!
//! ```rust
//! use shopify_endpoints::{Action, DispatchError};
//!
//! let error = DispatchError::MissingBody {
//!     key: "products".to_string(),
//!     action: Action::Create,
//! };
//! assert!(error.to_string().contains("products"));
//! assert!(!error.is_transport());
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::endpoints::{Action, EndpointError};

/// Error type for symbolic call dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The call name or resource path could not be resolved.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// A create or modify call was made without a body keyed by the resource.
    #[error("Cannot {action} '{key}' without a request body. Pass a map with a single key naming the resource, e.g. {{\"product\": {{...}}}}.")]
    MissingBody {
        /// The resolved category key.
        key: String,
        /// The attempted action.
        action: Action,
    },

    /// A positional argument has an unsupported shape.
    #[error("Invalid argument at position {index}: {reason}")]
    InvalidArgument {
        /// Zero-based position in the argument list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The authentication context is not active.
    #[error("Session for '{shop}' is not active. Re-authenticate before calling the API.")]
    Unauthenticated {
        /// The shop the context belongs to.
        shop: String,
    },

    /// The transport failed or the API answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A successful response body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DispatchError {
    /// Returns `true` if the error came from the transport or the response,
    /// i.e. after a request was sent.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Decode(_))
    }

    /// Returns the HTTP status code of a response error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

// Verify DispatchError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DispatchError>();
};
