//! Resolution error types.
//!
//! Every variant is produced before any I/O takes place, and carries the
//! key and action it failed on so a caller can tell a wrong endpoint name from
//! a request the remote service rejected.

use std::fmt;

use thiserror::Error;

use crate::endpoints::Action;

/// Why a tier-2 or tier-3 key could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidEndpointReason {
    /// No top-level resource prefixes the combined key.
    NoTierOneMatch,
    /// The parent category has not been resolved with an identifier yet.
    ParentNotResolved {
        /// The parent category key.
        parent: String,
    },
    /// The nested key is not declared under the parent resource.
    UnknownNested {
        /// The nested key that failed to match.
        nested: String,
    },
    /// The action needs an identifier the call did not supply.
    MissingIdentifier,
    /// The suffix has no meaning for the action.
    UnsupportedSuffix {
        /// The offending suffix keyword.
        suffix: &'static str,
    },
    /// More identifiers were supplied than the key has tiers.
    TooManyIdentifiers {
        /// How many identifiers the key accepts.
        accepted: usize,
        /// How many were supplied.
        supplied: usize,
    },
}

impl fmt::Display for InvalidEndpointReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTierOneMatch => f.write_str("no top-level resource matches this key"),
            Self::ParentNotResolved { parent } => {
                write!(f, "parent category '{parent}' must be resolved with an identifier first")
            }
            Self::UnknownNested { nested } => {
                write!(f, "'{nested}' is not a nested resource of this category")
            }
            Self::MissingIdentifier => f.write_str("an identifier is required"),
            Self::UnsupportedSuffix { suffix } => {
                write!(f, "suffix '{suffix}' is not valid for this action")
            }
            Self::TooManyIdentifiers { accepted, supplied } => {
                write!(f, "{supplied} identifiers supplied but at most {accepted} accepted")
            }
        }
    }
}

/// Error type for name parsing and endpoint resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The call name has no recognised action keyword.
    #[error("Cannot parse call name '{name}': expected a get, create, modify or delete action followed by a resource")]
    Parse {
        /// The call name as given.
        name: String,
    },

    /// The key is not a top-level resource in the graph.
    #[error("Unknown resource '{key}' for {action}")]
    UnknownResource {
        /// The resource key that was looked up.
        key: String,
        /// The attempted action.
        action: Action,
    },

    /// The key does not match a declared nesting, or tiers were resolved out of order.
    #[error("Invalid endpoint '{key}' for {action}: {reason}")]
    InvalidEndpoint {
        /// The offending key.
        key: String,
        /// The attempted action.
        action: Action,
        /// What went wrong.
        reason: InvalidEndpointReason,
    },
}

impl EndpointError {
    /// Returns the key the error refers to (the call name for parse errors).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Parse { name } => name,
            Self::UnknownResource { key, .. } | Self::InvalidEndpoint { key, .. } => key,
        }
    }

    /// Returns the attempted action, when one was recognised.
    #[must_use]
    pub const fn action(&self) -> Option<Action> {
        match self {
            Self::Parse { .. } => None,
            Self::UnknownResource { action, .. } | Self::InvalidEndpoint { action, .. } => {
                Some(*action)
            }
        }
    }
}

// Verify EndpointError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EndpointError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_the_call() {
        let error = EndpointError::Parse {
            name: "fetchProducts".to_string(),
        };
        assert!(error.to_string().contains("fetchProducts"));
        assert_eq!(error.key(), "fetchProducts");
        assert_eq!(error.action(), None);
    }

    #[test]
    fn test_invalid_endpoint_carries_key_action_and_reason() {
        let error = EndpointError::InvalidEndpoint {
            key: "ordersFulfillmentsEvents".to_string(),
            action: Action::Get,
            reason: InvalidEndpointReason::ParentNotResolved {
                parent: "ordersFulfillments".to_string(),
            },
        };
        let message = error.to_string();
        assert!(message.contains("ordersFulfillmentsEvents"));
        assert!(message.contains("get"));
        assert!(message.contains("ordersFulfillments' must be resolved"));
        assert_eq!(error.action(), Some(Action::Get));
    }

    #[test]
    fn test_too_many_identifiers_reason_message() {
        let reason = InvalidEndpointReason::TooManyIdentifiers {
            accepted: 1,
            supplied: 2,
        };
        assert_eq!(
            reason.to_string(),
            "2 identifiers supplied but at most 1 accepted"
        );
    }
}
