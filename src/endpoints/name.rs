//! Call name parsing.
//!
//! A call name is an action keyword followed by a PascalCase resource path and
//! an optional suffix keyword:
//!
//! ```text
//! get  ProductImages  ById
//! ^^^  ^^^^^^^^^^^^^  ^^^^
//! action  resource    suffix
//! ```

use std::fmt;

use crate::clients::HttpMethod;
use crate::endpoints::case::{at_word_boundary, lower_first};
use crate::endpoints::EndpointError;

/// The four call actions, in keyword matching order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a collection or a single resource.
    Get,
    /// Create a resource.
    Create,
    /// Update a resource.
    Modify,
    /// Delete a resource.
    Delete,
}

impl Action {
    /// All actions in keyword matching order.
    pub const ALL: [Self; 4] = [Self::Get, Self::Create, Self::Modify, Self::Delete];

    /// Returns the keyword that starts a call name.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }

    /// Returns the HTTP verb the action is sent with.
    #[must_use]
    pub const fn http_method(self) -> HttpMethod {
        match self {
            Self::Get => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Modify => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns `true` for actions that send a request body.
    #[must_use]
    pub const fn takes_body(self) -> bool {
        matches!(self, Self::Create | Self::Modify)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Trailing keyword that selects one URI of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suffix {
    /// The collection.
    All,
    /// One resource by identifier.
    ById,
    /// The collection count.
    Count,
    /// The collection search endpoint.
    Search,
}

impl Suffix {
    /// All suffixes in keyword matching order.
    pub const ALL: [Self; 4] = [Self::All, Self::ById, Self::Count, Self::Search];

    /// Returns the keyword as it appears in call names.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::ById => "ById",
            Self::Count => "Count",
            Self::Search => "Search",
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How action, suffix and resource keywords are located in a call name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeywordMatching {
    /// The action must be a prefix and the suffix must end the name. Resource
    /// keys must prefix the path and end on a PascalCase boundary.
    #[default]
    Anchored,
    /// The first keyword found anywhere in the name wins, in declaration
    /// order.
    Substring,
}

/// A decomposed call name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedName {
    /// The requested action.
    pub action: Action,
    /// The name without its action, first letter lower-cased
    /// (`productImagesById`).
    pub endpoint_key: String,
    /// The endpoint key without its suffix (`productImages`).
    pub resource_path: String,
    /// The suffix keyword, if one was present.
    pub suffix: Option<Suffix>,
}

/// Parses call names such as `getProductImagesById`.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::{Action, NameParser, Suffix};
///
/// let parsed = NameParser::default().parse("getProductImagesById").unwrap();
/// assert_eq!(parsed.action, Action::Get);
/// assert_eq!(parsed.resource_path, "productImages");
/// assert_eq!(parsed.suffix, Some(Suffix::ById));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NameParser {
    matching: KeywordMatching,
}

impl NameParser {
    /// Creates a parser using the given matching mode.
    #[must_use]
    pub const fn new(matching: KeywordMatching) -> Self {
        Self { matching }
    }

    /// Returns the matching mode.
    #[must_use]
    pub const fn matching(&self) -> KeywordMatching {
        self.matching
    }

    /// Parses a call name.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Parse`] if no action keyword is found or
    /// nothing remains after removing it.
    pub fn parse(&self, name: &str) -> Result<ParsedName, EndpointError> {
        let parse_error = || EndpointError::Parse {
            name: name.to_string(),
        };

        let (action, rest) = match self.matching {
            KeywordMatching::Anchored => Action::ALL
                .into_iter()
                .find_map(|action| {
                    name.strip_prefix(action.keyword())
                        .filter(|rest| !rest.is_empty() && at_word_boundary(rest))
                        .map(|rest| (action, rest.to_string()))
                })
                .ok_or_else(parse_error)?,
            KeywordMatching::Substring => Action::ALL
                .into_iter()
                .find(|action| name.contains(action.keyword()))
                .map(|action| (action, name.replace(action.keyword(), "")))
                .ok_or_else(parse_error)?,
        };

        let endpoint_key = lower_first(&rest);
        let (resource_path, suffix) = split_suffix(self.matching, &endpoint_key);
        if resource_path.is_empty() {
            return Err(parse_error());
        }

        Ok(ParsedName {
            action,
            endpoint_key,
            resource_path,
            suffix,
        })
    }
}

/// Splits a suffix keyword from an endpoint key.
///
/// Anchored matching only strips a trailing suffix with something before it.
/// Substring matching strips the first suffix found anywhere.
pub(crate) fn split_suffix(matching: KeywordMatching, key: &str) -> (String, Option<Suffix>) {
    match matching {
        KeywordMatching::Anchored => Suffix::ALL
            .into_iter()
            .find_map(|suffix| {
                key.strip_suffix(suffix.keyword())
                    .filter(|path| !path.is_empty())
                    .map(|path| (path.to_string(), Some(suffix)))
            })
            .unwrap_or_else(|| (key.to_string(), None)),
        KeywordMatching::Substring => Suffix::ALL
            .into_iter()
            .find(|suffix| key.contains(suffix.keyword()))
            .map_or_else(
                || (key.to_string(), None),
                |suffix| (key.replace(suffix.keyword(), ""), Some(suffix)),
            ),
    }
}
