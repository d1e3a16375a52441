//! Positional call arguments.

use serde_json::{Map, Value};

use crate::dispatch::DispatchError;

/// One positional argument of a symbolic call.
///
/// Identifiers fill tiers in order, literals are appended to the resolved
/// path, and maps become the request body or query parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum CallArg {
    /// A tier identifier.
    Id(u64),
    /// A literal path segment appended after resolution.
    Literal(String),
    /// A body or query mapping.
    Map(Map<String, Value>),
}

impl CallArg {
    /// Converts a JSON value: objects become maps, unsigned integers become
    /// identifiers and strings become literals.
    ///
    /// Other scalars are not treated as literal path segments. Booleans,
    /// floats and negative numbers are rejected, as are arrays and `null`;
    /// pass them as strings to append them to the path.
    ///
    /// # Errors
    ///
    /// Returns the value back if it has no argument meaning.
    pub fn from_json(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self::Map(map)),
            Value::String(s) => Ok(Self::Literal(s)),
            Value::Number(n) => n.as_u64().map(Self::Id).ok_or(Value::Number(n)),
            other => Err(other),
        }
    }

    /// Converts a list of JSON values, reporting the first unusable one.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArgument`] with the offending position.
    pub fn from_json_args(
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<Self>, DispatchError> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Self::from_json(value).map_err(|rejected| DispatchError::InvalidArgument {
                    index,
                    reason: format!(
                        "expected an object, a non-negative integer or a string, got {rejected}"
                    ),
                })
            })
            .collect()
    }
}

impl From<u64> for CallArg {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<u32> for CallArg {
    fn from(id: u32) -> Self {
        Self::Id(u64::from(id))
    }
}

impl From<&str> for CallArg {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_string())
    }
}

impl From<String> for CallArg {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl From<Map<String, Value>> for CallArg {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

/// Arguments split by kind, literals and maps keeping their original position.
#[derive(Debug, Default)]
pub(crate) struct Partitioned {
    pub ids: Vec<u64>,
    pub literals: Vec<(usize, String)>,
    pub maps: Vec<(usize, Map<String, Value>)>,
}

pub(crate) fn partition(args: Vec<CallArg>) -> Partitioned {
    let mut parts = Partitioned::default();
    for (index, arg) in args.into_iter().enumerate() {
        match arg {
            CallArg::Id(id) => parts.ids.push(id),
            CallArg::Literal(literal) => parts.literals.push((index, literal)),
            CallArg::Map(map) => parts.maps.push((index, map)),
        }
    }
    parts
}
