//! The resolved request and its query string.

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::HttpMethod;
use crate::endpoints::Action;

/// Flattened query parameters in bracket notation.
///
/// Nested objects become `key[sub]=v`, arrays become `key[]=v`, and nulls are
/// dropped. Values are percent-encoded when displayed.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::QueryString;
/// use serde_json::json;
///
/// let params = json!({"fields": "id,title", "ids": [1, 2]});
/// let query = QueryString::from_map(params.as_object().unwrap());
/// assert_eq!(query.to_string(), "fields=id%2Ctitle&ids[]=1&ids[]=2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Flattens a parameter map.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut query = Self::default();
        query.extend_map(map);
        query
    }

    /// Appends the flattened pairs of `map`.
    pub fn extend_map(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            self.flatten(key.clone(), value);
        }
    }

    fn flatten(&mut self, name: String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Bool(b) => self.pairs.push((name, b.to_string())),
            Value::Number(n) => self.pairs.push((name, n.to_string())),
            Value::String(s) => self.pairs.push((name, s.clone())),
            Value::Array(items) => {
                for item in items {
                    self.flatten(format!("{name}[]"), item);
                }
            }
            Value::Object(fields) => {
                for (field, item) in fields {
                    self.flatten(format!("{name}[{field}]"), item);
                }
            }
        }
    }

    /// Returns the unencoded `(name, value)` pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the first value for a flattened name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            let name = urlencoding::encode(name)
                .replace("%5B", "[")
                .replace("%5D", "]");
            write!(f, "{name}={}", urlencoding::encode(value))?;
        }
        Ok(())
    }
}

/// One dispatched call after resolution, before it reaches the wire.
///
/// The body holds the inner fields; [`wire_body`](Self::wire_body) wraps them
/// back under their envelope key.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRequest {
    /// The call action.
    pub action: Action,
    /// The HTTP verb for the action.
    pub method: HttpMethod,
    /// Host-relative URI without query string, e.g. `/products/1/images`.
    pub uri: String,
    /// Query parameters, if any were supplied.
    pub query: Option<QueryString>,
    /// The body fields for create and modify.
    pub body: Option<Map<String, Value>>,
    /// The key the body was passed under, e.g. `product`.
    pub envelope: Option<String>,
    /// The canonical category key.
    pub category: String,
}

impl ResolvedRequest {
    /// Returns the URI with its query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        self.with_query(self.uri.clone())
    }

    /// Returns the `.json` path sent to the API, query string included.
    #[must_use]
    pub fn wire_path(&self) -> String {
        self.with_query(format!("{}.json", self.uri))
    }

    /// Returns the JSON body as sent: `{envelope: body}`.
    #[must_use]
    pub fn wire_body(&self) -> Option<Value> {
        let body = self.body.clone()?;
        let envelope = self.envelope.clone()?;
        let mut wrapped = Map::new();
        wrapped.insert(envelope, Value::Object(body));
        Some(Value::Object(wrapped))
    }

    fn with_query(&self, mut path: String) -> String {
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(&query.to_string());
        }
        path
    }
}
