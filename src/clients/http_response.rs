//! Raw response type returned by a [`Transport`](crate::clients::Transport).
//!
//! The transport reports what came back (status, headers, raw body);
//! decoding and status classification happen in the dispatcher.

use std::collections::HashMap;

use crate::clients::errors::HttpResponseError;

/// An HTTP response: status code, lower-cased headers and the raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`. Header names are lower-cased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    /// Returns the `Retry-After` header in seconds, if present and numeric.
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
    }

    /// Decodes the body as JSON. An empty body decodes to `{}`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(&self.body)
    }

    /// Builds the error for a non-2xx response.
    ///
    /// The message is a JSON object holding the body's `errors`, `error` and
    /// `error_description` fields and, when the request id is known, an
    /// `error_reference` sentence naming it. A body that is not JSON is
    /// reported under `raw_body` for server errors.
    #[must_use]
    pub fn to_error(&self) -> HttpResponseError {
        let body = self.json().unwrap_or_else(|_| {
            if self.code >= 500 {
                serde_json::json!({ "raw_body": self.body })
            } else {
                serde_json::json!({})
            }
        });

        let mut error_body = serde_json::Map::new();
        for field in ["errors", "error", "raw_body"] {
            if let Some(value) = body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }
        if body.get("error").is_some() {
            if let Some(desc) = body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }
        if let Some(request_id) = self.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        HttpResponseError {
            code: self.code,
            message: serde_json::Value::Object(error_body).to_string(),
            error_reference: self.request_id().map(String::from),
        }
    }
}
