//! reqwest-backed [`Transport`] implementation.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;

/// Fixed retry wait time in seconds when no `Retry-After` is given.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml, reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the Admin API.
///
/// Sends exactly what it is given and retries 429 and 500 responses up to
/// `tries` attempts, honoring `Retry-After` for 429s. Any other status is
/// returned to the caller as-is.
///
/// `HttpClient` is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client making at most `tries` attempts per request.
    ///
    /// A `tries` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialised.
    pub fn new(tries: u32) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self {
            client,
            tries: tries.max(1),
        })
    }

    /// Returns the maximum number of attempts per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(name.as_str().to_lowercase()).or_default().push(value);
        }
        result
    }

    /// 429 honors `Retry-After`; 500 always waits the fixed delay.
    fn retry_delay(response: &HttpResponse) -> Duration {
        if response.code == 429 {
            if let Some(secs) = response.retry_after() {
                return Duration::from_secs_f64(secs);
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let response = self.send_once(&request).await?;

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    request.url,
                    reason
                );
            }

            let retryable = response.code == 429 || response.code == 500;
            if !retryable || self.tries == 1 {
                return Ok(response);
            }

            if attempt >= self.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code: response.code,
                    tries: self.tries,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::retry_delay(&response);
            tracing::debug!(
                status = response.code,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying {} {}",
                request.http_method,
                request.url
            );
            tokio::time::sleep(delay).await;
        }
    }
}
