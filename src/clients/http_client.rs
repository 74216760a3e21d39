//! HTTP client for REST service communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiConfig, ApiKey, BaseUrl};

/// Base retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Upper bound for a single backoff wait, in seconds.
pub const MAX_RETRY_WAIT: u64 = 32;

/// Toolkit version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status codes that are retried while tries remain.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// HTTP client for making requests to a REST service.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and the bearer token
/// - The `key` query parameter when an API key is configured
/// - Automatic retry with exponential backoff for transient failures
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use google_api_toolkit::{ApiConfig, BaseUrl};
/// use google_api_toolkit::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://people.googleapis.com/v1")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "people/me")
///     .query_param("personFields", "names")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    api_key: Option<ApiKey>,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}google-api-toolkit v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = config.access_token() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.as_ref()),
            );
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            api_key: config.api_key().cloned(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request.
    ///
    /// Retryable statuses (429, 500, 502, 503, 504) are retried until
    /// `request.tries` is used up. The wait honors `Retry-After` when the
    /// server sends it and otherwise backs off exponentially.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs, or a body cannot be read (`Network`)
    /// - A 2xx response body is not valid JSON (`InvalidBody`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut query = request.query.clone();
        if let Some(key) = &self.api_key {
            query.push(("key".to_string(), key.as_ref().to_string()));
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if !query.is_empty() {
                req_builder = req_builder.query(&query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "Sending request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());

            if res.status().is_success() {
                let body_text = res.text().await?;
                let body = Self::parse_success_body(code, &body_text)?;
                return Ok(HttpResponse::new(code, res_headers, body));
            }

            // Error bodies only feed the error message, so unreadable or
            // non-JSON text is kept as `raw_body`.
            let body_text = res.text().await.unwrap_or_default();
            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            let message = Self::error_message(&response);

            if !RETRYABLE_STATUSES.contains(&code) {
                return Err(HttpError::Response(Self::response_error(response, message)));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(Self::response_error(response, message)));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message,
                    body: response.body,
                }));
            }

            let delay = retry_delay(&response, tries);
            tracing::warn!(
                status = code,
                attempt = tries,
                max_tries = request.tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying request to {}",
                request.path
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses the body of a 2xx response. An empty body is `{}`.
    fn parse_success_body(code: u16, body_text: &str) -> Result<serde_json::Value, HttpError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(body_text).map_err(|source| HttpError::InvalidBody { code, source })
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn error_message(response: &HttpResponse) -> String {
        if let Some(message) = response.error_message() {
            return message.to_string();
        }
        if let Some(raw) = response.body.get("raw_body").and_then(|v| v.as_str()) {
            return raw.to_string();
        }
        format!("Request failed with status {}", response.code)
    }

    fn response_error(response: HttpResponse, message: String) -> HttpResponseError {
        HttpResponseError {
            code: response.code,
            status: response.error_status().map(String::from),
            message,
            body: response.body,
        }
    }
}

/// Computes how long to wait before the next try.
///
/// `Retry-After` wins when present. Otherwise the wait is
/// `RETRY_WAIT_TIME * 2^(attempt - 1)` seconds, capped at `MAX_RETRY_WAIT`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn retry_delay(response: &HttpResponse, attempt: u32) -> Duration {
    if let Some(retry_after) = response.retry_request_after {
        return Duration::from_secs_f64(retry_after.min(MAX_RETRY_WAIT as f64));
    }
    let exponent = attempt.saturating_sub(1).min(16);
    let secs = RETRY_WAIT_TIME.saturating_mul(1_u64 << exponent);
    Duration::from_secs(secs.min(MAX_RETRY_WAIT))
}
