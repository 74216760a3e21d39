//! REST client implementation.
//!
//! This module provides the [`RestClient`] type for making REST API requests
//! with path normalization and retry handling.

use std::sync::Arc;

use crate::clients::rest::RestError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::ApiConfig;

/// REST API client for a Google-style service.
///
/// Provides `get`, `post`, `put`, `patch` and `delete` with path
/// normalization. Every request is attempted `num_retries + 1` times.
///
/// Cloning is cheap: clones share the same underlying [`HttpClient`].
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use google_api_toolkit::{ApiConfig, BaseUrl, RestClient};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://people.googleapis.com/v1")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let query = vec![("personFields".to_string(), "names".to_string())];
/// let response = client.get("people/me", query).await?;
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    http_client: Arc<HttpClient>,
    num_retries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(
            base_url = %config.base_url(),
            num_retries = config.num_retries(),
            "Created REST client"
        );
        Ok(Self {
            http_client: Arc::new(http_client),
            num_retries: config.num_retries(),
        })
    }

    /// Returns the number of retries applied to each request.
    #[must_use]
    pub const fn num_retries(&self) -> u32 {
        self.num_retries
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, RestError> {
        let request = self.prepare(HttpMethod::Get, path, None, query)?;
        self.send(request).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, RestError> {
        let request = self.prepare(HttpMethod::Post, path, Some(body), query)?;
        self.send(request).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, RestError> {
        let request = self.prepare(HttpMethod::Put, path, Some(body), query)?;
        self.send(request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, RestError> {
        let request = self.prepare(HttpMethod::Patch, path, Some(body), query)?;
        self.send(request).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, RestError> {
        let request = self.prepare(HttpMethod::Delete, path, None, query)?;
        self.send(request).await
    }

    /// Builds a validated request without sending it.
    ///
    /// The path is normalized and `tries` is set from `num_retries`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] if the request fails validation.
    pub fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Vec<(String, String)>,
    ) -> Result<HttpRequest, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path)
            .query(query)
            .tries(self.num_retries.saturating_add(1));

        if let Some(body_value) = body {
            builder = builder.body(body_value).body_type(DataType::Json);
        }

        builder.build().map_err(|e| RestError::Http(e.into()))
    }

    /// Sends a previously prepared request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RestError> {
        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a REST API path.
///
/// Leading `/` characters are stripped. Empty paths are rejected.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/');

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(trimmed.to_string())
}
