//! HTTP client types for Google REST APIs.
//!
//! This module provides the transport layer used by every resource API:
//!
//! - [`HttpClient`]: the async HTTP client with retry logic
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response from the API
//! - [`HttpMethod`]: supported HTTP methods
//! - [`DataType`]: content types for request bodies
//! - [`rest::RestClient`]: higher-level REST client with path normalization
//! - [`PreparedRequest`]: a request plus the function that decodes its response
//!
//! # Example
//!
//! ```rust,ignore
//! use google_api_toolkit::{ApiConfig, BaseUrl, AccessToken};
//! use google_api_toolkit::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://people.googleapis.com/v1")?)
//!     .access_token(AccessToken::new("ya29.token")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "people/me")
//!     .query_param("personFields", "names")
//!     .build()?;
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Responses with status 429, 500, 502, 503 or 504 are retried while tries
//! remain. The client waits for the `Retry-After` header when present,
//! otherwise it backs off exponentially from one second, capped at 32
//! seconds. Other error statuses return immediately.
//!
//! The default `tries` is 1, meaning no automatic retries. [`RestClient`]
//! sets `tries` to `num_retries + 1` from the configuration.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod prepared;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use prepared::PreparedRequest;

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
