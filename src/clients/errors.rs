//! HTTP-specific error types for the toolkit.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use google_api_toolkit::clients::{HttpClient, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// Google APIs report failures as `{"error": {"code", "message", "status"}}`.
/// When the body has that shape, `message` and `status` are taken from it;
/// otherwise `message` is the raw body text.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Requested entity was not found.".to_string(),
///     status: Some("NOT_FOUND".to_string()),
///     body: json!({}),
/// };
///
/// assert_eq!(error.to_string(), "Requested entity was not found.");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable error message.
    pub message: String,
    /// Canonical error status (e.g. `NOT_FOUND`), if the server sent one.
    pub status: Option<String>,
    /// The full parsed response body.
    pub body: serde_json::Value,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with a retryable status after all
/// configured tries have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
    /// The parsed body of the last response.
    pub body: serde_json::Value,
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before a request is sent, for example when a POST, PUT or PATCH
/// request carries no body.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "patch".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use patch without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including failures reading a body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response carried a body that is not valid JSON.
    #[error("Response with status {code} has a body that is not valid JSON: {source}")]
    InvalidBody {
        /// The HTTP status code of the response.
        code: u16,
        /// Why the body could not be parsed.
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Returns the HTTP status code of the failing response, if there was one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) | Self::InvalidBody { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: "Requested entity was not found.".to_string(),
            status: Some("NOT_FOUND".to_string()),
            body: json!({}),
        };
        assert_eq!(error.to_string(), "Requested entity was not found.");
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 503,
            tries: 6,
            message: "The service is currently unavailable.".to_string(),
            body: json!({}),
        };
        let message = error.to_string();
        assert!(message.contains('6'));
        assert!(message.contains("Exceeded maximum retry count"));
        assert!(message.contains("currently unavailable"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use post without specifying data."
        );
    }

    #[test]
    fn test_status_code_extraction() {
        let response = HttpError::Response(HttpResponseError {
            code: 409,
            message: "exists".to_string(),
            status: None,
            body: json!({}),
        });
        assert_eq!(response.status_code(), Some(409));

        let retries = HttpError::MaxRetries(MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: "slow down".to_string(),
            body: json!({}),
        });
        assert_eq!(retries.status_code(), Some(429));

        let invalid = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType);
        assert_eq!(invalid.status_code(), None);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let http_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            status: None,
            body: json!({}),
        };
        let _ = http_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
        let _ = invalid_error;
    }
}
