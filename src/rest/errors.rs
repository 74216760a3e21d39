//! Resource-specific error types for REST API operations.
//!
//! Status codes returned by Google APIs are mapped to semantic variants:
//!
//! - **400**: [`ResourceError::InvalidArgument`], with any field violations
//! - **404**: [`ResourceError::NotFound`]
//! - **409**: [`ResourceError::AlreadyExists`]
//! - **429**: [`ResourceError::RateLimited`]
//! - **503**: [`ResourceError::ServiceUnavailable`]
//! - **Other 4xx/5xx**: [`ResourceError::Http`]
//!
//! # Example
//!
//! ```rust,ignore
//! use google_api_toolkit::{ResourceError, RestApi};
//!
//! match people.get("people/c123").await {
//!     Ok(person) => println!("Found: {person:?}"),
//!     Err(ResourceError::NotFound { resource, .. }) => println!("no such {resource}"),
//!     Err(ResourceError::InvalidArgument { violations, .. }) => {
//!         for violation in violations {
//!             println!("{}: {}", violation.field, violation.description);
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, RestError};
use crate::pages::PaginationError;
use crate::serializers::SerializerError;

/// Status returned when a quota or rate limit is exceeded.
pub const USAGE_LIMIT_STATUS: u16 = 429;

/// Status returned when creating a resource that already exists.
pub const ALREADY_EXISTS_STATUS: u16 = 409;

/// Status returned when the backend is temporarily unavailable.
pub const SERVICE_UNAVAILABLE: u16 = 503;

const INVALID_ARGUMENT_STATUS: u16 = 400;
const NOT_FOUND_STATUS: u16 = 404;

/// A single invalid field reported in a 400 response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FieldViolation {
    /// Path of the offending field, e.g. `names[0].givenName`.
    #[serde(default)]
    pub field: String,
    /// Why the field was rejected.
    #[serde(default)]
    pub description: String,
}

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Person",
///     name: Some("people/c1".to_string()),
///     message: "Requested entity was not found.".to_string(),
/// };
/// assert_eq!(error.to_string(), "Person not found: Requested entity was not found.");
/// assert_eq!(error.status_code(), Some(404));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request was rejected as malformed (HTTP 400).
    #[error("Invalid argument for {resource}: {message}")]
    InvalidArgument {
        /// The resource type name.
        resource: &'static str,
        /// The server's error message.
        message: String,
        /// Per-field details, when the server provided them.
        violations: Vec<FieldViolation>,
    },

    /// The resource does not exist (HTTP 404).
    #[error("{resource} not found: {message}")]
    NotFound {
        /// The resource type name.
        resource: &'static str,
        /// The resource name that was requested, if any.
        name: Option<String>,
        /// The server's error message.
        message: String,
    },

    /// The resource already exists (HTTP 409).
    #[error("{resource} already exists: {message}")]
    AlreadyExists {
        /// The resource type name.
        resource: &'static str,
        /// The resource name involved, if any.
        name: Option<String>,
        /// The server's error message.
        message: String,
    },

    /// Quota or rate limit exceeded (HTTP 429).
    #[error("Rate limit exceeded for {resource}: {message}")]
    RateLimited {
        /// The resource type name.
        resource: &'static str,
        /// The server's error message.
        message: String,
    },

    /// The service is temporarily unavailable (HTTP 503).
    #[error("{resource} service unavailable: {message}")]
    ServiceUnavailable {
        /// The resource type name.
        resource: &'static str,
        /// The server's error message.
        message: String,
    },

    /// No path template matches the parameters available for an operation.
    #[error("Cannot resolve path for {resource}::{operation} with the provided parameters")]
    PathResolutionFailed {
        /// The resource type name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A response is missing a field that must be present.
    #[error("Response is missing required field '{field}'")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// A payload could not be loaded or dumped.
    #[error(transparent)]
    Serialization(#[from] SerializerError),

    /// Traversal of a listing failed.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// An HTTP-level error without a more specific mapping.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST client error.
    #[error(transparent)]
    Rest(RestError),
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(http) => Self::Http(http),
            other => Self::Rest(other),
        }
    }
}

impl ResourceError {
    /// Maps an error status to a semantic variant.
    ///
    /// Returns `None` for statuses without a dedicated variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use google_api_toolkit::ResourceError;
    /// use serde_json::json;
    ///
    /// let body = json!({"error": {"code": 409, "message": "Contact exists"}});
    /// let error = ResourceError::from_http_response(409, "Contact exists", &body, "Person", None);
    /// assert!(matches!(error, Some(ResourceError::AlreadyExists { .. })));
    ///
    /// assert!(ResourceError::from_http_response(418, "teapot", &body, "Person", None).is_none());
    /// ```
    #[must_use]
    pub fn from_http_response(
        code: u16,
        message: &str,
        body: &Value,
        resource: &'static str,
        name: Option<&str>,
    ) -> Option<Self> {
        let message = message.to_string();
        let name = name.map(ToString::to_string);

        match code {
            INVALID_ARGUMENT_STATUS => Some(Self::InvalidArgument {
                resource,
                message,
                violations: field_violations(body),
            }),
            NOT_FOUND_STATUS => Some(Self::NotFound {
                resource,
                name,
                message,
            }),
            ALREADY_EXISTS_STATUS => Some(Self::AlreadyExists {
                resource,
                name,
                message,
            }),
            USAGE_LIMIT_STATUS => Some(Self::RateLimited { resource, message }),
            SERVICE_UNAVAILABLE => Some(Self::ServiceUnavailable { resource, message }),
            _ => None,
        }
    }

    /// Converts a client error into a resource error for `resource`.
    ///
    /// Status errors, including those raised after retries ran out, are
    /// mapped with [`from_http_response`](Self::from_http_response). All
    /// other errors are wrapped unchanged.
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, name: Option<&str>) -> Self {
        match error {
            RestError::Http(HttpError::Response(e)) => {
                match Self::from_http_response(e.code, &e.message, &e.body, resource, name) {
                    Some(mapped) => mapped,
                    None => Self::Http(HttpError::Response(e)),
                }
            }
            RestError::Http(HttpError::MaxRetries(e)) => {
                match Self::from_http_response(e.code, &e.message, &e.body, resource, name) {
                    Some(mapped) => mapped,
                    None => Self::Http(HttpError::MaxRetries(e)),
                }
            }
            other => other.into(),
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidArgument { .. } => Some(INVALID_ARGUMENT_STATUS),
            Self::NotFound { .. } => Some(NOT_FOUND_STATUS),
            Self::AlreadyExists { .. } => Some(ALREADY_EXISTS_STATUS),
            Self::RateLimited { .. } => Some(USAGE_LIMIT_STATUS),
            Self::ServiceUnavailable { .. } => Some(SERVICE_UNAVAILABLE),
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(default)]
    field_violations: Vec<FieldViolation>,
}

/// Collects `fieldViolations` from every entry of `error.details`.
fn field_violations(body: &Value) -> Vec<FieldViolation> {
    let Some(details) = body.pointer("/error/details").and_then(Value::as_array) else {
        return Vec::new();
    };

    details
        .iter()
        .filter_map(|detail| ErrorDetail::deserialize(detail).ok())
        .flat_map(|detail| detail.field_violations)
        .collect()
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
    assert_send_sync::<FieldViolation>();
};
