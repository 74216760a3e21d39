//! Path building for REST resource operations.
//!
//! A resource declares one or more [`ResourcePath`]s per operation. At call
//! time [`get_path`] picks the most specific path whose placeholders can
//! all be filled, and [`build_path`] interpolates the values.
//!
//! # Placeholders
//!
//! Templates use the URI template forms found in Google discovery documents:
//!
//! - `{x}`: the value is percent-encoded, so `/` becomes `%2F`
//! - `{+x}`: the value is inserted verbatim, so resource names such as
//!   `people/c123` keep their slashes
//!
//! # Example
//!
//! ```rust
//! use google_api_toolkit::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use google_api_toolkit::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["name"], "{+name}"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &["parent"], "{+parent}/connections"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::List, &["parent"]).unwrap();
//! let values = HashMap::from([("parent", "people/me")]);
//! assert_eq!(build_path(path.template, &values), "people/me/connections");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::clients::HttpMethod;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource by name.
    Get,
    /// Fetch several resources by name in one call.
    BatchGet,
    /// List one page of resources.
    List,
    /// Create a new resource.
    Create,
    /// Update fields of an existing resource.
    Update,
    /// Delete a resource.
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::BatchGet | Self::List => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::BatchGet => "batch_get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for one resource operation.
///
/// `params` lists the placeholder names the template needs, without the
/// `+` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Placeholder names required by the template.
    pub params: &'static [&'static str],
    /// The URL template, relative to the API base URL.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            params,
            template,
        }
    }

    /// Returns the number of placeholders this path requires.
    #[must_use]
    pub const fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Checks if every required placeholder is available.
    #[must_use]
    pub fn matches_params(&self, available: &[&str]) -> bool {
        self.params.iter().all(|param| available.contains(param))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose placeholders are all in
/// `available`, the one requiring the most placeholders wins.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::rest::{get_path, ResourceOperation, ResourcePath};
/// use google_api_toolkit::HttpMethod;
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "otherContacts"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &["parent"], "{+parent}/connections"),
/// ];
///
/// let path = get_path(PATHS, ResourceOperation::List, &["parent"]);
/// assert_eq!(path.unwrap().template, "{+parent}/connections");
///
/// let path = get_path(PATHS, ResourceOperation::List, &[]);
/// assert_eq!(path.unwrap().template, "otherContacts");
/// ```
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_params(available))
        .max_by_key(|p| p.param_count())
}

/// Builds a URL path from a template by interpolating placeholder values.
///
/// `{x}` placeholders are percent-encoded and `{+x}` placeholders are
/// inserted verbatim. Placeholders without a value are left untouched.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::rest::build_path;
/// use std::collections::HashMap;
///
/// let values = HashMap::from([("name", "people/c1"), ("group", "family & friends")]);
/// assert_eq!(build_path("{+name}", &values), "people/c1");
/// assert_eq!(build_path("groups/{group}", &values), "groups/family%20%26%20friends");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, values: &HashMap<&str, V>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };

        result.push_str(&rest[..open]);
        let placeholder = &rest[open + 1..close];
        let (reserved, key) = placeholder
            .strip_prefix('+')
            .map_or((false, placeholder), |key| (true, key));

        match values.get(key) {
            Some(value) if reserved => result.push_str(&value.to_string()),
            Some(value) => result.push_str(&urlencoding::encode(&value.to_string())),
            None => result.push_str(&rest[open..=close]),
        }

        rest = &rest[close + 1..];
    }

    result.push_str(rest);
    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: &[ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["name"], "{+name}"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[],
            "people/me/connections",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &["parent"],
            "{+parent}/connections",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "people:createContact",
        ),
    ];

    #[test]
    fn test_resource_path_stores_fields() {
        let path = &PATHS[0];
        assert_eq!(path.http_method, HttpMethod::Get);
        assert_eq!(path.operation, ResourceOperation::Get);
        assert_eq!(path.params, &["name"]);
        assert_eq!(path.param_count(), 1);
    }

    #[test]
    fn test_get_path_selects_most_specific_path() {
        let path = get_path(PATHS, ResourceOperation::List, &["parent", "name"]).unwrap();
        assert_eq!(path.template, "{+parent}/connections");
    }

    #[test]
    fn test_get_path_falls_back_to_less_specific() {
        let path = get_path(PATHS, ResourceOperation::List, &["name"]).unwrap();
        assert_eq!(path.template, "people/me/connections");
    }

    #[test]
    fn test_get_path_returns_none_when_no_match() {
        assert!(get_path(PATHS, ResourceOperation::Get, &[]).is_none());
        assert!(get_path(PATHS, ResourceOperation::Delete, &["name"]).is_none());
    }

    #[test]
    fn test_reserved_expansion_keeps_slashes() {
        let values = HashMap::from([("name", "people/c123")]);
        assert_eq!(build_path("v1/{+name}", &values), "v1/people/c123");
    }

    #[test]
    fn test_simple_expansion_percent_encodes() {
        let values = HashMap::from([("name", "people/c123")]);
        assert_eq!(build_path("v1/{name}", &values), "v1/people%2Fc123");
    }

    #[test]
    fn test_build_path_handles_numeric_values() {
        let values = HashMap::from([("id", 42)]);
        assert_eq!(build_path("items/{id}:undelete", &values), "items/42:undelete");
    }

    #[test]
    fn test_build_path_leaves_missing_placeholders() {
        let values: HashMap<&str, &str> = HashMap::new();
        assert_eq!(build_path("{+parent}/connections", &values), "{+parent}/connections");
    }

    #[test]
    fn test_build_path_tolerates_unclosed_brace() {
        let values = HashMap::from([("a", "x")]);
        assert_eq!(build_path("{a}/{b", &values), "x/{b");
    }

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::Get.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::BatchGet.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Update.default_http_method(), HttpMethod::Patch);
        assert_eq!(ResourceOperation::Delete.default_http_method(), HttpMethod::Delete);
        assert_eq!(ResourceOperation::BatchGet.as_str(), "batch_get");
    }
}
