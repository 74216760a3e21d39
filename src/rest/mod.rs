//! REST resource layer for Google APIs.
//!
//! This module turns a static description of a resource API into typed
//! operations:
//!
//! - **[`ResourceDescriptor`]**: paths and response field names of one API
//! - **[`RestResource`] trait**: binds a model type to its descriptor
//! - **[`RequestBuilder`]**: prepares a typed request per operation
//! - **[`RestApi`] trait / [`ResourceApi`]**: executes the operations
//! - **Path building**: placeholder interpolation with most-specific selection
//! - **[`ResourceError`]**: semantic error types for resource operations
//!
//! Listing operations return [`Page`](crate::Page)s whose continuation
//! fetches the following page with the server's `nextPageToken`, and
//! [`RestApi::iterate`] flattens them into a lazy
//! [`ResourceIterator`](crate::ResourceIterator).
//!
//! # Example: Defining a Resource
//!
//! ```rust
//! use google_api_toolkit::rest::{ResourceDescriptor, ResourceOperation, ResourcePath, RestResource};
//! use google_api_toolkit::HttpMethod;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Person {
//!     pub resource_name: Option<String>,
//!     pub etag: Option<String>,
//! }
//!
//! impl RestResource for Person {
//!     const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
//!         "Person",
//!         &[
//!             ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["name"], "{+name}"),
//!             ResourcePath::new(HttpMethod::Get, ResourceOperation::BatchGet, &[], "people:batchGet"),
//!             ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "people/me/connections"),
//!             ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "people:createContact"),
//!             ResourcePath::new(HttpMethod::Patch, ResourceOperation::Update, &["name"], "{+name}:updateContact"),
//!             ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, &["name"], "{+name}:deleteContact"),
//!         ],
//!     )
//!     .items_key("connections")
//!     .batch("responses", Some("person"), "resourceNames")
//!     .update_mask("updatePersonFields");
//! }
//! ```
//!
//! # Example: Using a Resource
//!
//! ```rust,ignore
//! use google_api_toolkit::{ResourceApi, RestApi, RestClient};
//!
//! let client = RestClient::new(&config)?;
//! let people = ResourceApi::<Person>::for_resource(client, &config)
//!     .with_param("personFields", "names");
//!
//! let person = people.get("people/c123").await?;
//! let page = people.list(Some(50), None).await?;
//! let everyone = people.iterate(Some(50), None).await?.try_collect().await?;
//! ```

mod api;
mod builder;
mod descriptor;
mod errors;
mod path;
mod response;

pub use api::{ResourceApi, RestApi};
pub use builder::RequestBuilder;
pub use descriptor::{
    ResourceDescriptor, RestResource, NEXT_PAGE_TOKEN_FIELD, PAGE_SIZE_PARAM, PAGE_TOKEN_PARAM,
};
pub use errors::{
    FieldViolation, ResourceError, ALREADY_EXISTS_STATUS, SERVICE_UNAVAILABLE, USAGE_LIMIT_STATUS,
};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use response::{BatchGetResponse, EmptyResponse};
