//! Static descriptions of Google REST resource APIs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::rest::ResourcePath;

/// Query parameter carrying the requested page size.
pub const PAGE_SIZE_PARAM: &str = "pageSize";

/// Query parameter carrying the token of the page to fetch.
pub const PAGE_TOKEN_PARAM: &str = "pageToken";

/// Response field holding the token of the following page.
pub const NEXT_PAGE_TOKEN_FIELD: &str = "nextPageToken";

/// Everything the request builder needs to know about a resource API.
///
/// Descriptors are plain data and are usually declared as constants.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::rest::{ResourceDescriptor, ResourceOperation, ResourcePath};
/// use google_api_toolkit::HttpMethod;
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["name"], "{+name}"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "people/me/connections"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::BatchGet, &[], "people:batchGet"),
/// ];
///
/// const PEOPLE: ResourceDescriptor = ResourceDescriptor::new("Person", PATHS)
///     .items_key("connections")
///     .batch("responses", Some("person"), "resourceNames")
///     .update_mask("updatePersonFields");
///
/// assert_eq!(PEOPLE.items_key, "connections");
/// assert_eq!(PEOPLE.update_mask_param, Some("updatePersonFields"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Resource type name used in errors and logs.
    pub name: &'static str,
    /// Paths for every supported operation.
    pub paths: &'static [ResourcePath],
    /// Field of a list response holding the items.
    pub items_key: &'static str,
    /// Field of a batch get response holding the entries.
    pub batch_key: &'static str,
    /// Field of each batch entry holding the item, or `None` when the
    /// entries are the items themselves.
    pub batch_item_key: Option<&'static str>,
    /// Repeated query parameter naming the resources of a batch get.
    pub batch_names_param: &'static str,
    /// Query parameter listing the fields an update touches, if the API
    /// takes one.
    pub update_mask_param: Option<&'static str>,
}

impl ResourceDescriptor {
    /// Creates a descriptor with the common Google defaults: list items
    /// under `items`, batch entries under `responses`, names passed as
    /// `names`, and no update mask.
    #[must_use]
    pub const fn new(name: &'static str, paths: &'static [ResourcePath]) -> Self {
        Self {
            name,
            paths,
            items_key: "items",
            batch_key: "responses",
            batch_item_key: None,
            batch_names_param: "names",
            update_mask_param: None,
        }
    }

    /// Sets the list response field holding the items.
    #[must_use]
    pub const fn items_key(mut self, key: &'static str) -> Self {
        self.items_key = key;
        self
    }

    /// Sets how batch get requests and responses are shaped.
    #[must_use]
    pub const fn batch(
        mut self,
        key: &'static str,
        item_key: Option<&'static str>,
        names_param: &'static str,
    ) -> Self {
        self.batch_key = key;
        self.batch_item_key = item_key;
        self.batch_names_param = names_param;
        self
    }

    /// Sets the update mask query parameter.
    #[must_use]
    pub const fn update_mask(mut self, param: &'static str) -> Self {
        self.update_mask_param = Some(param);
        self
    }
}

/// A model type bound to a resource API.
///
/// Implementing this trait lets [`ResourceApi::for_resource`] build an API
/// for the type with a [`ModelSerializer`](crate::serializers::ModelSerializer).
///
/// [`ResourceApi::for_resource`]: crate::rest::ResourceApi::for_resource
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::rest::{ResourceDescriptor, ResourceOperation, ResourcePath, RestResource};
/// use google_api_toolkit::HttpMethod;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct ContactGroup {
///     resource_name: Option<String>,
///     name: Option<String>,
/// }
///
/// impl RestResource for ContactGroup {
///     const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
///         "ContactGroup",
///         &[ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "contactGroups")],
///     )
///     .items_key("contactGroups");
/// }
///
/// assert_eq!(ContactGroup::DESCRIPTOR.name, "ContactGroup");
/// ```
pub trait RestResource: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// The resource API this model belongs to.
    const DESCRIPTOR: ResourceDescriptor;
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceDescriptor>();
};
