//! The resource API interface and its generic implementation.
//!
//! [`RestApi`] is the set of operations every Google resource API offers.
//! [`ResourceApi`] implements it for any resource described by a
//! [`ResourceDescriptor`], delegating request preparation to a
//! [`RequestBuilder`] and executing the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use google_api_toolkit::{ApiConfig, ResourceApi, RestApi, RestClient, Step};
//!
//! let client = RestClient::new(&config)?;
//! let people = ResourceApi::<Person>::for_resource(client, &config)
//!     .with_param("personFields", "names,emailAddresses");
//!
//! let me = people.get("people/me").await?;
//!
//! let mut contacts = people.iterate(Some(100), None).await?;
//! while let Step::Item(contact) = contacts.next().await? {
//!     println!("{contact:?}");
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::clients::RestClient;
use crate::config::ApiConfig;
use crate::pages::{Page, ResourceIterator};
use crate::rest::{
    BatchGetResponse, EmptyResponse, RequestBuilder, ResourceDescriptor, ResourceError,
    RestResource,
};
use crate::serializers::{ModelSerializer, Serializer};

/// Operations offered by a Google REST resource API.
///
/// Resource names are the server's full names, such as `people/c123`.
#[allow(async_fn_in_trait)]
pub trait RestApi<T> {
    /// Fetches one resource by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource does not exist.
    async fn get(&self, name: &str) -> Result<T, ResourceError>;

    /// Fetches several resources by name in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails as a whole. Per-name
    /// failures are reported in [`BatchGetResponse::failed`].
    async fn batch_get(&self, names: &[&str]) -> Result<BatchGetResponse<T>, ResourceError>;

    /// Creates a resource and returns it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AlreadyExists`] or
    /// [`ResourceError::InvalidArgument`] when the server rejects it.
    async fn create(&self, obj: &T) -> Result<T, ResourceError>;

    /// Updates the fields of `obj` on the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource does not exist.
    async fn update(&self, name: &str, obj: &T) -> Result<T, ResourceError>;

    /// Deletes the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the resource does not exist.
    async fn delete(&self, name: &str) -> Result<EmptyResponse, ResourceError>;

    /// Fetches one page of resources.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the page cannot be fetched or decoded.
    async fn list(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<T>, ResourceError>;

    /// Fetches the first page and returns an iterator over every resource
    /// from there on. Later pages are fetched as the iterator advances.
    ///
    /// Advancing the iterator requires `T: Clone`. Without it, use
    /// [`list`](Self::list) and follow [`Page::next_page`], or wrap the
    /// first page in a [`PageSequencer`](crate::PageSequencer).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the first page cannot be fetched.
    async fn iterate(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ResourceIterator<T>, ResourceError>;
}

/// [`RestApi`] implementation for any described resource.
///
/// Page size and the empty page limit of iterators come from the
/// [`ApiConfig`] the API was created with.
pub struct ResourceApi<T> {
    builder: RequestBuilder<T>,
}

impl<T> ResourceApi<T> {
    /// Creates an API for `descriptor` using `serializer` for payloads.
    #[must_use]
    pub fn new(
        client: RestClient,
        config: &ApiConfig,
        descriptor: ResourceDescriptor,
        serializer: Arc<dyn Serializer<T>>,
    ) -> Self {
        Self::from_builder(
            RequestBuilder::new(client, descriptor, serializer)
                .page_size(config.page_size())
                .max_empty_pages(config.max_empty_pages()),
        )
    }

    /// Wraps an already configured request builder.
    #[must_use]
    pub const fn from_builder(builder: RequestBuilder<T>) -> Self {
        Self { builder }
    }

    /// Adds a query parameter sent with every request.
    #[must_use]
    pub fn with_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_builder(self.builder.param(key, value))
    }

    /// Sets a path placeholder value, such as `parent`.
    #[must_use]
    pub fn with_path_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_builder(self.builder.path_param(key, value))
    }

    /// Returns the request builder, for preparing requests without
    /// executing them.
    #[must_use]
    pub const fn builder(&self) -> &RequestBuilder<T> {
        &self.builder
    }
}

impl<T: RestResource> ResourceApi<T> {
    /// Creates an API for a model type bound to its descriptor, using a
    /// [`ModelSerializer`].
    #[must_use]
    pub fn for_resource(client: RestClient, config: &ApiConfig) -> Self {
        Self::new(
            client,
            config,
            T::DESCRIPTOR,
            Arc::new(ModelSerializer::<T>::new()),
        )
    }
}

impl<T> RestApi<T> for ResourceApi<T>
where
    T: Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<T, ResourceError> {
        self.builder.get(name)?.execute().await
    }

    async fn batch_get(&self, names: &[&str]) -> Result<BatchGetResponse<T>, ResourceError> {
        self.builder.batch_get(names)?.execute().await
    }

    async fn create(&self, obj: &T) -> Result<T, ResourceError> {
        self.builder.create(obj)?.execute().await
    }

    async fn update(&self, name: &str, obj: &T) -> Result<T, ResourceError> {
        self.builder.update(name, obj)?.execute().await
    }

    async fn delete(&self, name: &str) -> Result<EmptyResponse, ResourceError> {
        self.builder.delete(name)?.execute().await
    }

    async fn list(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<T>, ResourceError> {
        self.builder.list(page_size, page_token)?.execute().await
    }

    async fn iterate(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ResourceIterator<T>, ResourceError> {
        self.builder.iterate(page_size, page_token)?.execute().await
    }
}

impl<T> Clone for ResourceApi<T> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
        }
    }
}

impl<T> fmt::Debug for ResourceApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("builder", &self.builder)
            .finish()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceApi<serde_json::Value>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::config::BaseUrl;
    use crate::rest::{ResourceOperation, ResourcePath};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ContactGroup {
        resource_name: Option<String>,
        name: Option<String>,
    }

    impl RestResource for ContactGroup {
        const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
            "ContactGroup",
            &[
                ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["name"], "{+name}"),
                ResourcePath::new(
                    HttpMethod::Get,
                    ResourceOperation::List,
                    &[],
                    "contactGroups",
                ),
            ],
        )
        .items_key("contactGroups");
    }

    fn config() -> ApiConfig {
        ApiConfig::builder()
            .base_url(BaseUrl::new("https://people.googleapis.com/v1").unwrap())
            .page_size(25)
            .max_empty_pages(Some(3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_for_resource_applies_config_defaults() {
        let config = config();
        let client = RestClient::new(&config).unwrap();
        let api = ResourceApi::<ContactGroup>::for_resource(client, &config)
            .with_param("groupFields", "name");

        assert_eq!(api.builder().descriptor().name, "ContactGroup");
        assert_eq!(api.builder().default_page_size(), Some(25));

        let request = api.builder().list(None, None).unwrap();
        assert_eq!(request.request().path, "contactGroups");
        assert_eq!(request.request().query_value("pageSize"), Some("25"));
        assert_eq!(request.request().query_value("groupFields"), Some("name"));
    }

    #[test]
    fn test_explicit_page_size_wins_over_config() {
        let config = config();
        let client = RestClient::new(&config).unwrap();
        let api = ResourceApi::<ContactGroup>::for_resource(client, &config);

        let request = api.builder().list(Some(7), None).unwrap();
        assert_eq!(request.request().query_value("pageSize"), Some("7"));
    }
}
