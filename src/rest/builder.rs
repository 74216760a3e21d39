//! Preparation of typed requests for a resource API.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpResponse, PreparedRequest, RestClient};
use crate::pages::{NextPage, Page, ResourceIterator, DEFAULT_MAX_EMPTY_PAGES};
use crate::rest::descriptor::{NEXT_PAGE_TOKEN_FIELD, PAGE_SIZE_PARAM, PAGE_TOKEN_PARAM};
use crate::rest::{
    build_path, get_path, BatchGetResponse, EmptyResponse, ResourceDescriptor, ResourceError,
    ResourceOperation,
};
use crate::serializers::{DictSerializer, Serializer, SerializerError};

/// Builds [`PreparedRequest`]s for every operation of one resource API.
///
/// The builder owns the client, the resource descriptor, the serializer for
/// `T`, a default page size, and query parameters sent with every request
/// (for example `personFields` on the People API). Path parameters such as
/// `parent` are set once and combined with the resource name given per call.
///
/// List requests return pages whose continuation re-prepares the list
/// request with the server's `nextPageToken`, keeping the same page size and
/// parameters.
///
/// Cloning is cheap.
///
/// # Example
///
/// ```rust,ignore
/// use google_api_toolkit::rest::RequestBuilder;
/// use google_api_toolkit::serializers::DictSerializer;
/// use std::sync::Arc;
///
/// let builder = RequestBuilder::new(client, PEOPLE, Arc::new(DictSerializer))
///     .param("personFields", "names,emailAddresses");
///
/// let request = builder.get("people/c1")?;
/// let person = request.execute().await?;
/// ```
pub struct RequestBuilder<T> {
    client: RestClient,
    descriptor: ResourceDescriptor,
    serializer: Arc<dyn Serializer<T>>,
    page_size: Option<u32>,
    max_empty_pages: Option<usize>,
    params: Vec<(String, String)>,
    path_params: HashMap<String, String>,
}

impl<T> RequestBuilder<T> {
    /// Creates a builder with no default page size and no extra parameters.
    #[must_use]
    pub fn new(
        client: RestClient,
        descriptor: ResourceDescriptor,
        serializer: Arc<dyn Serializer<T>>,
    ) -> Self {
        Self {
            client,
            descriptor,
            serializer,
            page_size: None,
            max_empty_pages: Some(DEFAULT_MAX_EMPTY_PAGES),
            params: Vec::new(),
            path_params: HashMap::new(),
        }
    }

    /// Sets the page size used when a list call does not give one.
    #[must_use]
    pub const fn page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the empty page limit of iterators built by
    /// [`iterate`](Self::iterate).
    #[must_use]
    pub const fn max_empty_pages(mut self, limit: Option<usize>) -> Self {
        self.max_empty_pages = limit;
        self
    }

    /// Adds a query parameter sent with every request.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds every field of `params` as query parameters sent with every
    /// request.
    ///
    /// `null` fields are skipped and arrays become repeated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if `params` does not
    /// serialize to a JSON object.
    pub fn params<P: Serialize>(mut self, params: &P) -> Result<Self, ResourceError> {
        self.params.extend(query_pairs(params)?);
        Ok(self)
    }

    /// Sets a path placeholder value, such as `parent`.
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key.into(), value.into());
        self
    }

    /// Returns the resource descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Returns the client used to send requests.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Returns the default page size.
    #[must_use]
    pub const fn default_page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Returns the query parameters sent with every request.
    #[must_use]
    pub fn common_params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Picks the path for `operation` and fills in its placeholders.
    fn resolve(
        &self,
        operation: ResourceOperation,
        name: Option<&str>,
    ) -> Result<(HttpMethod, String), ResourceError> {
        let mut values: HashMap<&str, &str> = self
            .path_params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        if let Some(name) = name {
            values.insert("name", name);
        }

        let available: Vec<&str> = values.keys().copied().collect();
        let path = get_path(self.descriptor.paths, operation, &available).ok_or(
            ResourceError::PathResolutionFailed {
                resource: self.descriptor.name,
                operation: operation.as_str(),
            },
        )?;

        Ok((path.http_method, build_path(path.template, &values)))
    }

    fn prepare<R, F>(
        &self,
        operation: ResourceOperation,
        name: Option<&str>,
        body: Option<Value>,
        query: Vec<(String, String)>,
        postproc: F,
    ) -> Result<PreparedRequest<R>, ResourceError>
    where
        F: Fn(HttpResponse) -> Result<R, ResourceError> + Send + Sync + 'static,
    {
        let (method, path) = self.resolve(operation, name)?;

        let mut all_query = self.params.clone();
        all_query.extend(query);

        let request = self.client.prepare(method, &path, body, all_query)?;

        Ok(PreparedRequest::new(
            self.client.clone(),
            request,
            self.descriptor.name,
            name.map(ToString::to_string),
            postproc,
        ))
    }
}

impl<T> RequestBuilder<T>
where
    T: Send + Sync + 'static,
{
    /// Prepares a request fetching the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// get path, or [`ResourceError::Rest`] if the resolved path is invalid.
    pub fn get(&self, name: &str) -> Result<PreparedRequest<T>, ResourceError> {
        let serializer = Arc::clone(&self.serializer);
        self.prepare(
            ResourceOperation::Get,
            Some(name),
            None,
            Vec::new(),
            move |response| serializer.load(response.body).map_err(Into::into),
        )
    }

    /// Prepares a request fetching several resources at once.
    ///
    /// Each name is sent as a repeated query parameter named by the
    /// descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// batch get path.
    pub fn batch_get<I, S>(&self, names: I) -> Result<PreparedRequest<BatchGetResponse<T>>, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let param = self.descriptor.batch_names_param;
        let query = names
            .into_iter()
            .map(|name| (param.to_string(), name.as_ref().to_string()))
            .collect();

        let builder = self.clone();
        self.prepare(
            ResourceOperation::BatchGet,
            None,
            None,
            query,
            move |response| builder.parse_batch(response.body),
        )
    }

    /// Prepares a request creating `obj`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if `obj` cannot be dumped,
    /// or [`ResourceError::PathResolutionFailed`] if the resource has no
    /// create path.
    pub fn create(&self, obj: &T) -> Result<PreparedRequest<T>, ResourceError> {
        let body = self.serializer.dump(obj)?;
        let serializer = Arc::clone(&self.serializer);
        self.prepare(
            ResourceOperation::Create,
            None,
            Some(Value::Object(body)),
            Vec::new(),
            move |response| serializer.load(response.body).map_err(Into::into),
        )
    }

    /// Prepares a request updating the resource called `name` with the
    /// fields of `obj`.
    ///
    /// When the descriptor names an update mask parameter, the dumped
    /// top-level field names are sent in it, comma separated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if `obj` cannot be dumped,
    /// or [`ResourceError::PathResolutionFailed`] if the resource has no
    /// update path.
    pub fn update(&self, name: &str, obj: &T) -> Result<PreparedRequest<T>, ResourceError> {
        let body = self.serializer.dump(obj)?;

        let mut query = Vec::new();
        if let Some(mask_param) = self.descriptor.update_mask_param {
            let mut fields: Vec<&str> = body.keys().map(String::as_str).collect();
            fields.sort_unstable();
            if !fields.is_empty() {
                query.push((mask_param.to_string(), fields.join(",")));
            }
        }

        let serializer = Arc::clone(&self.serializer);
        self.prepare(
            ResourceOperation::Update,
            Some(name),
            Some(Value::Object(body)),
            query,
            move |response| serializer.load(response.body).map_err(Into::into),
        )
    }

    /// Prepares a request deleting the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// delete path.
    pub fn delete(&self, name: &str) -> Result<PreparedRequest<EmptyResponse>, ResourceError> {
        self.prepare(
            ResourceOperation::Delete,
            Some(name),
            None,
            Vec::new(),
            |_| Ok(EmptyResponse),
        )
    }

    /// Prepares a request listing one page of resources.
    ///
    /// `page_size` falls back to the builder's default. An empty
    /// `page_token` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// list path.
    pub fn list(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<PreparedRequest<Page<T>>, ResourceError> {
        let page_size = page_size.or(self.page_size);

        let mut query = Vec::new();
        if let Some(size) = page_size {
            query.push((PAGE_SIZE_PARAM.to_string(), size.to_string()));
        }
        if let Some(token) = page_token.filter(|token| !token.is_empty()) {
            query.push((PAGE_TOKEN_PARAM.to_string(), token.to_string()));
        }

        let builder = self.clone();
        self.prepare(ResourceOperation::List, None, None, query, move |response| {
            builder.parse_page(response.body, page_size)
        })
    }

    /// Prepares a request whose result iterates over every listed
    /// resource, starting at `page_token`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has no
    /// list path.
    pub fn iterate(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<PreparedRequest<ResourceIterator<T>>, ResourceError> {
        let limit = self.max_empty_pages;
        Ok(self
            .list(page_size, page_token)?
            .map(move |page| ResourceIterator::new(page).with_empty_page_limit(limit)))
    }

    fn parse_page(&self, mut body: Value, page_size: Option<u32>) -> Result<Page<T>, ResourceError> {
        let items = match body.get_mut(self.descriptor.items_key).map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => {
                let raw: Vec<Value> = serde_json::from_value(raw).map_err(SerializerError::from)?;
                raw.into_iter()
                    .map(|item| self.serializer.load(item))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let token = body
            .get(NEXT_PAGE_TOKEN_FIELD)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string);

        tracing::debug!(
            resource = self.descriptor.name,
            items = items.len(),
            has_next = token.is_some(),
            "Parsed list page"
        );

        let next = token.clone().map(|token| self.next_page(token, page_size));
        Ok(Page::new(items, token, next))
    }

    fn next_page(&self, token: String, page_size: Option<u32>) -> NextPage<T> {
        let builder = self.clone();
        NextPage::new(move || {
            let builder = builder.clone();
            let token = token.clone();
            async move { builder.list(page_size, Some(&token))?.execute().await }
        })
    }

    fn parse_batch(&self, body: Value) -> Result<BatchGetResponse<T>, ResourceError> {
        let mut metadata = DictSerializer.load(body)?;

        let entries: Vec<Value> = match metadata.remove(self.descriptor.batch_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value(raw).map_err(SerializerError::from)?,
        };

        let mut items = Vec::with_capacity(entries.len());
        let mut failed = Vec::new();
        for mut entry in entries {
            let item = match self.descriptor.batch_item_key {
                Some(key) => entry
                    .get_mut(key)
                    .map(Value::take)
                    .filter(|item| !item.is_null()),
                None => Some(entry.take()),
            };

            match item {
                Some(item) => items.push(self.serializer.load(item)?),
                None => failed.push(entry),
            }
        }

        Ok(BatchGetResponse::new(items, failed, metadata))
    }
}

impl<T> Clone for RequestBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            descriptor: self.descriptor,
            serializer: Arc::clone(&self.serializer),
            page_size: self.page_size,
            max_empty_pages: self.max_empty_pages,
            params: self.params.clone(),
            path_params: self.path_params.clone(),
        }
    }
}

impl<T> fmt::Debug for RequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("resource", &self.descriptor.name)
            .field("page_size", &self.page_size)
            .field("max_empty_pages", &self.max_empty_pages)
            .field("params", &self.params)
            .field("path_params", &self.path_params)
            .finish_non_exhaustive()
    }
}

/// Converts a serializable value into query parameter pairs.
///
/// `null` fields are skipped, arrays of scalars become repeated keys and
/// nested objects are sent as JSON text.
fn query_pairs<P: Serialize>(params: &P) -> Result<Vec<(String, String)>, SerializerError> {
    let map: Map<String, Value> = DictSerializer.load(serde_json::to_value(params)?)?;

    let mut query = Vec::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(values) => {
                query.extend(
                    values
                        .iter()
                        .filter_map(scalar_to_string)
                        .map(|value| (key.clone(), value)),
                );
            }
            other => {
                let value = scalar_to_string(&other).unwrap_or_else(|| other.to_string());
                query.push((key, value));
            }
        }
    }

    Ok(query)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestBuilder<Map<String, Value>>>();
};
