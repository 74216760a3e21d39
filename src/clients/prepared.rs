//! Typed requests that are ready to send.

use std::fmt;
use std::sync::Arc;

use crate::clients::{HttpRequest, HttpResponse, RestClient};
use crate::rest::ResourceError;

type PostProcessor<T> = Arc<dyn Fn(HttpResponse) -> Result<T, ResourceError> + Send + Sync>;

/// An HTTP request bundled with the client that sends it and the function
/// that turns its response into a `T`.
///
/// Executing does not consume the request: the same `PreparedRequest` can
/// be executed again, issuing a fresh call each time. Error statuses are
/// reported as [`ResourceError`]s for the owning resource, so a 404 becomes
/// [`ResourceError::NotFound`] rather than a bare HTTP error.
///
/// # Example
///
/// ```rust,ignore
/// let request = builder.get("people/c1")?;
/// println!("GET {}", request.request().path);
/// let person = request.execute().await?;
/// ```
pub struct PreparedRequest<T> {
    client: RestClient,
    request: HttpRequest,
    resource: &'static str,
    name: Option<String>,
    postproc: PostProcessor<T>,
}

impl<T> PreparedRequest<T> {
    /// Creates a prepared request.
    ///
    /// `resource` and `name` identify what the request is about and are
    /// used when mapping error statuses.
    pub fn new<F>(
        client: RestClient,
        request: HttpRequest,
        resource: &'static str,
        name: Option<String>,
        postproc: F,
    ) -> Self
    where
        F: Fn(HttpResponse) -> Result<T, ResourceError> + Send + Sync + 'static,
    {
        Self {
            client,
            request,
            resource,
            name,
            postproc: Arc::new(postproc),
        }
    }

    /// Returns the underlying HTTP request.
    #[must_use]
    pub const fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Returns the resource type name.
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }

    /// Sends the request and post-processes the response.
    ///
    /// # Errors
    ///
    /// Returns a semantic [`ResourceError`] for mapped error statuses,
    /// [`ResourceError::Http`] for other transport failures, and whatever
    /// the post-processor reports for malformed responses.
    pub async fn execute(&self) -> Result<T, ResourceError> {
        tracing::debug!(
            resource = self.resource,
            method = %self.request.http_method,
            path = %self.request.path,
            "Executing request"
        );

        let response = self
            .client
            .send(self.request.clone())
            .await
            .map_err(|e| ResourceError::from_rest_error(e, self.resource, self.name.as_deref()))?;

        self.process(response)
    }

    /// Runs the post-processor on a response obtained elsewhere.
    ///
    /// # Errors
    ///
    /// Returns whatever the post-processor reports.
    pub fn process(&self, response: HttpResponse) -> Result<T, ResourceError> {
        (self.postproc)(response)
    }

    /// Chains a conversion onto the post-processor.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> PreparedRequest<U>
    where
        T: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let postproc = self.postproc;
        PreparedRequest::new(
            self.client,
            self.request,
            self.resource,
            self.name,
            move |response| postproc(response).map(&f),
        )
    }
}

impl<T> Clone for PreparedRequest<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            request: self.request.clone(),
            resource: self.resource,
            name: self.name.clone(),
            postproc: Arc::clone(&self.postproc),
        }
    }
}

impl<T> fmt::Debug for PreparedRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("resource", &self.resource)
            .field("name", &self.name)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PreparedRequest<serde_json::Value>>();
};
