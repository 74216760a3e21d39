//! One page of a listing response and its continuation.

use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::rest::ResourceError;

/// Boxed future resolving to the next page.
pub type PageFuture<T, E = ResourceError> = BoxFuture<'static, Result<Page<T, E>, E>>;

/// A deferred fetch of the following page.
///
/// Invoking [`fetch`](Self::fetch) performs one external call and yields the
/// next [`Page`]. The continuation is opaque: it captures whatever request
/// state it needs (typically the page token and request parameters).
///
/// `NextPage` is cheap to clone and may be invoked more than once; each
/// invocation issues a fresh call.
pub struct NextPage<T, E = ResourceError>(Arc<dyn Fn() -> PageFuture<T, E> + Send + Sync>);

impl<T, E> NextPage<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Wraps a function producing the next page.
    ///
    /// # Example
    ///
    /// ```rust
    /// use google_api_toolkit::{NextPage, Page, ResourceError};
    ///
    /// let next: NextPage<u32, ResourceError> =
    ///     NextPage::new(|| async { Ok(Page::last(vec![3, 4])) });
    /// let page = tokio_test::block_on(next.fetch()).unwrap();
    /// assert_eq!(page.items(), &[3, 4]);
    /// ```
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T, E>, E>> + Send + 'static,
    {
        Self(Arc::new(move || fetch().boxed()))
    }
}

impl<T, E> NextPage<T, E> {
    /// Starts fetching the next page.
    #[must_use]
    pub fn fetch(&self) -> PageFuture<T, E> {
        (self.0)()
    }
}

impl<T, E> Clone for NextPage<T, E> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T, E> fmt::Debug for NextPage<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NextPage(..)")
    }
}

/// One page of results from a listing endpoint.
///
/// A page holds its items in server order and, when the server indicated
/// that more results exist, a [`NextPage`] continuation. The page token is
/// kept as informational metadata; traversal only follows the continuation.
///
/// Pages are immutable once built. They dereference to a read-only slice.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::{Page, ResourceError};
///
/// let page: Page<&str, ResourceError> = Page::last(vec!["a", "b"]);
/// assert_eq!(page.len(), 2);
/// assert_eq!(page[0], "a");
/// assert!(!page.has_next());
/// ```
pub struct Page<T, E = ResourceError> {
    items: Vec<T>,
    next_page_token: Option<String>,
    next: Option<NextPage<T, E>>,
}

impl<T, E> Page<T, E> {
    /// Creates a page from its items, the server's page token, and the
    /// continuation (present iff more results exist).
    #[must_use]
    pub const fn new(
        items: Vec<T>,
        next_page_token: Option<String>,
        next: Option<NextPage<T, E>>,
    ) -> Self {
        Self {
            items,
            next_page_token,
            next,
        }
    }

    /// Creates a terminal page with no continuation.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self::new(items, None, None)
    }

    /// Returns the items of this page in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the page token the server returned for the following page.
    #[must_use]
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    /// Returns `true` if a following page can be fetched.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the continuation for the following page, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<&NextPage<T, E>> {
        self.next.as_ref()
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T, E> Deref for Page<T, E> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, T, E> IntoIterator for &'a Page<T, E> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Clone, E> Clone for Page<T, E> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            next_page_token: self.next_page_token.clone(),
            next: self.next.clone(),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Page<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("items", &self.items)
            .field("next_page_token", &self.next_page_token)
            .field("has_next", &self.has_next())
            .finish()
    }
}

// Verify Page is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Page<serde_json::Value>>();
    assert_send_sync::<NextPage<serde_json::Value>>();
};
