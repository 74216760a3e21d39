//! Result types for resource operations that do not return a plain item.
//!
//! [`BatchGetResponse<T>`] implements `Deref<Target = [T]>`, so the loaded
//! items can be used like a slice:
//!
//! ```rust,ignore
//! let response = people.batch_get(&["people/c1", "people/c2"]).await?;
//! for person in response.iter() {
//!     println!("{person:?}");
//! }
//! println!("{} found, {} failed", response.len(), response.failed().len());
//! ```

use std::ops::Deref;

use serde_json::{Map, Value};

/// The result of a batch get.
///
/// Holds the loaded items in response order, the raw entries that carried
/// no item (typically per-name lookup failures with a `status`), and every
/// other top-level field of the response as metadata.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::rest::BatchGetResponse;
/// use serde_json::{json, Map};
///
/// let mut metadata = Map::new();
/// metadata.insert("kind".to_string(), json!("batch"));
///
/// let response = BatchGetResponse::new(vec!["a", "b"], Vec::new(), metadata);
/// assert_eq!(response.len(), 2);
/// assert_eq!(response[1], "b");
/// assert_eq!(response.metadata()["kind"], "batch");
/// ```
#[derive(Debug, Clone)]
pub struct BatchGetResponse<T> {
    items: Vec<T>,
    failed: Vec<Value>,
    metadata: Map<String, Value>,
}

impl<T> BatchGetResponse<T> {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(items: Vec<T>, failed: Vec<Value>, metadata: Map<String, Value>) -> Self {
        Self {
            items,
            failed,
            metadata,
        }
    }

    /// Returns the loaded items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the batch entries that did not contain an item.
    #[must_use]
    pub fn failed(&self) -> &[Value] {
        &self.failed
    }

    /// Returns the top-level response fields other than the entries.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Consumes the response and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Consumes the response and returns the items and the metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Map<String, Value>) {
        (self.items, self.metadata)
    }
}

impl<T> Deref for BatchGetResponse<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// The empty result of a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmptyResponse;

// Verify response types are Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BatchGetResponse<String>>();
    assert_send_sync::<EmptyResponse>();
};
