//! Lazy traversal of paginated listings.
//!
//! A listing endpoint returns its results one [`Page`] at a time. Each page
//! carries an optional [`NextPage`] continuation that fetches the following
//! page on demand.
//!
//! - [`PageSequencer`]: produces the pages in order, fetching lazily
//! - [`ResourceIterator`]: flattens the pages into a sequence of items
//! - [`Step`]: explicit "next item or end of sequence" result
//! - [`PaginationError`]: errors detected by the iterator itself
//!
//! Nothing is prefetched. A page is requested only when a consumer asks
//! for an item past the end of the current page. Fetch failures propagate
//! to the caller unchanged.
//!
//! # Example
//!
//! ```rust
//! use google_api_toolkit::{NextPage, Page, ResourceError, ResourceIterator, Step};
//!
//! let second = NextPage::new(|| async { Ok(Page::last(vec!["c"])) });
//! let first: Page<&str, ResourceError> =
//!     Page::new(vec!["a", "b"], Some("token".to_string()), Some(second));
//!
//! let mut items = ResourceIterator::new(first);
//! tokio_test::block_on(async {
//!     while let Step::Item(item) = items.next().await.unwrap() {
//!         println!("{item}");
//!     }
//! });
//! ```

mod errors;
mod iterator;
mod page;
mod sequencer;
mod step;

pub use errors::PaginationError;
pub use iterator::{ResourceIterator, DEFAULT_MAX_EMPTY_PAGES};
pub use page::{NextPage, Page, PageFuture};
pub use sequencer::PageSequencer;
pub use step::Step;
