//! Flattens a chain of pages into a lazy sequence of items.

use futures::Stream;

use crate::pages::{Page, PageSequencer, PaginationError, Step};
use crate::rest::ResourceError;

/// Default cap on consecutive empty pages that still have a continuation.
pub const DEFAULT_MAX_EMPTY_PAGES: usize = 100;

/// A lazy, pull-based iterator over every item of a paginated listing.
///
/// Items are yielded in page order, then server order within each page.
/// The next page is fetched only when the current one has been drained, and
/// only on demand from [`next`](Self::next). Pages that come back empty but
/// still promise more results are skipped over.
///
/// To guard against servers that never stop returning empty pages, the
/// iterator fails with [`PaginationError::EmptyPageLimitExceeded`] after
/// [`DEFAULT_MAX_EMPTY_PAGES`] consecutive empty pages. Use
/// [`with_empty_page_limit`](Self::with_empty_page_limit) to change or
/// disable the limit.
///
/// The iterator is single-owner and cannot be restarted.
///
/// Driving it requires `T: Clone`: each item is cloned out of the current
/// page so that [`page`](Self::page) keeps showing the whole page being
/// drained. For item types that cannot be cloned, walk the pages with a
/// [`PageSequencer`] and borrow the items of each page instead.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::{NextPage, Page, ResourceError, ResourceIterator, Step};
///
/// let next = NextPage::new(|| async { Ok(Page::last(vec![3])) });
/// let first: Page<u32, ResourceError> = Page::new(vec![1, 2], None, Some(next));
///
/// let items = tokio_test::block_on(ResourceIterator::new(first).try_collect()).unwrap();
/// assert_eq!(items, vec![1, 2, 3]);
/// ```
pub struct ResourceIterator<T, E = ResourceError> {
    pages: PageSequencer<T, E>,
    cursor: usize,
    max_empty_pages: Option<usize>,
}

impl<T, E> ResourceIterator<T, E> {
    /// Creates an iterator starting at the first item of `first`.
    #[must_use]
    pub fn new(first: Page<T, E>) -> Self {
        let mut pages = PageSequencer::new(first);
        pages.start();
        Self {
            pages,
            cursor: 0,
            max_empty_pages: Some(DEFAULT_MAX_EMPTY_PAGES),
        }
    }

    /// Sets how many consecutive empty pages are tolerated.
    ///
    /// `None` removes the limit.
    #[must_use]
    pub const fn with_empty_page_limit(mut self, limit: Option<usize>) -> Self {
        self.max_empty_pages = limit;
        self
    }

    /// Returns the page currently being drained.
    #[must_use]
    pub const fn page(&self) -> &Page<T, E> {
        self.pages.current_page()
    }

    /// Returns the configured empty page limit.
    #[must_use]
    pub const fn empty_page_limit(&self) -> Option<usize> {
        self.max_empty_pages
    }
}

impl<T, E> ResourceIterator<T, E>
where
    T: Clone,
    E: From<PaginationError>,
{
    /// Returns a clone of the next item, fetching the following page when
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged if a page fetch fails. No items from
    /// the failed page are produced, and calling `next` again retries the
    /// same fetch. Returns [`PaginationError::EmptyPageLimitExceeded`]
    /// (converted into `E`) when too many empty pages arrive in a row.
    pub async fn next(&mut self) -> Result<Step<T>, E> {
        let mut empty_run = 0_usize;
        loop {
            if let Some(item) = self.pages.current_page().items().get(self.cursor) {
                self.cursor += 1;
                return Ok(Step::Item(item.clone()));
            }

            match self.pages.advance().await? {
                Step::EndOfSequence => return Ok(Step::EndOfSequence),
                Step::Item(page) => {
                    self.cursor = 0;
                    if page.is_empty() && page.has_next() {
                        empty_run += 1;
                        if let Some(limit) = self.max_empty_pages {
                            if empty_run > limit {
                                tracing::warn!(limit, "Too many consecutive empty pages");
                                return Err(PaginationError::EmptyPageLimitExceeded { limit }.into());
                            }
                        }
                    }
                }
            }
        }
    }

    /// Drains the iterator into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`next`](Self::next).
    pub async fn try_collect(mut self) -> Result<Vec<T>, E> {
        let mut items = Vec::new();
        while let Step::Item(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Converts the iterator into a [`Stream`] of items.
    ///
    /// The stream ends after the last item, or right after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, E>> {
        futures::stream::try_unfold(self, |mut iter| async move {
            let step = iter.next().await?;
            Ok::<_, E>(step.into_option().map(|item| (item, iter)))
        })
    }
}

impl<T: std::fmt::Debug, E> std::fmt::Debug for ResourceIterator<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceIterator")
            .field("pages", &self.pages)
            .field("cursor", &self.cursor)
            .field("max_empty_pages", &self.max_empty_pages)
            .finish()
    }
}

// Verify ResourceIterator is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceIterator<serde_json::Value>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::NextPage;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn chain(pages: Vec<Vec<u32>>, fetches: &Arc<AtomicUsize>) -> Page<u32> {
        let mut iter = pages.into_iter().rev();
        let mut page = Page::last(iter.next().unwrap_or_default());
        for items in iter {
            let following = page.clone();
            let counter = Arc::clone(fetches);
            let next = NextPage::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                let following = following.clone();
                async move { Ok(following) }
            });
            page = Page::new(items, None, Some(next));
        }
        page
    }

    #[test]
    fn test_page_tracks_the_page_being_drained() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let mut iter = ResourceIterator::new(chain(vec![vec![1], vec![2]], &fetches));

        assert_eq!(iter.page().items(), &[1]);
        tokio_test::block_on(async {
            assert_eq!(iter.next().await.unwrap(), Step::Item(1));
            assert_eq!(iter.page().items(), &[1]);
            assert_eq!(iter.next().await.unwrap(), Step::Item(2));
            assert_eq!(iter.page().items(), &[2]);
            assert_eq!(iter.next().await.unwrap(), Step::EndOfSequence);
            assert_eq!(iter.page().items(), &[2]);
        });
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_page_limit_is_enforced() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let pages = vec![vec![1], vec![], vec![], vec![], vec![2]];
        let mut iter =
            ResourceIterator::new(chain(pages, &fetches)).with_empty_page_limit(Some(2));

        tokio_test::block_on(async {
            assert_eq!(iter.next().await.unwrap(), Step::Item(1));
            let result = iter.next().await;
            assert!(matches!(
                result,
                Err(ResourceError::Pagination(
                    PaginationError::EmptyPageLimitExceeded { limit: 2 }
                ))
            ));
        });
        assert_eq!(fetches.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_empty_pages_within_limit_are_skipped() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let pages = vec![vec![1], vec![], vec![], vec![2]];
        let iter = ResourceIterator::new(chain(pages, &fetches)).with_empty_page_limit(Some(2));

        let items = tokio_test::block_on(iter.try_collect()).unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_unbounded_limit_skips_any_number_of_empty_pages() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let mut pages = vec![vec![]; 150];
        pages.push(vec![9]);
        let iter = ResourceIterator::new(chain(pages, &fetches)).with_empty_page_limit(None);

        assert_eq!(iter.empty_page_limit(), None);
        let items = tokio_test::block_on(iter.try_collect()).unwrap();
        assert_eq!(items, vec![9]);
        assert_eq!(fetches.load(Ordering::SeqCst), 150);
    }

    #[test]
    fn test_terminal_empty_page_does_not_count_against_limit() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let iter = ResourceIterator::new(chain(vec![vec![1], vec![]], &fetches))
            .with_empty_page_limit(Some(0));

        let items = tokio_test::block_on(iter.try_collect()).unwrap();
        assert_eq!(items, vec![1]);
    }

    #[test]
    fn test_into_stream_yields_all_items() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let iter = ResourceIterator::new(chain(vec![vec![1, 2], vec![3]], &fetches));

        let items: Vec<u32> = tokio_test::block_on(
            iter.into_stream()
                .map(|item| item.unwrap())
                .collect::<Vec<_>>(),
        );
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_limit() {
        let iter: ResourceIterator<u32> = ResourceIterator::new(Page::last(Vec::new()));
        assert_eq!(iter.empty_page_limit(), Some(DEFAULT_MAX_EMPTY_PAGES));
    }
}
