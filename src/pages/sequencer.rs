//! Walks the chain of pages one fetch at a time.

use crate::pages::{Page, Step};
use crate::rest::ResourceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Active,
    Exhausted,
}

/// Produces the pages of a listing in order, starting from a page already
/// in hand.
///
/// The first [`advance`](Self::advance) returns the starting page without
/// any network activity. Each later call invokes the current page's
/// continuation exactly once and returns the fetched page. When the current
/// page has no continuation the sequencer becomes exhausted and stays so.
///
/// A failed fetch leaves the sequencer on the page it was on, so the error
/// can be inspected and the same fetch attempted again by calling
/// `advance` once more.
pub struct PageSequencer<T, E = ResourceError> {
    current: Page<T, E>,
    state: State,
}

impl<T, E> PageSequencer<T, E> {
    /// Creates a sequencer positioned before `first`.
    #[must_use]
    pub const fn new(first: Page<T, E>) -> Self {
        Self {
            current: first,
            state: State::Fresh,
        }
    }

    /// Returns the page most recently produced (or the starting page).
    #[must_use]
    pub const fn current_page(&self) -> &Page<T, E> {
        &self.current
    }

    /// Returns `true` once the final page has been passed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Marks the starting page as produced without awaiting anything.
    pub(crate) fn start(&mut self) {
        if self.state == State::Fresh {
            self.state = State::Active;
        }
    }

    /// Moves to the next page.
    ///
    /// # Errors
    ///
    /// Returns the continuation's error unchanged if fetching fails.
    pub async fn advance(&mut self) -> Result<Step<&Page<T, E>>, E> {
        match self.state {
            State::Fresh => {
                self.state = State::Active;
                Ok(Step::Item(&self.current))
            }
            State::Exhausted => Ok(Step::EndOfSequence),
            State::Active => {
                let Some(next) = self.current.next_page().cloned() else {
                    self.state = State::Exhausted;
                    return Ok(Step::EndOfSequence);
                };

                tracing::debug!(
                    page_token = self.current.next_page_token(),
                    "Fetching next page"
                );
                let page = next.fetch().await?;
                tracing::debug!(
                    items = page.len(),
                    has_next = page.has_next(),
                    "Fetched page"
                );

                self.current = page;
                Ok(Step::Item(&self.current))
            }
        }
    }
}

impl<T: std::fmt::Debug, E> std::fmt::Debug for PageSequencer<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSequencer")
            .field("current", &self.current)
            .field("state", &self.state)
            .finish()
    }
}
