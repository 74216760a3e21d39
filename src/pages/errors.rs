//! Errors raised by the pagination layer itself.
//!
//! Fetch failures are never wrapped here: they surface in the caller's own
//! error type. [`PaginationError`] only covers conditions the iterator
//! detects on its own.

use thiserror::Error;

/// Errors detected while iterating across pages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// Too many consecutive pages came back empty while still promising more.
    #[error("Received more than {limit} consecutive empty pages that still had a continuation. The server may be paginating indefinitely.")]
    EmptyPageLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}
