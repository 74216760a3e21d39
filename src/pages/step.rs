//! Explicit step result for lazy sequences.

/// The outcome of pulling one element from a lazy sequence.
///
/// Exhaustion is an ordinary value, not an error: `Ok(Step::EndOfSequence)`
/// means the sequence finished normally.
///
/// # Example
///
/// ```rust
/// use google_api_toolkit::Step;
///
/// let step = Step::Item(3);
/// assert_eq!(step.map(|n| n * 2).into_option(), Some(6));
/// assert!(Step::<i32>::EndOfSequence.is_end());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step<T> {
    /// The next element.
    Item(T),
    /// The sequence is exhausted.
    EndOfSequence,
}

impl<T> Step<T> {
    /// Returns `true` if this is [`Step::EndOfSequence`].
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::EndOfSequence)
    }

    /// Converts into an `Option`, mapping exhaustion to `None`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::EndOfSequence => None,
        }
    }

    /// Maps the carried element, leaving exhaustion untouched.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Step<U> {
        match self {
            Self::Item(item) => Step::Item(f(item)),
            Self::EndOfSequence => Step::EndOfSequence,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::EndOfSequence, Self::Item)
    }
}
