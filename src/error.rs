//! Errors produced by resource iterators.

use std::fmt;

/// A type-erased error raised by user code: a close action, a fallible
/// generator or a fallible external source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized [`Result`](std::result::Result) for resource iterator operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type of every [`ResourceIterator`](crate::ResourceIterator) operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The iterator has already been closed, explicitly or by exhaustion.
    #[error("iterator is closed")]
    Closed,

    /// No element is available.
    #[error("iterator is empty")]
    Empty,

    /// [`single()`](crate::ResourceIterator::single) found more than one element.
    #[error("iterator has more than one element")]
    TooManyElements,

    /// Two or more cleanup actions failed.
    ///
    /// A single failure is never wrapped in this variant.
    /// See [`CloseAll`](crate::CloseAll).
    #[error("{}", CompositeDisplay(.0))]
    Composite(Vec<Error>),

    /// A failure raised by user code.
    #[error(transparent)]
    Source(BoxError),
}

impl Error {
    /// Wraps a failure raised by user code.
    ///
    /// If the failure already is an [`Error`] (e.g. a close action that closes
    /// another resource iterator), it is unwrapped instead of nested.
    pub fn from_source(error: impl Into<BoxError>) -> Self {
        match error.into().downcast::<Error>() {
            Ok(error) => *error,
            Err(error) => Self::Source(error),
        }
    }

    /// Returns the failures carried by [`Error::Composite`], or a one-element
    /// slice containing `self` for every other variant.
    pub fn failures(&self) -> &[Error] {
        match self {
            Self::Composite(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }

    /// Returns `true` if this is [`Error::Closed`].
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns `true` if this is [`Error::Empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

struct CompositeDisplay<'a>(&'a [Error]);

impl fmt::Display for CompositeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors while closing resources", self.0.len())?;
        for (i, error) in self.0.iter().enumerate() {
            write!(f, "\n  {}: {error}", i + 1)?;
        }
        Ok(())
    }
}
