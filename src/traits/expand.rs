use std::fmt::Debug;

use crate::{ResourceIterator, Wrapped};

/// Turns one element into the inner iterator flattened by [`FlatMap`](crate::FlatMap).
///
/// Every `FnMut(T) -> J` closure where `J` is a [`ResourceIterator`] expands elements.
/// [`ExpandIter`] adapts closures returning a plain [`IntoIterator`].
pub trait Expand<T> {
    /// The inner iterator produced for each element.
    type Inner: ResourceIterator;

    /// Produces the inner iterator for `item`.
    fn expand(&mut self, item: T) -> Self::Inner;
}

impl<T, F, J> Expand<T> for F
where
    F: FnMut(T) -> J,
    J: ResourceIterator,
{
    type Inner = J;

    #[inline]
    fn expand(&mut self, item: T) -> J {
        self(item)
    }
}

/// An [`Expand`] wrapping a closure that returns a plain [`IntoIterator`].
///
/// This `struct` is created by [`ResourceIterator::flat_map_iter()`]. See its documentation for more.
#[derive(Clone)]
pub struct ExpandIter<F>(F);

impl<F> ExpandIter<F> {
    pub(crate) fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F, U> Expand<T> for ExpandIter<F>
where
    F: FnMut(T) -> U,
    U: IntoIterator,
{
    type Inner = Wrapped<U::IntoIter>;

    #[inline]
    fn expand(&mut self, item: T) -> Self::Inner {
        Wrapped::new((self.0)(item).into_iter())
    }
}

impl<F> Debug for ExpandIter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandIter").finish_non_exhaustive()
    }
}
