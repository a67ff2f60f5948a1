//! Leaf iterators and the functions creating them.
//!
//! A leaf owns no other resource iterator. Attach the resource it guards
//! with `on_close()`.

mod empty;
mod generator;
mod wrapped;

pub use empty::*;
pub use generator::*;
pub use wrapped::*;

use std::{array, convert::Infallible};

use crate::BoxError;

/// Creates a resource iterator over the given values.
///
/// # Examples
///
/// ```
/// use resource_iter::prelude::*;
///
/// let mut iter = resource_iter::of([1, 2, 3]);
///
/// assert_eq!(iter.to_list().unwrap(), [1, 2, 3]);
/// assert!(!iter.is_open());
/// ```
#[inline]
pub fn of<T, const N: usize>(values: [T; N]) -> Wrapped<array::IntoIter<T, N>> {
    Wrapped::new(values.into_iter())
}

/// Creates a resource iterator over anything iterable: a collection,
/// a range or an existing iterator.
#[inline]
pub fn from_iter<I: IntoIterator>(iter: I) -> Wrapped<I::IntoIter> {
    Wrapped::new(iter.into_iter())
}

/// Creates a resource iterator over the entries of a map, as key-value pairs.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use resource_iter::prelude::*;
///
/// let prices = BTreeMap::from([("apple", 3), ("pear", 4)]);
/// let total = resource_iter::from_entries(&prices)
///     .fold(0, |total, (_, price)| total + price)
///     .unwrap();
///
/// assert_eq!(total, 7);
/// ```
#[inline]
pub fn from_entries<M, K, V>(map: M) -> Wrapped<M::IntoIter>
where
    M: IntoIterator<Item = (K, V)>,
{
    Wrapped::new(map.into_iter())
}

/// Creates a resource iterator that calls `f` for each element until it returns `None`.
///
/// # Examples
///
/// ```
/// use resource_iter::prelude::*;
///
/// let mut countdown = 3;
/// let nums = resource_iter::generate(|| {
///     countdown -= 1;
///     (countdown >= 0).then_some(countdown)
/// })
/// .to_list()
/// .unwrap();
///
/// assert_eq!(nums, [2, 1, 0]);
/// ```
#[inline]
pub fn generate<T, F>(mut f: F) -> Generator<impl Generate<Item = T>>
where
    F: FnMut() -> Option<T>,
{
    Generator::new(move || Ok::<_, Infallible>(f()))
}

/// Creates a resource iterator that calls a fallible `f` for each element
/// until it returns `Ok(None)`.
#[inline]
pub fn try_generate<T, E, F>(f: F) -> Generator<F>
where
    F: FnMut() -> Result<Option<T>, E>,
    E: Into<BoxError>,
{
    Generator::new(f)
}

/// Creates a resource iterator over an iterator of [`Result`]s.
///
/// Each `Err` is returned as [`Error::Source`](crate::Error::Source) by the call
/// that pulls it.
#[inline]
pub fn try_from_iter<I, T, E>(iter: I) -> Generator<impl Generate<Item = T>>
where
    I: IntoIterator<Item = Result<T, E>>,
    E: Into<BoxError>,
{
    let mut iter = iter.into_iter();
    Generator::new(move || iter.next().transpose())
}

/// Creates a resource iterator that yields nothing.
#[inline]
pub const fn empty<T>() -> Empty<T> {
    Empty::new()
}
