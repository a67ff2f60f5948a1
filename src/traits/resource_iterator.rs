use std::{cmp::Ordering, hash::Hash};

use indexmap::{IndexMap, IndexSet};

use crate::{
    Chunked, Concat, Distinct, Error, ExpandIter, Filter, FilterMap, FlatMap, Inspect, Items, Map,
    Result, Skip, Take, TakeWhile, Unseen, Wrapped,
};

/// The iterator returned by [`sorted()`](ResourceIterator::sorted) and its variants.
pub type Sorted<T> = Wrapped<std::vec::IntoIter<T>>;

/// A lazy, pull-based iterator that owns a closable resource and releases it exactly once.
///
/// The resource is released when [`close()`](ResourceIterator::close) is called,
/// when the iterator finds out it has no more elements,
/// or when a terminal operation (e.g. [`to_list()`](ResourceIterator::to_list)) returns,
/// whether it succeeds or fails.
/// Leaf sources also release it when dropped.
///
/// Once closed, an iterator stays closed: [`has_next()`](ResourceIterator::has_next)
/// returns `false` and [`next()`](ResourceIterator::next) fails with [`Error::Closed`].
///
/// Adaptors such as [`filter()`](ResourceIterator::filter) and [`map()`](ResourceIterator::map)
/// take ownership of the iterator they wrap. Closing the outermost adaptor closes
/// everything it owns. Nothing is pulled until the outermost adaptor is pulled.
///
/// # Implementing
///
/// Implement the four required methods. [`has_next()`](ResourceIterator::has_next) must be
/// idempotent: calling it again without an intervening [`next()`](ResourceIterator::next)
/// must neither pull more elements nor run callbacks again.
/// An implementation must close itself on the call that discovers exhaustion.
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, convert::Infallible};
/// use resource_iter::prelude::*;
///
/// let closed = Cell::new(0);
/// let words = resource_iter::of(["a,b", "", "c"])
///     .on_close(|| {
///         closed.set(closed.get() + 1);
///         Ok::<_, Infallible>(())
///     })
///     .flat_map_iter(|line| line.split(',').filter(|word| !word.is_empty()))
///     .map(str::to_uppercase)
///     .to_list()
///     .unwrap();
///
/// assert_eq!(words, ["A", "B", "C"]);
/// assert_eq!(closed.get(), 1);
/// ```
pub trait ResourceIterator {
    /// The type of the elements being iterated over.
    type Item;

    /// Returns `true` if [`next()`](ResourceIterator::next) would return an element.
    ///
    /// Repeated calls without an intervening `next()` return the same answer and have no
    /// further effect. The call that finds no element left closes the iterator.
    /// Always returns `Ok(false)` once the iterator is closed.
    fn has_next(&mut self) -> Result<bool>;

    /// Returns the next element.
    ///
    /// Fails with [`Error::Empty`] if there is no element left
    /// and with [`Error::Closed`] if the iterator was already closed.
    fn next(&mut self) -> Result<Self::Item>;

    /// Releases everything this iterator owns.
    ///
    /// Only the first call has an effect, later calls return `Ok(())`.
    /// If several owned resources fail to close, every one of them is still closed
    /// and the failures are reported together. See [`CloseAll`](crate::CloseAll).
    fn close(&mut self) -> Result<()>;

    /// Returns `false` once the iterator has been closed.
    fn is_open(&self) -> bool;

    /// Returns the next element, or `None` if there is none left.
    ///
    /// This never fails with [`Error::Empty`] or [`Error::Closed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let mut iter = resource_iter::of([1]);
    ///
    /// assert_eq!(iter.next_or_none().unwrap(), Some(1));
    /// assert_eq!(iter.next_or_none().unwrap(), None);
    /// assert!(!iter.is_open());
    /// ```
    fn next_or_none(&mut self) -> Result<Option<Self::Item>> {
        if self.has_next()? {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    // Intermediate operations.

    /// Creates an iterator that only yields the elements matching `pred`.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, pred)
    }

    /// Creates an iterator that yields the `Some` results of `f`.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn filter_map<R, F>(self, f: F) -> FilterMap<Self, F, R>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Option<R>,
    {
        FilterMap::new(self, f)
    }

    /// Creates an iterator that yields elements while `pred` returns `true`.
    ///
    /// The first element failing `pred` is pulled from this iterator and dropped,
    /// then the returned iterator closes itself.
    ///
    /// The operation is *intermediate* and *stateless*.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let pulled = std::cell::Cell::new(0);
    /// let taken = resource_iter::of([1, 2, 3, 1, 2, 3])
    ///     .inspect(|_| pulled.set(pulled.get() + 1))
    ///     .take_while(|&num| num < 3)
    ///     .to_list()
    ///     .unwrap();
    ///
    /// assert_eq!(taken, [1, 2]);
    /// // `3` has been pulled too.
    /// assert_eq!(pulled.get(), 3);
    /// ```
    fn take_while<P>(self, pred: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        TakeWhile::new(self, pred)
    }

    /// Creates an iterator that applies `f` to each element.
    ///
    /// `f` runs exactly once per call to [`next()`](ResourceIterator::next), never on
    /// [`has_next()`](ResourceIterator::has_next).
    ///
    /// The operation is *intermediate* and *stateless*.
    fn map<R, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> R,
    {
        Map::new(self, f)
    }

    /// Creates an iterator that calls `f` on each element as it passes through.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn inspect<F>(self, f: F) -> Inspect<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        Inspect::new(self, f)
    }

    /// Creates an iterator that flattens the resource iterators returned by `f`.
    ///
    /// Every inner iterator started is closed when the returned iterator closes.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn flat_map<J, F>(self, f: F) -> FlatMap<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> J,
        J: ResourceIterator,
    {
        FlatMap::new(self, f)
    }

    /// Creates an iterator that flattens the plain iterables returned by `f`.
    ///
    /// The operation is *intermediate* and *stateless*.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let nums = resource_iter::of([vec![1, 2], vec![], vec![3, 4], vec![5]])
    ///     .flat_map_iter(|nums| nums)
    ///     .to_list()
    ///     .unwrap();
    ///
    /// assert_eq!(nums, [1, 2, 3, 4, 5]);
    /// ```
    fn flat_map_iter<U, F>(self, f: F) -> FlatMap<Self, ExpandIter<F>>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
        U: IntoIterator,
    {
        FlatMap::new(self, ExpandIter::new(f))
    }

    /// Creates an iterator that yields each distinct element once, in first-seen order.
    ///
    /// The operation is *intermediate* and *stateful*: every distinct element seen
    /// is retained until the iterator is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let letters = resource_iter::of(["a", "b", "c", "c", "b", "b", "b", "d"])
    ///     .distinct()
    ///     .to_list()
    ///     .unwrap();
    ///
    /// assert_eq!(letters, ["a", "b", "c", "d"]);
    /// ```
    fn distinct(self) -> Distinct<Self>
    where
        Self: Sized,
        Self::Item: Hash + Eq + Clone,
    {
        Filter::new(self, Unseen::new())
    }

    /// Creates an iterator that yields the elements of this iterator, then those of `other`.
    ///
    /// Concatenating onto a [`Concat`] appends to it instead of nesting,
    /// so `a.concat(b).concat(c)` is one flat iterator over three sources.
    ///
    /// The operation is *intermediate* and *stateless*.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let letters = resource_iter::of(["a", "b"])
    ///     .concat(resource_iter::of(["c", "d"]))
    ///     .concat(resource_iter::of(["e"]))
    ///     .to_list()
    ///     .unwrap();
    ///
    /// assert_eq!(letters, ["a", "b", "c", "d", "e"]);
    /// ```
    fn concat<'a, J>(self, other: J) -> Concat<'a, Self::Item>
    where
        Self: Sized + 'a,
        J: ResourceIterator<Item = Self::Item> + 'a,
    {
        Concat::new(Box::new(self), Box::new(other))
    }

    /// Creates an iterator that yields the elements in `Vec`s of `size` elements.
    /// The last chunk may be shorter.
    ///
    /// The operation is *intermediate* and *stateful*.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    fn chunked(self, size: usize) -> Chunked<Self>
    where
        Self: Sized,
    {
        assert!(size != 0, "chunk size must be non-zero");
        Chunked::new(self, size)
    }

    /// Creates an iterator that yields at most `n` elements, then closes this iterator.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, n)
    }

    /// Creates an iterator that drops the first `n` elements.
    ///
    /// The operation is *intermediate* and *stateless*.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Converts this iterator into a [`std::iter::Iterator`] of [`Result`]s
    /// that stops after the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let mut sum = 0;
    /// for num in resource_iter::of([1, 2, 3]).items() {
    ///     sum += num.unwrap();
    /// }
    ///
    /// assert_eq!(sum, 6);
    /// ```
    fn items(self) -> Items<Self>
    where
        Self: Sized,
    {
        Items::new(self)
    }

    /// Drains this iterator, closes it and returns an iterator over its elements
    /// in sorted order.
    ///
    /// The sort is *stable*: equal elements keep their relative order.
    ///
    /// The operation is *intermediate* and *stateful*.
    fn sorted(&mut self) -> Result<Sorted<Self::Item>>
    where
        Self::Item: Ord,
    {
        let mut items = self.to_list()?;
        items.sort();
        Ok(Wrapped::new(items.into_iter()))
    }

    /// Like [`sorted()`](ResourceIterator::sorted), with a comparator.
    fn sorted_by<F>(&mut self, compare: F) -> Result<Sorted<Self::Item>>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        let mut items = self.to_list()?;
        items.sort_by(compare);
        Ok(Wrapped::new(items.into_iter()))
    }

    /// Like [`sorted()`](ResourceIterator::sorted), comparing the keys returned by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let nums = resource_iter::of([78, 2, 49, 8, 32])
    ///     .sorted_by_key(|num| num.to_string())
    ///     .unwrap()
    ///     .to_list()
    ///     .unwrap();
    ///
    /// assert_eq!(nums, [2, 32, 49, 78, 8]);
    /// ```
    fn sorted_by_key<K, F>(&mut self, f: F) -> Result<Sorted<Self::Item>>
    where
        Self: Sized,
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let mut items = self.to_list()?;
        items.sort_by_key(f);
        Ok(Wrapped::new(items.into_iter()))
    }

    // Terminal operations. Each one closes the iterator before returning.

    /// Returns the first element.
    ///
    /// Fails with [`Error::Empty`] if there is none.
    ///
    /// The operation is *terminal*.
    fn first(&mut self) -> Result<Self::Item> {
        scoped(self, |iter| iter.next_or_none()?.ok_or(Error::Empty))
    }

    /// Returns the first element, or `None` if there is none.
    ///
    /// The operation is *terminal*.
    fn first_or_none(&mut self) -> Result<Option<Self::Item>> {
        scoped(self, |iter| iter.next_or_none())
    }

    /// Returns the only element.
    ///
    /// Fails with [`Error::Empty`] if there is none,
    /// and with [`Error::TooManyElements`] if there is more than one.
    ///
    /// The operation is *terminal*.
    fn single(&mut self) -> Result<Self::Item> {
        scoped(self, |iter| {
            let single = iter.next_or_none()?.ok_or(Error::Empty)?;
            if iter.has_next()? {
                Err(Error::TooManyElements)
            } else {
                Ok(single)
            }
        })
    }

    /// Returns the only element, or `None` if there is none or more than one.
    ///
    /// The operation is *terminal*.
    fn single_or_none(&mut self) -> Result<Option<Self::Item>> {
        scoped(self, |iter| {
            let single = iter.next_or_none()?;
            if single.is_some() && iter.has_next()? {
                Ok(None)
            } else {
                Ok(single)
            }
        })
    }

    /// Counts the remaining elements.
    ///
    /// The operation is *terminal*.
    fn count(&mut self) -> Result<usize> {
        scoped(self, |iter| {
            let mut count = 0;
            while iter.next_or_none()?.is_some() {
                count += 1;
            }
            Ok(count)
        })
    }

    /// Collects the remaining elements into a `Vec`.
    ///
    /// A second call returns an empty `Vec`, since the first one closed the iterator.
    ///
    /// The operation is *terminal*.
    fn to_list(&mut self) -> Result<Vec<Self::Item>> {
        scoped(self, |iter| {
            let mut items = Vec::new();
            while let Some(item) = iter.next_or_none()? {
                items.push(item);
            }
            Ok(items)
        })
    }

    /// Collects the remaining elements into a set that preserves first-seen order.
    ///
    /// The operation is *terminal*.
    fn to_set(&mut self) -> Result<IndexSet<Self::Item>>
    where
        Self::Item: Hash + Eq,
    {
        scoped(self, |iter| {
            let mut items = IndexSet::new();
            while let Some(item) = iter.next_or_none()? {
                items.insert(item);
            }
            Ok(items)
        })
    }

    /// Extends `collection` with the remaining elements and returns it.
    ///
    /// The operation is *terminal*.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use resource_iter::prelude::*;
    ///
    /// let by_len = resource_iter::of(["ab", "c", "de"])
    ///     .map(|word| (word.len(), word))
    ///     .collect_into(BTreeMap::new())
    ///     .unwrap();
    ///
    /// assert_eq!(by_len, BTreeMap::from([(1, "c"), (2, "de")]));
    /// ```
    fn collect_into<C>(&mut self, mut collection: C) -> Result<C>
    where
        Self: Sized,
        C: Extend<Self::Item>,
    {
        scoped(self, |iter| {
            while let Some(item) = iter.next_or_none()? {
                collection.extend(Some(item));
            }
            Ok(collection)
        })
    }

    /// Calls `f` on each remaining element.
    ///
    /// The operation is *terminal*.
    fn for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        Self: Sized,
        F: FnMut(Self::Item),
    {
        scoped(self, |iter| {
            while let Some(item) = iter.next_or_none()? {
                f(item);
            }
            Ok(())
        })
    }

    /// Returns `true` if any remaining element matches `pred`.
    /// Stops at the first match.
    ///
    /// The operation is *terminal*.
    fn any<P>(&mut self, mut pred: P) -> Result<bool>
    where
        Self: Sized,
        P: FnMut(Self::Item) -> bool,
    {
        scoped(self, |iter| {
            while let Some(item) = iter.next_or_none()? {
                if pred(item) {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// Returns `true` if every remaining element matches `pred`.
    /// Stops at the first mismatch.
    ///
    /// The operation is *terminal*.
    fn all<P>(&mut self, mut pred: P) -> Result<bool>
    where
        Self: Sized,
        P: FnMut(Self::Item) -> bool,
    {
        scoped(self, |iter| {
            while let Some(item) = iter.next_or_none()? {
                if !pred(item) {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// Folds every remaining element into an accumulator, from left to right.
    ///
    /// The operation is *terminal*.
    fn fold<B, F>(&mut self, init: B, mut f: F) -> Result<B>
    where
        Self: Sized,
        F: FnMut(B, Self::Item) -> B,
    {
        scoped(self, |iter| {
            let mut accum = init;
            while let Some(item) = iter.next_or_none()? {
                accum = f(accum, item);
            }
            Ok(accum)
        })
    }

    /// Groups the remaining elements by the key returned by `key`.
    ///
    /// Keys keep their first-seen order, and elements keep their order within a group.
    ///
    /// The operation is *terminal*.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_iter::prelude::*;
    ///
    /// let groups = resource_iter::of([3, 1, 4, 1, 5, 9, 2, 6])
    ///     .group_by(|num| num % 3)
    ///     .unwrap();
    ///
    /// assert_eq!(groups.keys().copied().collect::<Vec<_>>(), [0, 1, 2]);
    /// assert_eq!(groups[&0], [3, 9, 6]);
    /// assert_eq!(groups[&1], [1, 4, 1]);
    /// assert_eq!(groups[&2], [5, 2]);
    /// ```
    fn group_by<K, F>(&mut self, mut key: F) -> Result<IndexMap<K, Vec<Self::Item>>>
    where
        Self: Sized,
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        scoped(self, |iter| {
            let mut groups = IndexMap::<K, Vec<Self::Item>>::new();
            while let Some(item) = iter.next_or_none()? {
                groups.entry(key(&item)).or_default().push(item);
            }
            Ok(groups)
        })
    }

    /// Indexes the remaining elements by the key returned by `key`.
    ///
    /// Keys keep their first-seen order. If several elements share a key,
    /// the last one wins.
    ///
    /// The operation is *terminal*.
    fn associate_by<K, F>(&mut self, mut key: F) -> Result<IndexMap<K, Self::Item>>
    where
        Self: Sized,
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        scoped(self, |iter| {
            let mut map = IndexMap::new();
            while let Some(item) = iter.next_or_none()? {
                map.insert(key(&item), item);
            }
            Ok(map)
        })
    }

    /// Builds a map from the key-value pairs returned by `f`.
    ///
    /// Keys keep their first-seen order. If several pairs share a key,
    /// the last one wins.
    ///
    /// The operation is *terminal*.
    fn associate<K, V, F>(&mut self, mut f: F) -> Result<IndexMap<K, V>>
    where
        Self: Sized,
        K: Hash + Eq,
        F: FnMut(Self::Item) -> (K, V),
    {
        scoped(self, |iter| {
            let mut map = IndexMap::new();
            while let Some(item) = iter.next_or_none()? {
                let (key, value) = f(item);
                map.insert(key, value);
            }
            Ok(map)
        })
    }

    /// Builds a map from the remaining key-value pairs.
    ///
    /// Keys keep their first-seen order. If several pairs share a key,
    /// the last one wins.
    ///
    /// The operation is *terminal*.
    fn to_map<K, V>(&mut self) -> Result<IndexMap<K, V>>
    where
        Self: ResourceIterator<Item = (K, V)> + Sized,
        K: Hash + Eq,
    {
        self.associate(|pair| pair)
    }
}

/// Runs `body`, then closes `iter` whatever the outcome.
///
/// A failure of `body` takes precedence over a failure to close.
pub(crate) fn scoped<I, R>(iter: &mut I, body: impl FnOnce(&mut I) -> Result<R>) -> Result<R>
where
    I: ResourceIterator + ?Sized,
{
    let result = body(iter);
    let closed = iter.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(error)) | (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close_error)) => {
            tracing::warn!(%close_error, %error, "failed to close after a failed operation");
            Err(error)
        }
    }
}

impl<I> ResourceIterator for Box<I>
where
    I: ResourceIterator + ?Sized,
{
    type Item = I::Item;

    #[inline]
    fn has_next(&mut self) -> Result<bool> {
        (**self).has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }

    #[inline]
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    #[inline]
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    #[inline]
    fn next_or_none(&mut self) -> Result<Option<Self::Item>> {
        (**self).next_or_none()
    }
}
