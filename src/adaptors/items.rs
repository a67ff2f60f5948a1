use std::iter::FusedIterator;

use crate::{ResourceIterator, Result};

/// A [`std::iter::Iterator`] over the elements of a [`ResourceIterator`].
///
/// This `struct` is created by [`ResourceIterator::items()`]. See its documentation for more.
///
/// It yields `Err` at most once, then stops. The wrapped iterator closes itself
/// on exhaustion like any other, and is closed when this is dropped if it is a leaf.
/// Call [`close()`](Items::close) to release it early.
#[derive(Debug)]
pub struct Items<I> {
    iter: I,
    failed: bool,
}

impl<I: ResourceIterator> Items<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self { iter, failed: false }
    }

    /// Closes the wrapped iterator. See [`ResourceIterator::close()`].
    #[inline]
    pub fn close(&mut self) -> Result<()> {
        self.iter.close()
    }

    /// Returns `true` if the wrapped iterator is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.iter.is_open()
    }

    /// Returns the wrapped iterator.
    #[inline]
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: ResourceIterator> Iterator for Items<I> {
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.iter.next_or_none() {
            Ok(item) => item.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl<I: ResourceIterator> FusedIterator for Items<I> {}
