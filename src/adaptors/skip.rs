use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that drops the first `n` elements of its source.
///
/// This `struct` is created by [`ResourceIterator::skip()`]. See its documentation for more.
///
/// The elements are dropped lazily, on the first pull.
pub struct Skip<I> {
    source: I,
    n: usize,
    open: bool,
}

impl<I: ResourceIterator> Skip<I> {
    pub(crate) fn new(source: I, n: usize) -> Self {
        Self {
            open: source.is_open(),
            source,
            n,
        }
    }
}

impl<I: ResourceIterator> ResourceIterator for Skip<I> {
    type Item = I::Item;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }

        while self.n > 0 {
            if self.source.next_or_none()?.is_none() {
                break;
            }
            self.n -= 1;
        }

        let ready = self.source.has_next()?;
        if !ready {
            self.close()?;
        }
        Ok(ready)
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.open {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Empty);
        }
        self.source.next()
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.source.close()
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }
}

impl<I: Debug> Debug for Skip<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skip")
            .field("source", &self.source)
            .field("n", &self.n)
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::prelude::*;
    use crate::test_utils::{Tracker, assert_closed};

    #[test]
    fn drops_lazily() {
        let pulled = Cell::new(0);
        let mut iter = crate::from_iter(1..=5)
            .inspect(|_| pulled.set(pulled.get() + 1))
            .skip(2);
        assert_eq!(pulled.get(), 0);
        assert_eq!(iter.next().unwrap(), 3);
        assert_eq!(pulled.get(), 3);
        assert_eq!(iter.to_list().unwrap(), [4, 5]);
    }

    #[test]
    fn skip_everything() {
        let tracker = Tracker::new();
        let mut iter = crate::of([1, 2]).on_close(tracker.action()).skip(3);
        assert!(!iter.has_next().unwrap());
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
    }
}
