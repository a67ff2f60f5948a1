use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that yields at most `n` elements.
///
/// This `struct` is created by [`ResourceIterator::take()`]. See its documentation for more.
///
/// Once `n` elements have been yielded, it closes the source without pulling it again.
pub struct Take<I> {
    source: I,
    remaining: usize,
    open: bool,
}

impl<I: ResourceIterator> Take<I> {
    pub(crate) fn new(source: I, n: usize) -> Self {
        Self {
            open: source.is_open(),
            source,
            remaining: n,
        }
    }
}

impl<I: ResourceIterator> ResourceIterator for Take<I> {
    type Item = I::Item;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }
        let ready = self.remaining > 0 && self.source.has_next()?;
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
        let item = self.source.next()?;
        self.remaining -= 1;
        Ok(item)
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.remaining = 0;
        self.source.close()
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }
}

impl<I: Debug> Debug for Take<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Take")
            .field("source", &self.source)
            .field("remaining", &self.remaining)
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
    fn stops_pulling_at_n() {
        let tracker = Tracker::new();
        let pulled = Cell::new(0);
        let mut iter = crate::from_iter(0..)
            .on_close(tracker.action())
            .inspect(|_| pulled.set(pulled.get() + 1))
            .take(3);

        assert_eq!(iter.to_list().unwrap(), [0, 1, 2]);
        assert_eq!(pulled.get(), 3);
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
    }

    #[test]
    fn shorter_source() {
        let mut iter = crate::of([1, 2]).take(5);
        assert_eq!(iter.to_list().unwrap(), [1, 2]);
        assert_closed(&mut iter);
    }

    #[test]
    fn take_zero_closes_on_first_ask() {
        let tracker = Tracker::new();
        let mut iter = crate::of([1]).on_close(tracker.action()).take(0);
        assert!(!iter.has_next().unwrap());
        assert_eq!(tracker.closed(), 1);
    }
}
