use std::fmt::Debug;

use crate::{Error, Predicate, ResourceIterator, Result, lookahead::Lookahead};

/// A [`ResourceIterator`] that only yields the elements matching a predicate.
///
/// This `struct` is created by [`ResourceIterator::filter()`]. See its documentation for more.
pub struct Filter<I: ResourceIterator, P> {
    source: I,
    pred: P,
    lookahead: Lookahead<I::Item>,
    open: bool,
}

impl<I: ResourceIterator, P> Filter<I, P> {
    pub(crate) fn new(source: I, pred: P) -> Self {
        Self {
            open: source.is_open(),
            source,
            pred,
            lookahead: Lookahead::Unknown,
        }
    }
}

impl<I, P> ResourceIterator for Filter<I, P>
where
    I: ResourceIterator,
    P: Predicate<I::Item>,
{
    type Item = I::Item;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }

        let Self {
            source,
            pred,
            lookahead,
            ..
        } = self;
        let ready = lookahead.fill(|| {
            while let Some(item) = source.next_or_none()? {
                if pred.test(&item) {
                    return Ok(Some(item));
                }
            }
            Ok(None)
        })?;

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
        self.lookahead.take()
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.lookahead = Lookahead::Exhausted;
        self.source.close()
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }
}

impl<I, P> Debug for Filter<I, P>
where
    I: ResourceIterator + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("source", &self.source)
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_utils::{Tracker, assert_closed};

    #[test]
    fn filter_then_collect() {
        let tracker = Tracker::new();
        let mut iter = crate::of([1, 2, 3, 4, 5])
            .on_close(tracker.action())
            .filter(|&num| num % 2 == 1);
        assert_eq!(iter.to_list().unwrap(), [1, 3, 5]);
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
    }

    #[test]
    fn closes_when_nothing_matches() {
        let tracker = Tracker::new();
        let mut iter = crate::of([1, 2, 3])
            .on_close(tracker.action())
            .filter(|&num| num > 3);
        assert!(!iter.has_next().unwrap());
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
    }

    #[test]
    fn has_next_is_idempotent() {
        let mut tested = 0;
        let mut iter = crate::of([1, 2, 3, 4]).filter(|&num| {
            tested += 1;
            num > 2
        });
        assert!(iter.has_next().unwrap());
        assert!(iter.has_next().unwrap());
        assert_eq!(iter.next().unwrap(), 3);
        assert_eq!(iter.next().unwrap(), 4);
        assert!(!iter.has_next().unwrap());
        drop(iter);
        assert_eq!(tested, 4);
    }

    #[test]
    fn early_close_propagates() {
        let tracker = Tracker::new();
        let mut iter = crate::from_iter(0..)
            .on_close(tracker.action())
            .filter(|num| num % 3 == 0)
            .map(|num| num * 2);
        assert_eq!(iter.next().unwrap(), 0);
        assert_eq!(iter.next().unwrap(), 6);
        iter.close().unwrap();
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
    }

    #[test]
    fn adaptor_over_closed_source_is_closed() {
        let mut source = crate::of([1, 2]);
        source.close().unwrap();
        let mut iter = source.filter(|_| true);
        assert!(!iter.is_open());
        assert_closed(&mut iter);
    }
}
