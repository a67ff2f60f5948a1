use std::fmt::Debug;

use crate::{CloseAll, Error, Expand, ResourceIterator, Result};

/// A [`ResourceIterator`] that flattens the inner iterators produced from each element.
///
/// This `struct` is created by [`ResourceIterator::flat_map()`] and
/// [`ResourceIterator::flat_map_iter()`]. See their documentation for more.
///
/// Only one inner iterator is open at a time. It is closed as soon as it runs out
/// of elements, before the next one is created, so closing a `FlatMap` early
/// releases the outer iterator and at most one inner one.
pub struct FlatMap<I, E>
where
    I: ResourceIterator,
    E: Expand<I::Item>,
{
    outer: I,
    expand: E,
    current: Option<E::Inner>,
    open: bool,
}

impl<I, E> FlatMap<I, E>
where
    I: ResourceIterator,
    E: Expand<I::Item>,
{
    pub(crate) fn new(outer: I, expand: E) -> Self {
        Self {
            open: outer.is_open(),
            outer,
            expand,
            current: None,
        }
    }
}

impl<I, E> ResourceIterator for FlatMap<I, E>
where
    I: ResourceIterator,
    E: Expand<I::Item>,
{
    type Item = <E::Inner as ResourceIterator>::Item;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }

        loop {
            if let Some(current) = self.current.as_mut() {
                if current.has_next()? {
                    return Ok(true);
                }
                // An inner iterator that doesn't close itself on exhaustion
                // is closed here, before it is let go.
                if let Some(mut exhausted) = self.current.take()
                    && exhausted.is_open()
                {
                    exhausted.close()?;
                }
            }

            match self.outer.next_or_none()? {
                Some(item) => self.current = Some(self.expand.expand(item)),
                None => {
                    self.close()?;
                    return Ok(false);
                }
            }
        }
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.open {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Empty);
        }
        match self.current.as_mut() {
            Some(current) => current.next(),
            None => Err(Error::Empty),
        }
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;

        let mut close_all = CloseAll::new();
        close_all.close(&mut self.outer).close_each(&mut self.current);
        self.current = None;
        close_all.finish()
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }
}

impl<I, E> Debug for FlatMap<I, E>
where
    I: ResourceIterator + Debug,
    E: Expand<I::Item>,
    E::Inner: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMap")
            .field("outer", &self.outer)
            .field("current", &self.current)
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::prelude::*;
    use crate::test_utils::{Tracker, assert_closed};

    #[test]
    fn closes_every_inner_including_empty_ones() {
        let outer = Tracker::new();
        let inner = Tracker::new();
        let mut iter = crate::of([vec![1, 2], vec![], vec![3, 4], vec![5]])
            .on_close(outer.action())
            .flat_map(|nums| crate::from_iter(nums).on_close(inner.action()));

        assert_eq!(iter.to_list().unwrap(), [1, 2, 3, 4, 5]);
        assert_eq!(outer.closed(), 1);
        assert_eq!(inner.closed(), 4);
        assert_closed(&mut iter);
    }

    #[test]
    fn lazy_until_pulled() {
        let mut expanded = 0;
        let mut iter = crate::of([1, 2, 3]).flat_map_iter(|num| {
            expanded += 1;
            [num; 2]
        });
        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(iter.next().unwrap(), 1);
        iter.close().unwrap();
        drop(iter);
        assert_eq!(expanded, 1);
    }

    #[test]
    fn early_close_releases_current_inner() {
        let outer = Tracker::new();
        let inner = Tracker::new();
        let mut iter = crate::from_iter(0..)
            .on_close(outer.action())
            .flat_map(|num| crate::from_iter(num..).on_close(inner.action()));

        assert_eq!(iter.next().unwrap(), 0);
        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(inner.closed(), 0);

        iter.close().unwrap();
        assert_eq!(outer.closed(), 1);
        assert_eq!(inner.closed(), 1);
        assert_closed(&mut iter);
    }

    #[test]
    fn aggregates_close_failures() {
        let outer = Tracker::new();
        let inner = Tracker::new();
        let mut iter = crate::from_iter(["a", "b"])
            .on_close(outer.failing("outer"))
            .flat_map(|word| crate::from_iter(word.chars().cycle()).on_close(inner.failing("inner")));

        assert_eq!(iter.next().unwrap(), 'a');
        let error = iter.close().unwrap_err();
        let failures: Vec<_> = error.failures().iter().map(ToString::to_string).collect();
        assert_eq!(failures, ["outer", "inner"]);
        assert_eq!(outer.closed(), 1);
        assert_eq!(inner.closed(), 1);
        assert!(!iter.is_open());
    }

    #[test]
    fn empty_inners_are_let_go_at_once() {
        let mut iter = crate::from_iter(
            std::iter::repeat_n(0, 10_000)
                .chain([1])
                .chain(std::iter::repeat(2)),
        )
        .flat_map(|num| -> Box<dyn ResourceIterator<Item = i32>> {
            match num {
                0 => Box::new(crate::empty()),
                1 => Box::new(crate::of([7])),
                _ => Box::new(crate::of([8])),
            }
        });

        assert_eq!(iter.next().unwrap(), 7);
        assert!(iter.current.as_ref().is_some_and(|current| current.is_open()));
        assert_eq!(iter.next().unwrap(), 8);
        iter.close().unwrap();
        assert_closed(&mut iter);
    }

    /// Reports exhaustion without closing itself.
    struct Lingering<'a> {
        remaining: u32,
        tracker: &'a Tracker,
        open: bool,
    }

    impl ResourceIterator for Lingering<'_> {
        type Item = u32;

        fn has_next(&mut self) -> Result<bool, Error> {
            Ok(self.open && self.remaining > 0)
        }

        fn next(&mut self) -> Result<u32, Error> {
            if !self.has_next()? {
                return Err(Error::Empty);
            }
            self.remaining -= 1;
            Ok(self.remaining)
        }

        fn close(&mut self) -> Result<(), Error> {
            if self.open {
                self.open = false;
                self.tracker.action().on_close()?;
            }
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    #[test]
    fn exhausted_inner_is_closed_before_the_next_one() {
        let inner = Tracker::new();
        let mut iter = crate::of([2, 0, 1]).flat_map(|remaining| Lingering {
            remaining,
            tracker: &inner,
            open: true,
        });

        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(iter.next().unwrap(), 0);
        assert_eq!(inner.closed(), 0);

        // Moving past the first two inners closes both.
        assert_eq!(iter.next().unwrap(), 0);
        assert_eq!(inner.closed(), 2);

        assert!(!iter.has_next().unwrap());
        assert_eq!(inner.closed(), 3);
        assert_closed(&mut iter);
    }

    #[test]
    fn inner_failure_propagates() {
        let mut iter = crate::of([1, 2]).flat_map(|num| {
            crate::try_from_iter([Ok(num), Err(io::Error::other("broken inner"))])
        });
        assert_eq!(iter.next().unwrap(), 1);
        let error = iter.next().unwrap_err();
        assert_eq!(error.to_string(), "broken inner");
    }
}
