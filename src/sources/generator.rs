use std::fmt::Debug;

use crate::{BoxError, Error, NoopClose, OnClose, ResourceIterator, Result, lookahead::Lookahead};

/// Produces the elements of a [`Generator`].
///
/// Every `FnMut() -> Result<Option<T>, E>` closure whose error converts into a
/// [`BoxError`] is a generator function. Returning `Ok(None)` ends the generation.
pub trait Generate {
    /// The type of the generated elements.
    type Item;

    /// Produces the next element, or `None` if there is none left.
    fn generate(&mut self) -> Result<Option<Self::Item>>;
}

impl<F, T, E> Generate for F
where
    F: FnMut() -> Result<Option<T>, E>,
    E: Into<BoxError>,
{
    type Item = T;

    #[inline]
    fn generate(&mut self) -> Result<Option<T>> {
        self().map_err(Error::from_source)
    }
}

/// A [`ResourceIterator`] that calls a function for each element until it returns `None`.
///
/// This `struct` is created by [`generate()`](crate::generate),
/// [`try_generate()`](crate::try_generate) and [`try_from_iter()`](crate::try_from_iter).
///
/// `None` marks the end of the generation, so it can never be produced as an element.
/// A generator is iterated only once: after it is closed the function is dropped
/// and never called again.
///
/// A failure of the function is returned from the call that triggered it
/// and leaves the generator open.
pub struct Generator<G, C = NoopClose>
where
    G: Generate,
    C: OnClose,
{
    // `None` once closed.
    generate: Option<G>,
    lookahead: Lookahead<G::Item>,
    on_close: Option<C>,
}

impl<G: Generate> Generator<G> {
    pub(crate) fn new(generate: G) -> Self {
        Self {
            generate: Some(generate),
            lookahead: Lookahead::Unknown,
            on_close: Some(NoopClose),
        }
    }
}

impl<G, C> Generator<G, C>
where
    G: Generate,
    C: OnClose,
{
    /// Replaces the close action of this iterator.
    ///
    /// The previous action is discarded without running.
    /// If this iterator is already closed, so is the returned one and `action` never runs.
    pub fn on_close<D: OnClose>(mut self, action: D) -> Generator<G, D> {
        self.on_close = None;
        Generator {
            on_close: self.generate.is_some().then_some(action),
            generate: self.generate.take(),
            lookahead: std::mem::take(&mut self.lookahead),
        }
    }
}

impl<G, C> ResourceIterator for Generator<G, C>
where
    G: Generate,
    C: OnClose,
{
    type Item = G::Item;

    fn has_next(&mut self) -> Result<bool> {
        let Some(generate) = self.generate.as_mut() else {
            return Ok(false);
        };

        let ready = self.lookahead.fill(|| generate.generate())?;
        if !ready {
            self.close()?;
        }
        Ok(ready)
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.is_open() {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Empty);
        }
        self.lookahead.take()
    }

    fn close(&mut self) -> Result<()> {
        if self.generate.take().is_none() {
            return Ok(());
        }

        tracing::trace!("closing generator");
        self.lookahead = Lookahead::Exhausted;
        self.on_close.take().map_or(Ok(()), OnClose::on_close)
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.generate.is_some()
    }
}

impl<G, C> Drop for Generator<G, C>
where
    G: Generate,
    C: OnClose,
{
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::warn!(%error, "failed to close a dropped generator");
        }
    }
}

impl<G, C> Debug for Generator<G, C>
where
    G: Generate,
    C: OnClose,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io, rc::Rc};

    use crate::prelude::*;
    use crate::test_utils::{Tracker, assert_closed};

    #[test]
    fn none_on_first_call_is_empty() {
        let tracker = Tracker::new();
        let calls = Rc::new(Cell::new(0));
        let mut iter = crate::generate({
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                None::<i32>
            }
        })
        .on_close(tracker.action());

        assert!(!iter.has_next().unwrap());
        assert_eq!(tracker.closed(), 1);
        assert_closed(&mut iter);
        // Never called again once closed.
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn has_next_calls_once() {
        let calls = Cell::new(0);
        let mut iter = crate::generate(|| {
            calls.set(calls.get() + 1);
            (calls.get() <= 2).then_some(calls.get())
        });

        for _ in 0..3 {
            assert!(iter.has_next().unwrap());
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(iter.next().unwrap(), 2);
        assert!(iter.next().unwrap_err().is_empty());
        assert_eq!(calls.get(), 3);
        assert_closed(&mut iter);
    }

    #[test]
    fn failure_leaves_it_open() {
        let tracker = Tracker::new();
        let mut failed = false;
        let mut iter = crate::try_generate(move || {
            if failed {
                Ok(Some(1))
            } else {
                failed = true;
                Err(io::Error::other("not yet"))
            }
        })
        .on_close(tracker.action());

        assert!(matches!(iter.has_next(), Err(Error::Source(_))));
        assert!(iter.is_open());
        assert_eq!(tracker.closed(), 0);

        // The next call asks the function again.
        assert_eq!(iter.next().unwrap(), 1);
        iter.close().unwrap();
        assert_eq!(tracker.closed(), 1);
    }

    #[test]
    fn fallible_source() {
        let lines = ["1", "2", "x", "4"].map(|line| line.parse::<i32>());
        let mut iter = crate::try_from_iter(lines);
        assert_eq!(iter.next().unwrap(), 1);
        assert_eq!(iter.next().unwrap(), 2);
        let error = iter.next().unwrap_err();
        assert!(error.to_string().contains("invalid digit"));
        assert_eq!(iter.next().unwrap(), 4);
    }
}
