use std::fmt::Debug;

use crate::{Error, Predicate, ResourceIterator, Result, lookahead::Lookahead};

/// A [`ResourceIterator`] that yields elements while a predicate holds.
///
/// This `struct` is created by [`ResourceIterator::take_while()`]. See its documentation for more.
pub struct TakeWhile<I: ResourceIterator, P> {
    source: I,
    pred: P,
    lookahead: Lookahead<I::Item>,
    open: bool,
}

impl<I: ResourceIterator, P> TakeWhile<I, P> {
    pub(crate) fn new(source: I, pred: P) -> Self {
        Self {
            open: source.is_open(),
            source,
            pred,
            lookahead: Lookahead::Unknown,
        }
    }
}

impl<I, P> ResourceIterator for TakeWhile<I, P>
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
        // The first element failing the predicate is dropped here.
        let ready = lookahead.fill(|| {
            Ok(source
                .next_or_none()?
                .filter(|item| pred.test(item)))
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

impl<I, P> Debug for TakeWhile<I, P>
where
    I: ResourceIterator + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeWhile")
            .field("source", &self.source)
            .field("open", &self.open)
            .finish()
    }
}
