use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result, lookahead::Lookahead};

/// A [`ResourceIterator`] that yields the `Some` results of a function.
///
/// This `struct` is created by [`ResourceIterator::filter_map()`]. See its documentation for more.
pub struct FilterMap<I, F, R> {
    source: I,
    f: F,
    lookahead: Lookahead<R>,
    open: bool,
}

impl<I: ResourceIterator, F, R> FilterMap<I, F, R> {
    pub(crate) fn new(source: I, f: F) -> Self {
        Self {
            open: source.is_open(),
            source,
            f,
            lookahead: Lookahead::Unknown,
        }
    }
}

impl<I, F, R> ResourceIterator for FilterMap<I, F, R>
where
    I: ResourceIterator,
    F: FnMut(I::Item) -> Option<R>,
{
    type Item = R;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }

        let Self {
            source,
            f,
            lookahead,
            ..
        } = self;
        let ready = lookahead.fill(|| {
            while let Some(item) = source.next_or_none()? {
                if let Some(mapped) = f(item) {
                    return Ok(Some(mapped));
                }
            }
            Ok(None)
        })?;

        if !ready {
            self.close()?;
        }
        Ok(ready)
    }

    fn next(&mut self) -> Result<R> {
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

impl<I: Debug, F, R> Debug for FilterMap<I, F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterMap")
            .field("source", &self.source)
            .field("open", &self.open)
            .finish()
    }
}
