use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that calls a function with a reference to each element
/// before yielding it.
///
/// This `struct` is created by [`ResourceIterator::inspect()`]. See its documentation for more.
pub struct Inspect<I, F> {
    source: I,
    f: F,
    open: bool,
}

impl<I: ResourceIterator, F> Inspect<I, F> {
    pub(crate) fn new(source: I, f: F) -> Self {
        Self {
            open: source.is_open(),
            source,
            f,
        }
    }
}

impl<I, F> ResourceIterator for Inspect<I, F>
where
    I: ResourceIterator,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
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
        let Some(item) = self.source.next_or_none()? else {
            self.close()?;
            return Err(Error::Empty);
        };
        (self.f)(&item);
        Ok(item)
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

impl<I: Debug, F> Debug for Inspect<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspect")
            .field("source", &self.source)
            .field("open", &self.open)
            .finish()
    }
}
