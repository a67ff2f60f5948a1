use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that maps each element with a function.
///
/// This `struct` is created by [`ResourceIterator::map()`]. See its documentation for more.
pub struct Map<I, F> {
    source: I,
    f: F,
    open: bool,
}

impl<I: ResourceIterator, F> Map<I, F> {
    pub(crate) fn new(source: I, f: F) -> Self {
        Self {
            open: source.is_open(),
            source,
            f,
        }
    }
}

impl<I, F, R> ResourceIterator for Map<I, F>
where
    I: ResourceIterator,
    F: FnMut(I::Item) -> R,
{
    type Item = R;

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

    fn next(&mut self) -> Result<R> {
        if !self.open {
            return Err(Error::Closed);
        }
        match self.source.next_or_none()? {
            Some(item) => Ok((self.f)(item)),
            None => {
                self.close()?;
                Err(Error::Empty)
            }
        }
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

impl<I: Debug, F> Debug for Map<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("source", &self.source)
            .field("open", &self.open)
            .finish()
    }
}
