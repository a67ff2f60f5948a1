use std::fmt::Debug;

use crate::{Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that yields the elements in `Vec`s of a fixed size.
///
/// This `struct` is created by [`ResourceIterator::chunked()`]. See its documentation for more.
pub struct Chunked<I> {
    source: I,
    size: usize,
    open: bool,
}

impl<I: ResourceIterator> Chunked<I> {
    pub(crate) fn new(source: I, size: usize) -> Self {
        debug_assert!(size != 0);
        Self {
            open: source.is_open(),
            source,
            size,
        }
    }
}

impl<I: ResourceIterator> ResourceIterator for Chunked<I> {
    type Item = Vec<I::Item>;

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

    fn next(&mut self) -> Result<Vec<I::Item>> {
        if !self.open {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Empty);
        }

        let mut chunk = Vec::with_capacity(self.size);
        while chunk.len() < self.size {
            match self.source.next_or_none()? {
                Some(item) => chunk.push(item),
                None => break,
            }
        }
        Ok(chunk)
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

impl<I: Debug> Debug for Chunked<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunked")
            .field("source", &self.source)
            .field("size", &self.size)
            .field("open", &self.open)
            .finish()
    }
}
