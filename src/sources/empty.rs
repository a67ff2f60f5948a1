use std::{fmt::Debug, marker::PhantomData};

use crate::{Concat, Error, ResourceIterator, Result};

/// A [`ResourceIterator`] that yields nothing and owns nothing.
///
/// This `struct` is created by [`empty()`](crate::empty).
pub struct Empty<T> {
    open: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    pub(crate) const fn new() -> Self {
        Self {
            open: true,
            _marker: PhantomData,
        }
    }
}

impl<T> ResourceIterator for Empty<T> {
    type Item = T;

    #[inline]
    fn has_next(&mut self) -> Result<bool> {
        self.open = false;
        Ok(false)
    }

    #[inline]
    fn next(&mut self) -> Result<T> {
        if self.open {
            self.open = false;
            Err(Error::Empty)
        } else {
            Err(Error::Closed)
        }
    }

    #[inline]
    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }

    /// Returns a [`Concat`] over `other` alone.
    fn concat<'a, J>(self, other: J) -> Concat<'a, T>
    where
        Self: Sized + 'a,
        J: ResourceIterator<Item = T> + 'a,
    {
        Concat::single(Box::new(other))
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        Self {
            open: self.open,
            _marker: PhantomData,
        }
    }
}

impl<T> Debug for Empty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Empty").field("open", &self.open).finish()
    }
}
