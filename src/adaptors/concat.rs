use std::{collections::VecDeque, fmt::Debug, ops::Add};

use crate::{CloseAll, Error, ResourceIterator, Result};

type Source<'a, T> = Box<dyn ResourceIterator<Item = T> + 'a>;

/// A [`ResourceIterator`] over several sources, one after another.
///
/// This `struct` is created by [`ResourceIterator::concat()`]. See its documentation for more.
///
/// Concatenating onto a `Concat`, with [`concat()`](ResourceIterator::concat)
/// or the `+` operator, appends the new source in place.
///
/// # Examples
///
/// ```
/// use resource_iter::prelude::*;
///
/// let iter = resource_iter::of([1]).concat(resource_iter::of([2]));
/// let mut iter = iter + resource_iter::of([3]) + resource_iter::empty();
///
/// assert_eq!(iter.to_list().unwrap(), [1, 2, 3]);
/// ```
pub struct Concat<'a, T> {
    // Sources pulled at least once. The last one is the current source.
    started: Vec<Source<'a, T>>,
    pending: VecDeque<Source<'a, T>>,
    open: bool,
}

impl<'a, T> Concat<'a, T> {
    pub(crate) fn new(first: Source<'a, T>, second: Source<'a, T>) -> Self {
        Self {
            started: Vec::new(),
            pending: VecDeque::from([first, second]),
            open: true,
        }
    }

    pub(crate) fn single(first: Source<'a, T>) -> Self {
        Self {
            started: Vec::new(),
            pending: VecDeque::from([first]),
            open: true,
        }
    }

    fn push(&mut self, other: Source<'a, T>) {
        if self.open {
            self.pending.push_back(other);
        } else {
            // Nothing would ever pull or close it otherwise.
            let mut other = other;
            if let Err(error) = other.close() {
                tracing::warn!(%error, "failed to close a source appended to a closed iterator");
            }
        }
    }
}

impl<'a, T> ResourceIterator for Concat<'a, T> {
    type Item = T;

    fn has_next(&mut self) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }

        loop {
            if let Some(current) = self.started.last_mut()
                && current.has_next()?
            {
                return Ok(true);
            }

            match self.pending.pop_front() {
                Some(next) => self.started.push(next),
                None => {
                    self.close()?;
                    return Ok(false);
                }
            }
        }
    }

    fn next(&mut self) -> Result<T> {
        if !self.open {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Empty);
        }
        match self.started.last_mut() {
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
        close_all
            .close_each(&mut self.started)
            .close_each(&mut self.pending);
        self.started.clear();
        self.pending.clear();
        close_all.finish()
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }

    /// Appends `other` to this iterator instead of nesting it.
    fn concat<'b, J>(self, other: J) -> Concat<'b, T>
    where
        Self: Sized + 'b,
        J: ResourceIterator<Item = T> + 'b,
    {
        let mut this: Concat<'b, T> = self;
        this.push(Box::new(other));
        this
    }
}

impl<'a, T, J> Add<J> for Concat<'a, T>
where
    J: ResourceIterator<Item = T> + 'a,
{
    type Output = Self;

    fn add(mut self, other: J) -> Self {
        self.push(Box::new(other));
        self
    }
}

impl<T> Debug for Concat<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Concat")
            .field("started", &self.started.len())
            .field("pending", &self.pending.len())
            .field("open", &self.open)
            .finish()
    }
}
