use std::{fmt::Debug, iter::Peekable};

use crate::{Error, NoopClose, OnClose, ResourceIterator, Result};

/// A [`ResourceIterator`] over a plain [`Iterator`], with an optional close action.
///
/// This `struct` is created by [`of()`](crate::of), [`from_iter()`](crate::from_iter)
/// and [`from_entries()`](crate::from_entries).
///
/// Closing it drops the underlying iterator, then runs the close action.
/// It closes itself as soon as [`has_next()`](ResourceIterator::has_next)
/// finds the underlying iterator exhausted, and when dropped.
pub struct Wrapped<I, C = NoopClose>
where
    I: Iterator,
    C: OnClose,
{
    // `None` once closed.
    source: Option<Peekable<I>>,
    on_close: Option<C>,
}

impl<I: Iterator> Wrapped<I> {
    pub(crate) fn new(source: I) -> Self {
        Self {
            source: Some(source.peekable()),
            on_close: Some(NoopClose),
        }
    }
}

impl<I, C> Wrapped<I, C>
where
    I: Iterator,
    C: OnClose,
{
    /// Replaces the close action of this iterator.
    ///
    /// The previous action is discarded without running.
    /// If this iterator is already closed, so is the returned one and `action` never runs.
    pub fn on_close<D: OnClose>(mut self, action: D) -> Wrapped<I, D> {
        self.on_close = None;
        Wrapped {
            on_close: self.source.is_some().then_some(action),
            source: self.source.take(),
        }
    }
}

impl<I, C> ResourceIterator for Wrapped<I, C>
where
    I: Iterator,
    C: OnClose,
{
    type Item = I::Item;

    fn has_next(&mut self) -> Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };

        if source.peek().is_some() {
            return Ok(true);
        }

        self.close()?;
        Ok(false)
    }

    fn next(&mut self) -> Result<Self::Item> {
        let Some(source) = self.source.as_mut() else {
            return Err(Error::Closed);
        };

        match source.next() {
            Some(item) => Ok(item),
            None => {
                self.close()?;
                Err(Error::Empty)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.source.take().is_none() {
            return Ok(());
        }

        tracing::trace!("closing wrapped iterator");
        self.on_close.take().map_or(Ok(()), OnClose::on_close)
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.source.is_some()
    }
}

impl<I, C> Drop for Wrapped<I, C>
where
    I: Iterator,
    C: OnClose,
{
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::warn!(%error, "failed to close a dropped iterator");
        }
    }
}

impl<I, C> Debug for Wrapped<I, C>
where
    I: Iterator,
    C: OnClose,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapped")
            .field("open", &self.is_open())
            .finish()
    }
}
