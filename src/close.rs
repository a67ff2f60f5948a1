//! Cleanup actions and their aggregation.

use crate::{BoxError, Error, ResourceIterator, Result};

/// An action run exactly once when a resource iterator is closed.
///
/// It is implemented for every `FnOnce() -> Result<(), E>` closure whose error
/// converts into a [`BoxError`], and for [`NoopClose`].
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, convert::Infallible};
/// use resource_iter::prelude::*;
///
/// let closed = Cell::new(false);
/// let mut iter = resource_iter::of([1, 2]).on_close(|| {
///     closed.set(true);
///     Ok::<_, Infallible>(())
/// });
///
/// assert_eq!(iter.count().unwrap(), 2);
/// assert!(closed.get());
/// ```
pub trait OnClose {
    /// Runs the action.
    fn on_close(self) -> Result<()>;
}

impl<F, E> OnClose for F
where
    F: FnOnce() -> Result<(), E>,
    E: Into<BoxError>,
{
    #[inline]
    fn on_close(self) -> Result<()> {
        self().map_err(Error::from_source)
    }
}

/// A close action that does nothing. This is the default action of every source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClose;

impl OnClose for NoopClose {
    #[inline]
    fn on_close(self) -> Result<()> {
        Ok(())
    }
}

/// Runs independent cleanup actions, never stopping at a failure.
///
/// After every action has run, [`finish()`](CloseAll::finish):
///
/// - succeeds if nothing failed,
/// - returns the failure itself if exactly one action failed,
/// - returns [`Error::Composite`] carrying every failure otherwise.
///
/// # Examples
///
/// ```
/// use resource_iter::{CloseAll, Error};
///
/// let mut close_all = CloseAll::new();
/// close_all
///     .run(|| Ok(()))
///     .run(|| Err(Error::Closed))
///     .run(|| Ok(()));
///
/// // A lone failure is propagated unwrapped.
/// assert!(matches!(close_all.finish(), Err(Error::Closed)));
/// ```
#[derive(Debug, Default)]
pub struct CloseAll {
    errors: Vec<Error>,
}

impl CloseAll {
    /// Creates an aggregator with no failure recorded.
    #[inline]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Runs an action and records its failure, if any.
    pub fn run(&mut self, action: impl FnOnce() -> Result<()>) -> &mut Self {
        if let Err(error) = action() {
            tracing::debug!(%error, "cleanup action failed");
            self.errors.push(error);
        }
        self
    }

    /// Closes a resource iterator and records its failure, if any.
    #[inline]
    pub fn close<I>(&mut self, iter: &mut I) -> &mut Self
    where
        I: ResourceIterator + ?Sized,
    {
        self.run(|| iter.close())
    }

    /// Closes every resource iterator yielded by `iters`.
    pub fn close_each<'a, I>(&mut self, iters: impl IntoIterator<Item = &'a mut I>) -> &mut Self
    where
        I: ResourceIterator + ?Sized + 'a,
    {
        for iter in iters {
            self.close(iter);
        }
        self
    }

    /// Returns the number of failures recorded so far.
    #[inline]
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Reports the outcome of every action run.
    pub fn finish(mut self) -> Result<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.swap_remove(0)),
            _ => Err(Error::Composite(self.errors)),
        }
    }
}

/// Closes every resource iterator in turn, even if some of them fail.
///
/// This is a shorthand for [`CloseAll::close_each`] followed by [`CloseAll::finish`].
pub fn close_all<'a, I>(iters: impl IntoIterator<Item = &'a mut I>) -> Result<()>
where
    I: ResourceIterator + ?Sized + 'a,
{
    let mut close_all = CloseAll::new();
    close_all.close_each(iters);
    close_all.finish()
}
