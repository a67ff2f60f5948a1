use std::{cell::Cell, fmt::Debug, rc::Rc};

use proptest::{prelude::*, test_runner::TestCaseResult};

use crate::{Error, OnClose, ResourceIterator, Result};

/// Counts how many close actions handed out by it have run.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    closed: Rc<Cell<usize>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A close action that succeeds.
    pub fn action(&self) -> TrackedClose {
        TrackedClose {
            closed: Rc::clone(&self.closed),
            failure: None,
        }
    }

    /// A close action that fails with `message`.
    pub fn failing(&self, message: &'static str) -> TrackedClose {
        TrackedClose {
            closed: Rc::clone(&self.closed),
            failure: Some(message),
        }
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

#[derive(Debug)]
pub struct TrackedClose {
    closed: Rc<Cell<usize>>,
    failure: Option<&'static str>,
}

impl OnClose for TrackedClose {
    fn on_close(self) -> Result<()> {
        self.closed.set(self.closed.get() + 1);
        match self.failure {
            Some(message) => Err(Error::from_source(message)),
            None => Ok(()),
        }
    }
}

/// Asserts that `iter` behaves as closed, twice in a row.
#[track_caller]
pub fn assert_closed<I: ResourceIterator + ?Sized>(iter: &mut I) {
    for _ in 0..2 {
        assert!(!iter.is_open());
        assert!(!iter.has_next().unwrap());
        assert!(matches!(iter.next(), Err(Error::Closed)));
    }
}

/// Checks a pipeline built over a tracked source against the expected elements,
/// pulling it with [`to_list()`](ResourceIterator::to_list), then by hand with
/// redundant `has_next()` calls.
///
/// `pipeline_factory` must attach the given tracker's action to its source.
pub fn proptest_pipeline<I>(
    mut pipeline_factory: impl FnMut(&Tracker) -> I,
    expected: &[I::Item],
) -> TestCaseResult
where
    I: ResourceIterator,
    I::Item: PartialEq + Debug,
{
    // `to_list()`
    let tracker = Tracker::new();
    let mut iter = pipeline_factory(&tracker);
    prop_assert_eq!(
        iter.to_list().unwrap(),
        expected,
        "`to_list()`'s result mismatched"
    );
    prop_assert_eq!(tracker.closed(), 1, "`to_list()` didn't close once");
    prop_assert!(!iter.is_open());

    // `has_next()` then `next()`
    let tracker = Tracker::new();
    let mut iter = pipeline_factory(&tracker);
    let mut pulled = Vec::new();
    while iter.has_next().unwrap() {
        prop_assert!(iter.has_next().unwrap(), "`has_next()` isn't idempotent");
        pulled.push(iter.next().unwrap());
    }
    prop_assert_eq!(pulled, expected, "pulling by hand mismatched");
    prop_assert_eq!(tracker.closed(), 1, "exhaustion didn't close once");
    prop_assert!(matches!(iter.next(), Err(Error::Closed)));

    // Early `close()`
    let tracker = Tracker::new();
    let mut iter = pipeline_factory(&tracker);
    if !expected.is_empty() {
        prop_assert_eq!(&iter.next().unwrap(), &expected[0]);
    }
    iter.close().unwrap();
    iter.close().unwrap();
    prop_assert_eq!(tracker.closed(), 1, "early `close()` didn't close once");

    Ok(())
}
