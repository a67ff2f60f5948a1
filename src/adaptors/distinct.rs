use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::{Filter, Predicate, ResourceIterator};

/// A [`ResourceIterator`] that yields each distinct element once, in first-seen order.
///
/// This type is created by [`ResourceIterator::distinct()`]. See its documentation for more.
pub type Distinct<I> = Filter<I, Unseen<<I as ResourceIterator>::Item>>;

/// A [`Predicate`] accepting each element the first time it is seen.
///
/// It retains a clone of every element accepted.
pub struct Unseen<T> {
    seen: HashSet<T>,
}

impl<T> Unseen<T> {
    pub(crate) fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<T> Predicate<T> for Unseen<T>
where
    T: Hash + Eq + Clone,
{
    #[inline]
    fn test(&mut self, item: &T) -> bool {
        if self.seen.contains(item) {
            return false;
        }
        self.seen.insert(item.clone());
        true
    }
}

impl<T: Debug> Debug for Unseen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unseen").field("seen", &self.seen).finish()
    }
}
