/// A test applied to each element by [`filter()`](crate::ResourceIterator::filter)
/// and [`take_while()`](crate::ResourceIterator::take_while).
///
/// Every `FnMut(&T) -> bool` closure is a predicate.
/// Implement it by hand for a predicate that needs to be named,
/// such as the one backing [`Distinct`](crate::Distinct).
pub trait Predicate<T: ?Sized> {
    /// Returns `true` if `item` should be kept.
    fn test(&mut self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    T: ?Sized,
    F: FnMut(&T) -> bool,
{
    #[inline]
    fn test(&mut self, item: &T) -> bool {
        self(item)
    }
}
