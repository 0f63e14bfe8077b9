use core::fmt::{Debug, Formatter, Result};
use core::iter::FusedIterator;

use crate::maps::Keys;

/// An iterator over the elements of a set, in position order.
///
/// This `struct` is created by the `iter` method on each set type.
pub struct SetIter<'a, T> {
    inner: Keys<'a, T, ()>,
}

impl<'a, T> SetIter<'a, T> {
    pub(crate) const fn new(inner: Keys<'a, T, ()>) -> Self {
        Self { inner }
    }

    /// Splits the remaining elements into two iterators at the midpoint.
    ///
    /// Returns `None` once fewer than two elements remain.
    #[must_use]
    pub fn split(self) -> Option<(Self, Self)> {
        let (low, high) = self.inner.split()?;
        Some((Self::new(low), Self::new(high)))
    }
}

impl<T> Clone for SetIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.inner.count()
    }
}

impl<T> DoubleEndedIterator for SetIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for SetIter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for SetIter<'_, T> {}

impl<T: Debug> Debug for SetIter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
