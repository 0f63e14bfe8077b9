use core::fmt::{Debug, Formatter, Result};
use core::iter::FusedIterator;

/// An iterator over the entries of a map, in position order.
///
/// The iterator walks an index window `[front, back)` and can be [`split`](Iter::split) into two
/// halves that cover the window between them, which is how the parallel iterators divide work.
pub struct Iter<'a, K, V> {
    keys: &'a [K],
    values: &'a [V],
    front: usize,
    back: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a [V]) -> Self {
        debug_assert_eq!(keys.len(), values.len());

        Self {
            keys,
            values,
            front: 0,
            back: keys.len(),
        }
    }

    /// Splits the remaining entries into two iterators at the midpoint.
    ///
    /// Returns `None` once fewer than two entries remain.
    #[must_use]
    pub fn split(self) -> Option<(Self, Self)> {
        if self.back - self.front < 2 {
            return None;
        }

        let mid = self.front + (self.back - self.front) / 2;
        let low = Self {
            back: mid,
            ..self.clone()
        };
        let high = Self { front: mid, ..self };

        Some((low, high))
    }

    #[inline]
    fn entry(&self, index: usize) -> (&'a K, &'a V) {
        (&self.keys[index], &self.values[index])
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys,
            values: self.values,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let result = self.entry(self.front);
        self.front += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.entry(self.back))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of a map, in position order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a [V]) -> Self {
        Self {
            inner: Iter::new(keys, values),
        }
    }

    #[must_use]
    pub fn split(self) -> Option<(Self, Self)> {
        let (low, high) = self.inner.split()?;
        Some((Self { inner: low }, Self { inner: high }))
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|x| x.0)
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

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|x| x.0)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: Debug, V> Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a map, in position order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a [V]) -> Self {
        Self {
            inner: Iter::new(keys, values),
        }
    }

    #[must_use]
    pub fn split(self) -> Option<(Self, Self)> {
        let (low, high) = self.inner.split()?;
        Some((Self { inner: low }, Self { inner: high }))
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|x| x.1)
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

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|x| x.1)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V: Debug> Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(feature = "rayon")]
pub(crate) fn par_entries<'a, K: Sync, V: Sync>(
    keys: &'a [K],
    values: &'a [V],
) -> impl rayon::iter::IndexedParallelIterator<Item = (&'a K, &'a V)> {
    use rayon::prelude::*;

    keys.par_iter().zip(values.par_iter())
}
