use core::fmt::{Debug, Formatter, Result};

use crate::maps::iterators::Iter;
use crate::maps::permutation::ValueOrder;

/// A read-only, index-addressable view of a map's entries.
pub struct Entries<'a, K, V> {
    keys: &'a [K],
    values: &'a [V],
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) const fn new(keys: &'a [K], values: &'a [V]) -> Self {
        Self { keys, values }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&'a K, &'a V)> {
        Some((self.keys.get(index)?, &self.values[index]))
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(self.keys, self.values)
    }
}

impl<K, V> Clone for Entries<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Entries<'_, K, V> {}

impl<'a, K, V> IntoIterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Debug, V: Debug> Debug for Entries<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// A read-only view of a bi-map's values, addressed by rank in value order.
pub struct ValuesInOrder<'a, V> {
    values: &'a [V],
    order: Option<&'a ValueOrder>,
}

impl<'a, V> ValuesInOrder<'a, V> {
    pub(crate) const fn new(values: &'a [V], order: Option<&'a ValueOrder>) -> Self {
        Self { values, order }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The position of the entry holding the value of the given rank.
    #[must_use]
    pub fn position(&self, rank: usize) -> Option<usize> {
        if rank >= self.len() {
            return None;
        }

        Some(self.order.map_or(rank, |x| x.get(rank)))
    }

    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&'a V> {
        Some(&self.values[self.position(rank)?])
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a V> + ExactSizeIterator + 'a {
        let values = self.values;
        let order = self.order;
        (0..values.len()).map(move |rank| &values[order.map_or(rank, |x| x.get(rank))])
    }
}

impl<V> Clone for ValuesInOrder<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ValuesInOrder<'_, V> {}

impl<V: Debug> Debug for ValuesInOrder<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
