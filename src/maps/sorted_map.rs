use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::ops::RangeBounds;

use len_trait::{Empty, Len};

use crate::builder::{MapBuilder, Sorted};
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::bounds;
use crate::maps::iterators::{Iter, Keys, Values};
use crate::maps::table::Shared;
use crate::maps::views::Entries;
use crate::search::{self, Probe};
use crate::traits::{unordered_hash, IndexedMap};

/// An immutable map whose entries are sorted by key.
///
/// Keys are found by binary search under the comparator `C`, and any key range can be sliced off
/// as another `SortedMap` that shares this map's storage.
///
/// # Examples
///
/// ```
/// use packed_collections::SortedMap;
///
/// let map = SortedMap::try_from_iter([("d", 4), ("b", 2), ("a", 1), ("c", 3)]).unwrap();
///
/// assert_eq!(&["a", "b", "c", "d"], map.key_slice());
/// assert_eq!(Some(&3), map.get(&"c"));
///
/// let head = map.head(&"c");
/// assert_eq!(&["a", "b"], head.key_slice());
/// ```
pub struct SortedMap<K, V, C = NaturalOrder> {
    table: Shared<K, V>,
    comparator: C,
}

impl<K, V> SortedMap<K, V, NaturalOrder>
where
    K: Ord + Clone,
    V: Clone,
{
    #[must_use]
    pub const fn builder() -> MapBuilder<K, V, Sorted> {
        MapBuilder::new(Sorted::natural())
    }

    /// Builds a map from `entries`, sorted by the keys' natural order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats.
    pub fn try_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        Self::builder().with_entries(entries).build()
    }
}

impl<K, V, C> SortedMap<K, V, C> {
    pub(crate) const fn new(table: Shared<K, V>, comparator: C) -> Self {
        Self { table, comparator }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<(&K, &V)> {
        self.table.entry(index)
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn key_at(&self, index: usize) -> Result<&K> {
        self.table.key_at(index)
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn value_at(&self, index: usize) -> Result<&V> {
        self.table.value_at(index)
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn entry_at(&self, index: usize) -> Result<(&K, &V)> {
        self.table.entry_at(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.table.entry(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.table.entry(self.len().checked_sub(1)?)
    }

    #[must_use]
    pub fn key_slice(&self) -> &[K] {
        self.table.keys()
    }

    #[must_use]
    pub fn value_slice(&self) -> &[V] {
        self.table.values()
    }

    /// An iterator visiting all entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.table.keys(), self.table.values())
    }

    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.table.keys(), self.table.values())
    }

    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.table.keys(), self.table.values())
    }

    #[must_use]
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(self.table.keys(), self.table.values())
    }

    #[cfg(feature = "rayon")]
    pub fn par_iter(&self) -> impl rayon::iter::IndexedParallelIterator<Item = (&K, &V)>
    where
        K: Sync,
        V: Sync,
    {
        crate::maps::iterators::par_entries(self.table.keys(), self.table.values())
    }

    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.table.ptr_eq(&other.table)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        Kind::Sorted
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Kind::Sorted.capabilities()
    }
}

impl<K, V, C: Clone> SortedMap<K, V, C> {
    /// The entries at positions `[from, to)`, sharing this map's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        let table = self.table.slice(from, to)?;
        Ok(Self::new(table, self.comparator.clone()))
    }
}

impl<K, V, C> SortedMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Binary searches the keys for `key`.
    #[must_use]
    pub fn search(&self, key: &K) -> Probe {
        let keys = self.table.keys();
        search::probe(0, keys.len(), key, |i| &keys[i], &self.comparator)
    }

    #[must_use]
    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.search(key).index()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        Some(&self.table.values()[self.index_of_key(key)?])
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of_key(key).is_some()
    }

    /// The position of the greatest key less than or equal to `key`.
    #[must_use]
    pub fn floor_index(&self, key: &K) -> Option<usize> {
        bounds::floor(self.search(key))
    }

    /// The position of the least key greater than or equal to `key`.
    #[must_use]
    pub fn ceiling_index(&self, key: &K) -> Option<usize> {
        bounds::ceiling(self.search(key), self.len())
    }

    /// The position of the greatest key strictly less than `key`.
    #[must_use]
    pub fn lower_index(&self, key: &K) -> Option<usize> {
        bounds::lower(self.search(key))
    }

    /// The position of the least key strictly greater than `key`.
    #[must_use]
    pub fn higher_index(&self, key: &K) -> Option<usize> {
        bounds::higher(self.search(key), self.len())
    }
}

impl<K, V, C> SortedMap<K, V, C>
where
    C: Comparator<K> + Clone,
{
    /// The entries whose keys fall within `range`.
    ///
    /// The whole map comes back as the same instance and an empty range as the shared empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_collections::SortedMap;
    ///
    /// let map = SortedMap::try_from_iter((1..=9).map(|x| (x, x * x))).unwrap();
    ///
    /// assert_eq!(&[3, 4, 5], map.range(3..6).key_slice());
    /// assert_eq!(&[8, 9], map.range(&8..).key_slice());
    /// assert!(map.range(..).ptr_eq(&map));
    /// ```
    #[must_use]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Self {
        let (from, to) = bounds::resolve(&range, self.len(), |key| self.search(key));
        Self::new(self.table.window(from, to), self.comparator.clone())
    }

    /// The entries whose keys are strictly less than `to`.
    #[must_use]
    pub fn head(&self, to: &K) -> Self {
        self.range(..to)
    }

    /// The entries whose keys are greater than or equal to `from`.
    #[must_use]
    pub fn tail(&self, from: &K) -> Self {
        self.range(from..)
    }

    /// The entries whose keys lie in `[from, to)`.
    #[must_use]
    pub fn sub(&self, from: &K, to: &K) -> Self {
        self.range(from..to)
    }
}

impl<K, V: PartialEq, C> SortedMap<K, V, C> {
    /// The position of the first entry holding `value`.
    #[must_use]
    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        self.table.values().iter().position(|x| x == value)
    }

    /// The position of the last entry holding `value`.
    #[must_use]
    pub fn last_index_of_value(&self, value: &V) -> Option<usize> {
        self.table.values().iter().rposition(|x| x == value)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.index_of_value(value).is_some()
    }
}

impl<K, V, C> IndexedMap<K, V> for SortedMap<K, V, C>
where
    V: PartialEq,
    C: Comparator<K>,
{
    fn len(&self) -> usize {
        self.len()
    }

    fn get_by_index(&self, index: usize) -> Option<(&K, &V)> {
        self.get_by_index(index)
    }

    fn index_of_key(&self, key: &K) -> Option<usize> {
        self.index_of_key(key)
    }

    fn index_of_value(&self, value: &V) -> Option<usize> {
        self.index_of_value(value)
    }
}

impl<K, V, C: Default> Default for SortedMap<K, V, C> {
    fn default() -> Self {
        Self::new(Shared::EMPTY, C::default())
    }
}

impl<K, V, C: Clone> Clone for SortedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self::new(self.table.clone(), self.comparator.clone())
    }
}

impl<K: Debug, V: Debug, C> Debug for SortedMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq<Self> for SortedMap<K, V, C>
where
    V: PartialEq,
    C: Comparator<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl<K, V: Eq, C: Comparator<K>> Eq for SortedMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for SortedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, K, V, C> IntoIterator for &'a SortedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Len for SortedMap<K, V, C> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V, C> Empty for SortedMap<K, V, C> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}
