use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};

use len_trait::{Empty, Len};

use crate::builder::{MapBuilder, Unsorted, UnsortedBi};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::iterators::{Iter, Keys, Values};
use crate::maps::table::Shared;
use crate::maps::views::Entries;
use crate::traits::{unordered_hash, IndexedMap};

/// An immutable map that keeps its entries in insertion order.
///
/// Keys are found by a linear scan, which beats hashing for small maps and needs nothing from
/// the key beyond [`Eq`]. When built as a bi-map, values are unique too and
/// [`index_of_value`](Self::index_of_value) identifies exactly one entry.
///
/// # Examples
///
/// ```
/// use packed_collections::ArrayMap;
///
/// let map = ArrayMap::try_from_iter([("one", 1), ("two", 2)]).unwrap();
///
/// assert_eq!(Some(&2), map.get(&"two"));
/// assert_eq!(Some(0), map.index_of_value(&1));
/// assert_eq!(("two", 2), map.entry_at(1).map(|(k, v)| (*k, *v)).unwrap());
/// ```
pub struct ArrayMap<K, V> {
    table: Shared<K, V>,
    bi_map: bool,
}

impl<K, V> ArrayMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub const fn builder() -> MapBuilder<K, V, Unsorted> {
        MapBuilder::new(Unsorted)
    }

    /// Builds a map from `entries` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats.
    pub fn try_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        Self::builder().with_entries(entries).build()
    }
}

impl<K, V> ArrayMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    #[must_use]
    pub const fn bi_map_builder() -> MapBuilder<K, V, UnsortedBi> {
        MapBuilder::new(UnsortedBi)
    }

    /// Builds a bi-map from `entries` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats, or
    /// [`Error::DuplicateValue`](crate::Error::DuplicateValue) if a value does.
    pub fn try_bi_map_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        Self::bi_map_builder().with_entries(entries).build()
    }
}

impl<K, V> ArrayMap<K, V> {
    pub(crate) const fn new(table: Shared<K, V>, bi_map: bool) -> Self {
        Self { table, bi_map }
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
    pub fn key_slice(&self) -> &[K] {
        self.table.keys()
    }

    #[must_use]
    pub fn value_slice(&self) -> &[V] {
        self.table.values()
    }

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

    /// The entries at positions `[from, to)`, sharing this map's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(self.table.slice(from, to)?, self.bi_map))
    }

    /// Returns `true` if both maps share the same storage window.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.table.ptr_eq(&other.table)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        Kind::Unsorted
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Kind::Unsorted.capabilities().with_bi_map(self.bi_map)
    }

    #[must_use]
    pub const fn is_bi_map(&self) -> bool {
        self.bi_map
    }
}

impl<K: Eq, V> ArrayMap<K, V> {
    #[must_use]
    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.table.keys().iter().position(|x| x == key)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        Some(&self.table.values()[self.index_of_key(key)?])
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of_key(key).is_some()
    }
}

impl<K, V: PartialEq> ArrayMap<K, V> {
    /// The position of the first entry holding `value`.
    #[must_use]
    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        self.table.values().iter().position(|x| x == value)
    }

    /// The position of the last entry holding `value`.
    #[must_use]
    pub fn last_index_of_value(&self, value: &V) -> Option<usize> {
        if self.bi_map {
            return self.index_of_value(value);
        }

        self.table.values().iter().rposition(|x| x == value)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.index_of_value(value).is_some()
    }
}

impl<K: Eq, V: PartialEq> IndexedMap<K, V> for ArrayMap<K, V> {
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

impl<K, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new(Shared::EMPTY, false)
    }
}

impl<K, V> Clone for ArrayMap<K, V> {
    fn clone(&self) -> Self {
        Self::new(self.table.clone(), self.bi_map)
    }
}

impl<K: Debug, V: Debug> Debug for ArrayMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq<Self> for ArrayMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl<K: Eq, V: Eq> Eq for ArrayMap<K, V> {}

impl<K: Hash, V: Hash> Hash for ArrayMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Len for ArrayMap<K, V> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V> Empty for ArrayMap<K, V> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, RandomState};

    use super::*;
    use crate::Error;

    fn sample() -> ArrayMap<&'static str, i32> {
        ArrayMap::try_from_iter([("c", 3), ("a", 1), ("b", 1)]).unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let map = sample();
        assert_eq!(&["c", "a", "b"], map.key_slice());
        assert_eq!(&[3, 1, 1], map.value_slice());
    }

    #[test]
    fn get_returns_some_for_existing_keys() {
        let map = sample();
        assert_eq!(Some(&3), map.get(&"c"));
        assert_eq!(Some(&1), map.get(&"b"));
        assert!(map.contains_key(&"a"));
    }

    #[test]
    fn get_returns_none_for_missing_keys() {
        let map = sample();
        assert_eq!(None, map.get(&"z"));
        assert_eq!(None, map.index_of_key(&"z"));
    }

    #[test]
    fn value_search_reports_first_and_last() {
        let map = sample();
        assert_eq!(Some(1), map.index_of_value(&1));
        assert_eq!(Some(2), map.last_index_of_value(&1));
        assert_eq!(None, map.index_of_value(&7));
        assert!(map.contains_value(&3));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = ArrayMap::try_from_iter([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(Err(Error::DuplicateKey), result);
    }

    #[test]
    fn bi_map_rejects_duplicate_values() {
        let result = ArrayMap::try_bi_map_from_iter([("a", 1), ("b", 1)]);
        assert_eq!(Err(Error::DuplicateValue), result);

        let map = ArrayMap::try_bi_map_from_iter([("a", 1), ("b", 2)]).unwrap();
        assert!(map.is_bi_map());
        assert!(map.capabilities().bi_map);
        assert_eq!(Some(1), map.last_index_of_value(&2));
    }

    #[test]
    fn positional_access_is_bounds_checked() {
        let map = sample();
        assert_eq!(Ok(&"a"), map.key_at(1));
        assert_eq!(Ok(&3), map.value_at(0));
        assert_eq!(Some((&"b", &1)), map.get_by_index(2));
        assert_eq!(None, map.get_by_index(3));
        assert_eq!(
            Err(Error::IndexOutOfBounds { index: 3, len: 3 }),
            map.entry_at(3)
        );
    }

    #[test]
    fn equality_ignores_order() {
        let a = ArrayMap::try_from_iter([(1, 'a'), (2, 'b')]).unwrap();
        let b = ArrayMap::try_from_iter([(2, 'b'), (1, 'a')]).unwrap();
        let c = ArrayMap::try_from_iter([(2, 'b'), (1, 'z')]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let bh = RandomState::new();
        assert_eq!(bh.hash_one(&a), bh.hash_one(&b));
    }

    #[test]
    fn slice_shares_storage() {
        let map = sample();
        assert!(map.slice(0, 3).unwrap().ptr_eq(&map));
        assert!(map.slice(1, 1).unwrap().ptr_eq(&ArrayMap::default()));
        assert_eq!(&["a", "b"], map.slice(1, 3).unwrap().key_slice());
        assert_eq!(
            Err(Error::InvalidRange { from: 2, to: 1 }),
            map.slice(2, 1).map(|_| ())
        );
    }

    #[test]
    fn debug_renders_as_map() {
        let map = ArrayMap::try_from_iter([("x", 1)]).unwrap();
        assert_eq!(r#"{"x": 1}"#, format!("{map:?}"));
        assert_eq!("{}", format!("{:?}", ArrayMap::<i32, i32>::default()));
    }

    #[test]
    fn iterators_cover_every_entry() {
        let map = sample();
        assert_eq!(3, map.iter().count());
        assert_eq!(vec![&"c", &"a", &"b"], map.keys().collect::<Vec<_>>());
        assert_eq!(vec![&3, &1, &1], map.values().collect::<Vec<_>>());
        assert_eq!(Some((&"a", &1)), map.entries().get(1));
        assert_eq!(3, (&map).into_iter().len());
    }

    #[test]
    fn len_trait_agrees() {
        let map = sample();
        assert_eq!(3, Len::len(&map));
        assert!(!Empty::is_empty(&map));
    }
}
