use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::hash::DefaultHasher;

use len_trait::{Empty, Len};

use crate::builder::{Hashed, MapBuilder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::iterators::{Iter, Keys, Values};
use crate::maps::table::Shared;
use crate::maps::views::Entries;
use crate::traits::{unordered_hash, IndexedMap};

/// An immutable map in insertion order that caches the hash of every key and value.
///
/// Lookups hash the probe once and only compare against entries whose cached hash matches, so a
/// miss rarely touches a key at all. There are no buckets: the scan still visits every cached
/// hash, which keeps the layout a plain pair of arrays.
///
/// It is a logic error for a key or value to hash differently than it did when the map was built.
///
/// # Examples
///
/// ```
/// use packed_collections::HashedMap;
///
/// let map = HashedMap::try_from_iter([("red", 0xff0000), ("green", 0x00ff00)]).unwrap();
///
/// assert_eq!(Some(&0x00ff00), map.get(&"green"));
/// assert_eq!(Some(0), map.index_of_value(&0xff0000));
/// assert!(!map.contains_key(&"blue"));
/// ```
pub struct HashedMap<K, V, BH = BuildHasherDefault<DefaultHasher>> {
    table: Shared<K, V>,
    bi_map: bool,
    hasher: BH,
}

impl<K, V> HashedMap<K, V, BuildHasherDefault<DefaultHasher>>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    #[must_use]
    pub fn builder() -> MapBuilder<K, V, Hashed> {
        MapBuilder::new(Hashed::new())
    }

    /// Builds a map from `entries` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats.
    pub fn try_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        Self::builder().with_entries(entries).build()
    }

    /// Builds a bi-map from `entries` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats, or
    /// [`Error::DuplicateValue`](crate::Error::DuplicateValue) if a value does.
    pub fn try_bi_map_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        MapBuilder::new(Hashed::new().bi_map())
            .with_entries(entries)
            .build()
    }
}

impl<K, V, BH> HashedMap<K, V, BH> {
    pub(crate) const fn new(table: Shared<K, V>, bi_map: bool, hasher: BH) -> Self {
        Self {
            table,
            bi_map,
            hasher,
        }
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

    /// Returns a reference to the map's [`BuildHasher`].
    #[must_use]
    pub const fn hasher(&self) -> &BH {
        &self.hasher
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.table.ptr_eq(&other.table)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        Kind::Hashed
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Kind::Hashed.capabilities().with_bi_map(self.bi_map)
    }

    #[must_use]
    pub const fn is_bi_map(&self) -> bool {
        self.bi_map
    }
}

impl<K, V, BH: Clone> HashedMap<K, V, BH> {
    /// The entries at positions `[from, to)`, sharing this map's storage and cached hashes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(
            self.table.slice(from, to)?,
            self.bi_map,
            self.hasher.clone(),
        ))
    }
}

impl<K, V, BH> HashedMap<K, V, BH>
where
    K: Eq + Hash,
    BH: BuildHasher,
{
    #[must_use]
    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        let keys = self.table.keys();
        self.table
            .key_candidates(self.hasher.hash_one(key))
            .find(|index| keys[*index] == *key)
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

impl<K, V, BH> HashedMap<K, V, BH>
where
    V: Eq + Hash,
    BH: BuildHasher,
{
    /// The position of the first entry holding `value`.
    #[must_use]
    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        let values = self.table.values();
        self.table
            .value_candidates(self.hasher.hash_one(value))
            .find(|index| values[*index] == *value)
    }

    /// The position of the last entry holding `value`.
    #[must_use]
    pub fn last_index_of_value(&self, value: &V) -> Option<usize> {
        if self.bi_map {
            return self.index_of_value(value);
        }

        let values = self.table.values();
        self.table
            .value_candidates(self.hasher.hash_one(value))
            .rev()
            .find(|index| values[*index] == *value)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.index_of_value(value).is_some()
    }
}

impl<K, V, BH> IndexedMap<K, V> for HashedMap<K, V, BH>
where
    K: Eq + Hash,
    V: Eq + Hash,
    BH: BuildHasher,
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

impl<K, V, BH: Default> Default for HashedMap<K, V, BH> {
    fn default() -> Self {
        Self::new(Shared::EMPTY, false, BH::default())
    }
}

impl<K, V, BH: Clone> Clone for HashedMap<K, V, BH> {
    fn clone(&self) -> Self {
        Self::new(self.table.clone(), self.bi_map, self.hasher.clone())
    }
}

impl<K: Debug, V: Debug, BH> Debug for HashedMap<K, V, BH> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, BH> PartialEq<Self> for HashedMap<K, V, BH>
where
    K: Eq + Hash,
    V: Eq + Hash,
    BH: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl<K, V, BH> Eq for HashedMap<K, V, BH>
where
    K: Eq + Hash,
    V: Eq + Hash,
    BH: BuildHasher,
{
}

impl<K: Hash, V: Hash, BH> Hash for HashedMap<K, V, BH> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, K, V, BH> IntoIterator for &'a HashedMap<K, V, BH> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, BH> Len for HashedMap<K, V, BH> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V, BH> Empty for HashedMap<K, V, BH> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::Hasher;
    use std::hash::RandomState;

    use super::*;
    use crate::Error;

    /// Sends every value to the same hash so lookups must fall back to equality.
    #[derive(Clone, Default)]
    struct Colliding;

    struct ZeroHasher;

    impl Hasher for ZeroHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for Colliding {
        type Hasher = ZeroHasher;

        fn build_hasher(&self) -> ZeroHasher {
            ZeroHasher
        }
    }

    #[test]
    fn get_returns_some_for_existing_keys() {
        let map = HashedMap::try_from_iter((0..100).map(|x| (x, x * 10))).unwrap();
        for x in 0..100 {
            assert_eq!(Some(&(x * 10)), map.get(&x));
        }
    }

    #[test]
    fn get_returns_none_for_missing_keys() {
        let map = HashedMap::try_from_iter((0..100).map(|x| (x, x * 10))).unwrap();
        assert_eq!(None, map.get(&100));
        assert_eq!(None, map.index_of_value(&5));
    }

    #[test]
    fn colliding_hashes_still_compare_by_equality() {
        let map = MapBuilder::new(Hashed::with_hasher(Colliding))
            .with_entries([("a", 1), ("b", 2), ("c", 1)])
            .build()
            .unwrap();

        assert_eq!(Some(1), map.index_of_key(&"b"));
        assert_eq!(Some(0), map.index_of_value(&1));
        assert_eq!(Some(2), map.last_index_of_value(&1));
        assert_eq!(None, map.index_of_key(&"d"));
    }

    #[test]
    fn duplicates_are_detected_by_equality() {
        let result = MapBuilder::new(Hashed::with_hasher(Colliding))
            .with_entries([("a", 1), ("a", 2)])
            .build();
        assert_eq!(Err(Error::DuplicateKey), result.map(|_| ()));

        let result = HashedMap::try_bi_map_from_iter([("a", 1), ("b", 1)]);
        assert_eq!(Err(Error::DuplicateValue), result.map(|_| ()));
    }

    #[test]
    fn custom_hasher_is_kept() {
        let map = MapBuilder::new(Hashed::with_hasher(RandomState::new()))
            .with(1, 2)
            .build()
            .unwrap();

        assert_eq!(Some(&2), map.get(&1));
        let _: &RandomState = map.hasher();
        assert!(map.capabilities().hash_cache);
    }

    #[test]
    fn slices_keep_working_hash_lookups() {
        let map = HashedMap::try_from_iter((0..10).map(|x| (x, -x))).unwrap();
        let slice = map.slice(4, 7).unwrap();

        assert_eq!(3, slice.len());
        assert_eq!(Some(0), slice.index_of_key(&4));
        assert_eq!(Some(2), slice.index_of_value(&-6));
        assert_eq!(None, slice.index_of_key(&7));
        assert_eq!(None, slice.index_of_key(&3));
    }

    #[test]
    fn equality_ignores_order() {
        let a = HashedMap::try_from_iter([(1, 'a'), (2, 'b')]).unwrap();
        let b = HashedMap::try_from_iter([(2, 'b'), (1, 'a')]).unwrap();
        assert_eq!(a, b);
        assert_eq!(r#"{1: 'a', 2: 'b'}"#, format!("{a:?}"));
    }
}
