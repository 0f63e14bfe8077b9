use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::ops::RangeBounds;

use len_trait::{Empty, Len};

use crate::builder::{MapBuilder, SortedBi};
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::bounds;
use crate::maps::iterators::{Iter, Keys, Values};
use crate::maps::permutation::ValueOrder;
use crate::maps::table::Shared;
use crate::maps::views::{Entries, ValuesInOrder};
use crate::search::{self, Probe};
use crate::traits::{unordered_hash, IndexedMap};

/// An immutable one-to-one map, sorted by key and binary searchable by value.
///
/// Entries are stored once, in key order. A permutation lists the entry positions in value
/// order, so a value lookup is a binary search that reads each probed value through the
/// permutation. Slicing a bi-map carries the permutation over to the slice without sorting again.
///
/// # Examples
///
/// ```
/// use packed_collections::SortedBiMap;
///
/// let map = SortedBiMap::try_from_iter([("b", 20), ("a", 30), ("c", 10)]).unwrap();
///
/// assert_eq!(&["a", "b", "c"], map.key_slice());
/// assert_eq!(Some(&"c"), map.get_key(&10));
/// assert_eq!(vec![&10, &20, &30], map.values_in_order().iter().collect::<Vec<_>>());
/// ```
pub struct SortedBiMap<K, V, KC = NaturalOrder, VC = NaturalOrder> {
    table: Shared<K, V>,
    keys: KC,
    values: VC,
}

impl<K, V> SortedBiMap<K, V, NaturalOrder, NaturalOrder>
where
    K: Ord + Clone,
    V: Ord + Clone,
{
    #[must_use]
    pub const fn builder() -> MapBuilder<K, V, SortedBi> {
        MapBuilder::new(SortedBi::natural())
    }

    /// Builds a bi-map from `entries`, sorted by the natural orders of keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a key repeats, or
    /// [`Error::DuplicateValue`](crate::Error::DuplicateValue) if a value does.
    pub fn try_from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Result<Self> {
        Self::builder().with_entries(entries).build()
    }
}

impl<K, V, KC, VC> SortedBiMap<K, V, KC, VC> {
    pub(crate) const fn new(table: Shared<K, V>, keys: KC, values: VC) -> Self {
        Self {
            table,
            keys,
            values,
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

    /// The values ranked by the value comparator.
    #[must_use]
    pub fn values_in_order(&self) -> ValuesInOrder<'_, V> {
        ValuesInOrder::new(self.table.values(), self.table.value_order())
    }

    /// A view of this map that looks keys up by value and iterates in value order.
    #[must_use]
    pub const fn inverse(&self) -> Inverse<'_, K, V, KC, VC> {
        Inverse { map: self }
    }

    #[cfg(feature = "rayon")]
    pub fn par_iter(&self) -> impl rayon::iter::IndexedParallelIterator<Item = (&K, &V)>
    where
        K: Sync,
        V: Sync,
    {
        crate::maps::iterators::par_entries(self.table.keys(), self.table.values())
    }

    /// The key comparator.
    pub const fn comparator(&self) -> &KC {
        &self.keys
    }

    pub const fn value_comparator(&self) -> &VC {
        &self.values
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.table.ptr_eq(&other.table)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        Kind::SortedBi
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Kind::SortedBi.capabilities()
    }

    pub(crate) fn value_order(&self) -> Option<&ValueOrder> {
        self.table.value_order()
    }
}

impl<K, V, KC: Clone, VC: Clone> SortedBiMap<K, V, KC, VC> {
    /// The entries at positions `[from, to)`, sharing this map's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(
            self.table.slice(from, to)?,
            self.keys.clone(),
            self.values.clone(),
        ))
    }
}

impl<K, V, KC, VC> SortedBiMap<K, V, KC, VC>
where
    KC: Comparator<K>,
{
    /// Binary searches the keys for `key`.
    #[must_use]
    pub fn search(&self, key: &K) -> Probe {
        let keys = self.table.keys();
        search::probe(0, keys.len(), key, |i| &keys[i], &self.keys)
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

    #[must_use]
    pub fn floor_index(&self, key: &K) -> Option<usize> {
        bounds::floor(self.search(key))
    }

    #[must_use]
    pub fn ceiling_index(&self, key: &K) -> Option<usize> {
        bounds::ceiling(self.search(key), self.len())
    }

    #[must_use]
    pub fn lower_index(&self, key: &K) -> Option<usize> {
        bounds::lower(self.search(key))
    }

    #[must_use]
    pub fn higher_index(&self, key: &K) -> Option<usize> {
        bounds::higher(self.search(key), self.len())
    }
}

impl<K, V, KC, VC> SortedBiMap<K, V, KC, VC>
where
    KC: Comparator<K> + Clone,
    VC: Clone,
{
    /// The entries whose keys fall within `range`; the slice keeps its own value order.
    #[must_use]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Self {
        let (from, to) = bounds::resolve(&range, self.len(), |key| self.search(key));
        Self::new(
            self.table.window(from, to),
            self.keys.clone(),
            self.values.clone(),
        )
    }

    #[must_use]
    pub fn head(&self, to: &K) -> Self {
        self.range(..to)
    }

    #[must_use]
    pub fn tail(&self, from: &K) -> Self {
        self.range(from..)
    }

    #[must_use]
    pub fn sub(&self, from: &K, to: &K) -> Self {
        self.range(from..to)
    }
}

impl<K, V, KC, VC> SortedBiMap<K, V, KC, VC>
where
    VC: Comparator<V>,
{
    /// Binary searches the values, in value order, for `value`.
    ///
    /// A match reports the value's rank, not the position of its entry.
    #[must_use]
    pub fn search_value(&self, value: &V) -> Probe {
        let values = self.table.values();
        match self.table.value_order() {
            Some(order) => search::probe(
                0,
                order.len(),
                value,
                |rank| &values[order.get(rank)],
                &self.values,
            ),
            None => Probe::Absent { insertion_point: 0 },
        }
    }

    /// The position of the entry holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_collections::SortedBiMap;
    ///
    /// let map = SortedBiMap::try_from_iter([("x", 9), ("y", 1)]).unwrap();
    /// assert_eq!(Some(0), map.index_of_value(&9));
    /// assert_eq!(None, map.index_of_value(&5));
    /// ```
    #[must_use]
    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        let rank = self.search_value(value).index()?;
        self.table.value_order().map(|x| x.get(rank))
    }

    /// Same as [`index_of_value`](Self::index_of_value), since values are unique.
    #[must_use]
    pub fn last_index_of_value(&self, value: &V) -> Option<usize> {
        self.index_of_value(value)
    }

    #[must_use]
    pub fn get_key(&self, value: &V) -> Option<&K> {
        Some(&self.table.keys()[self.index_of_value(value)?])
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.index_of_value(value).is_some()
    }
}

impl<K, V, KC, VC> IndexedMap<K, V> for SortedBiMap<K, V, KC, VC>
where
    KC: Comparator<K>,
    VC: Comparator<V>,
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

impl<K, V, KC: Default, VC: Default> Default for SortedBiMap<K, V, KC, VC> {
    fn default() -> Self {
        Self::new(Shared::EMPTY, KC::default(), VC::default())
    }
}

impl<K, V, KC: Clone, VC: Clone> Clone for SortedBiMap<K, V, KC, VC> {
    fn clone(&self) -> Self {
        Self::new(self.table.clone(), self.keys.clone(), self.values.clone())
    }
}

impl<K: Debug, V: Debug, KC, VC> Debug for SortedBiMap<K, V, KC, VC> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, KC, VC> PartialEq<Self> for SortedBiMap<K, V, KC, VC>
where
    V: PartialEq,
    KC: Comparator<K>,
    VC: Comparator<V>,
{
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl<K, V, KC, VC> Eq for SortedBiMap<K, V, KC, VC>
where
    V: Eq,
    KC: Comparator<K>,
    VC: Comparator<V>,
{
}

impl<K: Hash, V: Hash, KC, VC> Hash for SortedBiMap<K, V, KC, VC> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, K, V, KC, VC> IntoIterator for &'a SortedBiMap<K, V, KC, VC> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, KC, VC> Len for SortedBiMap<K, V, KC, VC> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V, KC, VC> Empty for SortedBiMap<K, V, KC, VC> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

/// A bi-map seen from the value side.
///
/// This `struct` is created by the [`inverse`](SortedBiMap::inverse) method on [`SortedBiMap`].
/// Ranks replace positions: rank `j` is the entry holding the j-th smallest value.
pub struct Inverse<'a, K, V, KC, VC> {
    map: &'a SortedBiMap<K, V, KC, VC>,
}

impl<'a, K, V, KC, VC> Inverse<'a, K, V, KC, VC> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The value of the given rank and its key.
    #[must_use]
    pub fn get_by_index(&self, rank: usize) -> Option<(&'a V, &'a K)> {
        let index = self.map.values_in_order().position(rank)?;
        let (key, value) = self.map.get_by_index(index)?;
        Some((value, key))
    }

    /// Value and key pairs in ascending value order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&'a V, &'a K)> + ExactSizeIterator + 'a {
        let map = self.map;
        let order = map.value_order();
        (0..map.len()).map(move |rank| {
            let index = order.map_or(rank, |x| x.get(rank));
            (&map.table.values()[index], &map.table.keys()[index])
        })
    }
}

impl<'a, K, V, KC, VC> Inverse<'a, K, V, KC, VC>
where
    VC: Comparator<V>,
{
    #[must_use]
    pub fn get(&self, value: &V) -> Option<&'a K> {
        self.map.get_key(value)
    }

    #[must_use]
    pub fn contains_key(&self, value: &V) -> bool {
        self.map.contains_value(value)
    }

    /// The rank of `value` among all values.
    #[must_use]
    pub fn index_of_key(&self, value: &V) -> Option<usize> {
        self.map.search_value(value).index()
    }
}

impl<K, V, KC, VC> Clone for Inverse<'_, K, V, KC, VC> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, KC, VC> Copy for Inverse<'_, K, V, KC, VC> {}

impl<K: Debug, V: Debug, KC, VC> Debug for Inverse<'_, K, V, KC, VC> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::ByComparing;
    use crate::Error;

    fn digits() -> SortedBiMap<&'static str, &'static str> {
        SortedBiMap::try_from_iter([
            ("c", "5"),
            ("d", "4"),
            ("e", "3"),
            ("a", "7"),
            ("b", "96"),
            ("f", "2"),
            ("g", "1"),
        ])
        .unwrap()
    }

    #[test]
    fn keys_are_sorted_and_values_ranked() {
        let map = digits();
        assert_eq!(&["a", "b", "c", "d", "e", "f", "g"], map.key_slice());

        let by_value: Vec<&str> = map.inverse().iter().map(|(_, k)| *k).collect();
        assert_eq!(vec!["g", "f", "e", "d", "c", "a", "b"], by_value);
    }

    #[test]
    fn value_lookup_lands_on_the_owning_entry() {
        let map = digits();
        assert_eq!(map.index_of_key(&"b"), map.index_of_value(&"96"));
        assert_eq!(Some(&"g"), map.get_key(&"1"));
        assert_eq!(None, map.index_of_value(&"8"));
        assert_eq!(map.index_of_value(&"5"), map.last_index_of_value(&"5"));
    }

    #[test]
    fn inverse_view_answers_by_value() {
        let map = digits();
        let inverse = map.inverse();

        assert_eq!(7, inverse.len());
        assert_eq!(Some(&"a"), inverse.get(&"7"));
        assert!(inverse.contains_key(&"96"));
        assert_eq!(Some((&"1", &"g")), inverse.get_by_index(0));
        assert_eq!(Some(6), inverse.index_of_key(&"96"));
    }

    #[test]
    fn permutation_is_a_bijection_in_value_order() {
        let map = digits();
        let order = map.value_order().unwrap();
        assert!(order.is_bijection());

        let ranked: Vec<&&str> = map.values_in_order().iter().collect();
        assert!(ranked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn slicing_rebuilds_the_value_order() {
        let map = digits();
        let sub = map.sub(&"b", &"e");

        assert_eq!(&["b", "c", "d"], sub.key_slice());
        let ranked: Vec<&&str> = sub.values_in_order().iter().collect();
        assert_eq!(vec![&"4", &"5", &"96"], ranked);
        assert_eq!(Some(0), sub.index_of_value(&"96"));
        assert_eq!(None, sub.index_of_value(&"7"));
        assert!(sub.value_order().unwrap().is_bijection());
    }

    #[test]
    fn whole_and_empty_slices() {
        let map = digits();
        assert!(map.range(..).ptr_eq(&map));
        assert!(map.head(&"a").ptr_eq(&SortedBiMap::default()));
        assert_eq!(None, map.head(&"a").index_of_value(&"7"));
    }

    #[test]
    fn index_slices_restrict_the_value_order() {
        let entries = [(1, 50), (2, 10), (3, 40), (4, 20), (5, 30)];
        let map = SortedBiMap::try_from_iter(entries).unwrap();
        let slice = map.slice(1, 4).unwrap();

        assert_eq!(&[2, 3, 4], slice.key_slice());
        let ranked: Vec<&i32> = slice.values_in_order().iter().collect();
        assert_eq!(vec![&10, &20, &40], ranked);

        for (k, v) in slice.iter() {
            assert!(slice.index_of_key(k).is_some());
            assert_eq!(slice.index_of_key(k), slice.index_of_value(v));
        }
        assert_eq!(None, slice.index_of_value(&50));
        assert_eq!(None, slice.index_of_value(&30));
        assert_eq!(Some(&3), slice.get_key(&40));
    }

    #[test]
    fn index_slice_edges() {
        let map = digits();

        assert!(map.slice(0, map.len()).unwrap().ptr_eq(&map));
        assert!(map.slice(2, 2).unwrap().ptr_eq(&SortedBiMap::default()));
        assert_eq!(
            Err(Error::InvalidRange { from: 3, to: 1 }),
            map.slice(3, 1).map(|_| ())
        );
        assert_eq!(
            Err(Error::IndexOutOfBounds { index: 8, len: 7 }),
            map.slice(0, 8).map(|_| ())
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = SortedBiMap::try_from_iter([("a", 1), ("b", 1)]);
        assert_eq!(Err(Error::DuplicateValue), result);

        let result = SortedBiMap::try_from_iter([("a", 1), ("a", 2)]);
        assert_eq!(Err(Error::DuplicateKey), result);
    }

    #[test]
    fn value_comparator_drives_value_search() {
        let descending = ByComparing::new(|a: &i32, b: &i32| b.cmp(a));
        let map = MapBuilder::new(SortedBi::new(NaturalOrder, descending))
            .with_entries([('a', 1), ('b', 3), ('c', 2)])
            .build()
            .unwrap();

        assert_eq!(
            vec![&3, &2, &1],
            map.values_in_order().iter().collect::<Vec<_>>()
        );
        assert_eq!(Some(2), map.index_of_value(&2));
        assert_eq!(Some(&'b'), map.get_key(&3));
    }

    #[test]
    fn large_maps_use_wider_slots() {
        let map = SortedBiMap::try_from_iter((0..1000).map(|x| (x, 999 - x))).unwrap();
        assert!(matches!(map.value_order(), Some(ValueOrder::Medium(_))));
        for x in (0..1000).step_by(37) {
            assert_eq!(Some(x as usize), map.index_of_value(&(999 - x)));
        }

        let tail = map.tail(&990);
        assert_eq!(Some(0), tail.index_of_value(&9));
        assert_eq!(Some(9), tail.index_of_value(&0));
    }
}
