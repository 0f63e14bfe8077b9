use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::RangeBounds;
use std::sync::Arc;

use len_trait::{Empty, Len};

use crate::builder::{ByKeyMethod, ItemBuilder};
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::bounds;
use crate::maps::table::Shared;
use crate::search::{self, Probe};
use crate::traits::unordered_hash;

/// An immutable map whose keys are computed from its values.
///
/// Only values are stored, sorted by the key `F` derives from each of them. Key lookups
/// binary search over keys computed on demand, so `F` should be cheap and must agree with the
/// order it was built with. Accessors that yield keys return them by value.
///
/// # Examples
///
/// ```
/// use packed_collections::PropertyMap;
///
/// let map = PropertyMap::try_from_iter(|s: &&str| s.len(), ["ccc", "a", "bb"]).unwrap();
///
/// assert_eq!(&["a", "bb", "ccc"], map.value_slice());
/// assert_eq!(Some(&"bb"), map.get(&2));
/// assert_eq!(vec![1, 2, 3], map.keys().collect::<Vec<_>>());
/// ```
pub struct PropertyMap<K, V, F, C = NaturalOrder> {
    table: Shared<(), V>,
    key_of: Arc<F>,
    comparator: C,
    _key: PhantomData<fn() -> K>,
}

impl<K, V, F> PropertyMap<K, V, F, NaturalOrder>
where
    K: Ord,
    V: Clone,
    F: Fn(&V) -> K,
{
    #[must_use]
    pub fn builder(key_of: F) -> ItemBuilder<V, ByKeyMethod<K, F>> {
        ItemBuilder::new(ByKeyMethod::new(key_of))
    }

    /// Builds a map from `values`, keyed by `key_of` in natural order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if two values produce the
    /// same key.
    pub fn try_from_iter<I: IntoIterator<Item = V>>(key_of: F, values: I) -> Result<Self> {
        Self::builder(key_of).with_items(values).build()
    }
}

impl<K, V, F, C> PropertyMap<K, V, F, C> {
    pub(crate) const fn new(table: Shared<(), V>, key_of: Arc<F>, comparator: C) -> Self {
        Self {
            table,
            key_of,
            comparator,
            _key: PhantomData,
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

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn value_at(&self, index: usize) -> Result<&V> {
        self.table.value_at(index)
    }

    #[must_use]
    pub fn value_slice(&self) -> &[V] {
        self.table.values()
    }

    pub fn values(&self) -> core::slice::Iter<'_, V> {
        self.table.values().iter()
    }

    pub fn key_function(&self) -> &F {
        &self.key_of
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
        Kind::Property
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        Kind::Property.capabilities()
    }

    #[cfg(feature = "rayon")]
    pub fn par_values(&self) -> rayon::slice::Iter<'_, V>
    where
        V: Sync,
    {
        use rayon::prelude::*;

        self.table.values().par_iter()
    }
}

impl<K, V, F, C: Clone> PropertyMap<K, V, F, C> {
    /// The entries at positions `[from, to)`, sharing this map's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(
            self.table.slice(from, to)?,
            Arc::clone(&self.key_of),
            self.comparator.clone(),
        ))
    }
}

impl<K, V, F, C> PropertyMap<K, V, F, C>
where
    F: Fn(&V) -> K,
{
    fn key_of(&self, index: usize) -> K {
        (self.key_of)(&self.table.values()[index])
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<(K, &V)> {
        let value = self.table.values().get(index)?;
        Some(((self.key_of)(value), value))
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn key_at(&self, index: usize) -> Result<K> {
        self.value_at(index).map(|x| (self.key_of)(x))
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn entry_at(&self, index: usize) -> Result<(K, &V)> {
        self.value_at(index).map(|x| ((self.key_of)(x), x))
    }

    #[must_use]
    pub fn first(&self) -> Option<(K, &V)> {
        self.get_by_index(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<(K, &V)> {
        self.get_by_index(self.len().checked_sub(1)?)
    }

    /// Keys computed from each value, in position order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.table.values().iter().map(|x| (self.key_of)(x))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, &V)> + ExactSizeIterator + '_ {
        self.table.values().iter().map(|x| ((self.key_of)(x), x))
    }
}

impl<K, V, F, C> PropertyMap<K, V, F, C>
where
    F: Fn(&V) -> K,
    C: Comparator<K>,
{
    /// Binary searches the computed keys for `key`.
    #[must_use]
    pub fn search(&self, key: &K) -> Probe {
        search::probe(0, self.len(), key, |i| self.key_of(i), &self.comparator)
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

impl<K, V, F, C> PropertyMap<K, V, F, C>
where
    F: Fn(&V) -> K,
    C: Comparator<K> + Clone,
{
    #[must_use]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Self {
        let (from, to) = bounds::resolve(&range, self.len(), |key| self.search(key));
        Self::new(
            self.table.window(from, to),
            Arc::clone(&self.key_of),
            self.comparator.clone(),
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

impl<K, V: PartialEq, F, C> PropertyMap<K, V, F, C> {
    #[must_use]
    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        self.table.values().iter().position(|x| x == value)
    }

    #[must_use]
    pub fn last_index_of_value(&self, value: &V) -> Option<usize> {
        self.table.values().iter().rposition(|x| x == value)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.table.values().contains(value)
    }
}

impl<K, V, F, C: Clone> Clone for PropertyMap<K, V, F, C> {
    fn clone(&self) -> Self {
        Self::new(
            self.table.clone(),
            Arc::clone(&self.key_of),
            self.comparator.clone(),
        )
    }
}

impl<K: Debug, V: Debug, F: Fn(&V) -> K, C> Debug for PropertyMap<K, V, F, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, F, C> PartialEq<Self> for PropertyMap<K, V, F, C>
where
    V: PartialEq,
    F: Fn(&V) -> K,
    C: Comparator<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(&key) == Some(value))
    }
}

impl<K, V, F, C> Eq for PropertyMap<K, V, F, C>
where
    V: Eq,
    F: Fn(&V) -> K,
    C: Comparator<K>,
{
}

impl<K: Hash, V: Hash, F: Fn(&V) -> K, C> Hash for PropertyMap<K, V, F, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<K, V, F, C> Len for PropertyMap<K, V, F, C> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V, F, C> Empty for PropertyMap<K, V, F, C> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::ByComparing;
    use crate::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Person {
        id: u32,
        name: &'static str,
    }

    const fn person(id: u32, name: &'static str) -> Person {
        Person { id, name }
    }

    fn people() -> Vec<Person> {
        vec![
            person(30, "carol"),
            person(10, "alice"),
            person(50, "eve"),
            person(20, "bob"),
            person(40, "dave"),
        ]
    }

    #[test]
    fn values_are_sorted_by_their_computed_key() {
        let map = PropertyMap::try_from_iter(|p: &Person| p.id, people()).unwrap();

        assert_eq!(5, map.len());
        assert_eq!(vec![10, 20, 30, 40, 50], map.keys().collect::<Vec<_>>());
        assert_eq!(Some(&person(30, "carol")), map.get(&30));
        assert_eq!(None, map.get(&35));
        assert_eq!(Ok(40), map.key_at(3));
        assert_eq!(
            Err(Error::IndexOutOfBounds { index: 5, len: 5 }),
            map.key_at(5)
        );
    }

    #[test]
    fn repeated_computed_keys_are_rejected() {
        let result = PropertyMap::try_from_iter(|s: &&str| s.len(), ["ab", "cd"]);
        assert_eq!(Err(Error::DuplicateKey), result.map(|_| ()));
    }

    #[test]
    fn navigation_uses_computed_keys() {
        let map = PropertyMap::try_from_iter(|p: &Person| p.id, people()).unwrap();

        assert_eq!(Some(1), map.floor_index(&25));
        assert_eq!(Some(2), map.ceiling_index(&25));
        assert_eq!(Some(1), map.lower_index(&30));
        assert_eq!(Some(3), map.higher_index(&30));
        assert_eq!(None, map.higher_index(&50));
        assert_eq!(Some((10, &person(10, "alice"))), map.first());
        assert_eq!(Some((50, &person(50, "eve"))), map.last());
    }

    #[test]
    fn key_ranges_share_the_key_function() {
        let map = PropertyMap::try_from_iter(|p: &Person| p.id, people()).unwrap();

        let sub = map.sub(&20, &40);
        assert_eq!(vec![20, 30], sub.keys().collect::<Vec<_>>());
        assert_eq!(Some(0), sub.index_of_key(&20));
        assert!(map.range(..).ptr_eq(&map));
        assert!(map.tail(&60).is_empty());
        assert!(map.range(&40..&20).is_empty());
        assert_eq!(30, (sub.key_function())(&person(30, "carol")));
    }

    #[test]
    fn index_slices_keep_computed_keys() {
        let map = PropertyMap::try_from_iter(|p: &Person| p.id, people()).unwrap();

        let slice = map.slice(1, 3).unwrap();
        assert_eq!(vec![20, 30], slice.keys().collect::<Vec<_>>());
        assert_eq!(Some(&person(30, "carol")), slice.get(&30));
        assert_eq!(None, slice.get(&10));

        assert!(map.slice(0, map.len()).unwrap().ptr_eq(&map));
        assert!(map.slice(4, 4).unwrap().is_empty());
        assert!(map.slice(3, 1).is_err());
    }

    #[test]
    fn value_search_is_linear() {
        let map = PropertyMap::try_from_iter(|p: &Person| p.id, people()).unwrap();
        assert_eq!(Some(1), map.index_of_value(&person(20, "bob")));
        assert_eq!(None, map.index_of_value(&person(20, "robert")));
        assert!(map.contains_value(&person(50, "eve")));
    }

    #[test]
    fn custom_comparator_orders_the_keys() {
        let recipe = ByKeyMethod::with(
            |p: &Person| p.name,
            ByComparing::new(|a: &&str, b: &&str| b.cmp(a)),
        );
        let map = ItemBuilder::new(recipe)
            .with_items(people())
            .build()
            .unwrap();

        let names: Vec<&str> = map.keys().collect();
        assert_eq!(vec!["eve", "dave", "carol", "bob", "alice"], names);
        assert_eq!(Some(&person(20, "bob")), map.get(&"bob"));
    }

    fn tens(x: &i32) -> i32 {
        x / 10
    }

    fn hash_of<T: Hash>(x: &T) -> u64 {
        use core::hash::BuildHasher;
        std::hash::BuildHasherDefault::<std::hash::DefaultHasher>::default().hash_one(x)
    }

    #[test]
    fn equality_and_hash_follow_content() {
        let a = PropertyMap::try_from_iter(tens, [10, 25, 31]).unwrap();
        let b = PropertyMap::try_from_iter(tens, [31, 10, 25]).unwrap();
        let c = PropertyMap::try_from_iter(tens, [10, 25, 32]).unwrap();

        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!("{1: 10, 2: 25, 3: 31}", format!("{a:?}"));
    }
}
