use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::marker::PhantomData;
use std::hash::DefaultHasher;
use std::sync::Arc;

use crate::builder::bake;
use crate::comparator::{ByComparing, Comparator, NaturalOrder};
use crate::error::Result;
use crate::kind::Kind;
use crate::maps::table::{Shared, Table};
use crate::maps::{ArrayMap, HashedMap, PropertyMap, SortedBiMap, SortedMap};
use crate::sets::{ArraySet, HashedSet, SortedSet};

/// Turns buffered keys and values into a finished map.
///
/// A recipe decides the container kind, which duplicates are fatal, and the order the entries
/// end up in. It is handed to a [`MapBuilder`](crate::MapBuilder) up front and consulted on every
/// `build()`.
pub trait Recipe<K, V> {
    type Output;

    fn kind(&self) -> Kind;

    /// The container returned for an empty builder.
    fn empty(&self) -> Self::Output;

    /// Validates and arranges a non-empty run of entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) when two keys are equal, and
    /// [`Error::DuplicateValue`](crate::Error::DuplicateValue) when two values are equal and the
    /// output is a bi-map.
    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output>;
}

/// Turns buffered items into a finished set or property-keyed map.
pub trait ItemRecipe<T> {
    type Output;

    fn kind(&self) -> Kind;

    fn empty(&self) -> Self::Output;

    /// Validates and arranges a non-empty run of items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) when two items, or the keys
    /// computed from them, are equal.
    fn bake(&self, items: &[T]) -> Result<Self::Output>;
}

/// Insertion order, linear search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unsorted;

/// Insertion order, linear search, and no value may repeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsortedBi;

impl Unsorted {
    #[must_use]
    pub const fn bi_map() -> UnsortedBi {
        UnsortedBi
    }
}

impl<K, V> Recipe<K, V> for Unsorted
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Output = ArrayMap<K, V>;

    fn kind(&self) -> Kind {
        Kind::Unsorted
    }

    fn empty(&self) -> Self::Output {
        ArrayMap::new(Shared::EMPTY, false)
    }

    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output> {
        let table = bake::unsorted(keys, values)?;
        Ok(ArrayMap::new(Shared::new(table), false))
    }
}

impl<K, V> Recipe<K, V> for UnsortedBi
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    type Output = ArrayMap<K, V>;

    fn kind(&self) -> Kind {
        Kind::Unsorted
    }

    fn empty(&self) -> Self::Output {
        ArrayMap::new(Shared::EMPTY, true)
    }

    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output> {
        let table = bake::unsorted_bi(keys, values)?;
        Ok(ArrayMap::new(Shared::new(table), true))
    }
}

impl<T> ItemRecipe<T> for Unsorted
where
    T: Eq + Hash + Clone,
{
    type Output = ArraySet<T>;

    fn kind(&self) -> Kind {
        Kind::Unsorted
    }

    fn empty(&self) -> Self::Output {
        ArraySet::new(Recipe::<T, ()>::empty(self))
    }

    fn bake(&self, items: &[T]) -> Result<Self::Output> {
        let map = Recipe::bake(self, items, &units(items)[..])?;
        Ok(ArraySet::new(map))
    }
}

/// Insertion order with the hash of every key and value cached for fast rejection.
pub struct Hashed<BH = BuildHasherDefault<DefaultHasher>> {
    bi_map: bool,
    hasher: BH,
}

impl Hashed<BuildHasherDefault<DefaultHasher>> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::default())
    }
}

impl<BH> Hashed<BH> {
    #[must_use]
    pub const fn with_hasher(hasher: BH) -> Self {
        Self {
            bi_map: false,
            hasher,
        }
    }

    /// Also rejects repeated values at build time.
    #[must_use]
    pub const fn bi_map(mut self) -> Self {
        self.bi_map = true;
        self
    }

    pub const fn hasher(&self) -> &BH {
        &self.hasher
    }
}

impl<BH: Default> Default for Hashed<BH> {
    fn default() -> Self {
        Self::with_hasher(BH::default())
    }
}

impl<BH: Clone> Clone for Hashed<BH> {
    fn clone(&self) -> Self {
        Self {
            bi_map: self.bi_map,
            hasher: self.hasher.clone(),
        }
    }
}

impl<BH> Debug for Hashed<BH> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hashed")
            .field("bi_map", &self.bi_map)
            .finish_non_exhaustive()
    }
}

impl<K, V, BH> Recipe<K, V> for Hashed<BH>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
    BH: BuildHasher + Clone,
{
    type Output = HashedMap<K, V, BH>;

    fn kind(&self) -> Kind {
        Kind::Hashed
    }

    fn empty(&self) -> Self::Output {
        HashedMap::new(Shared::EMPTY, self.bi_map, self.hasher.clone())
    }

    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output> {
        let table = if self.bi_map {
            bake::unsorted_bi(keys, values)?
        } else {
            bake::unsorted(keys, values)?
        };

        let table = table.with_hash_codes(&self.hasher);
        Ok(HashedMap::new(
            Shared::new(table),
            self.bi_map,
            self.hasher.clone(),
        ))
    }
}

impl<T, BH> ItemRecipe<T> for Hashed<BH>
where
    T: Eq + Hash + Clone,
    BH: BuildHasher + Clone,
{
    type Output = HashedSet<T, BH>;

    fn kind(&self) -> Kind {
        Kind::Hashed
    }

    fn empty(&self) -> Self::Output {
        HashedSet::new(Recipe::<T, ()>::empty(self))
    }

    fn bake(&self, items: &[T]) -> Result<Self::Output> {
        let map = Recipe::bake(self, items, &units(items)[..])?;
        Ok(HashedSet::new(map))
    }
}

/// Entries sorted by key with comparator `C`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sorted<C = NaturalOrder> {
    comparator: C,
}

impl Sorted<NaturalOrder> {
    #[must_use]
    pub const fn natural() -> Self {
        Self {
            comparator: NaturalOrder,
        }
    }

    /// Sorts with a comparison function.
    #[must_use]
    pub const fn by<F>(f: F) -> Sorted<ByComparing<F>> {
        Sorted::with(ByComparing::new(f))
    }
}

impl<C> Sorted<C> {
    #[must_use]
    pub const fn with(comparator: C) -> Self {
        Self { comparator }
    }

    pub const fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<K, V, C> Recipe<K, V> for Sorted<C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
{
    type Output = SortedMap<K, V, C>;

    fn kind(&self) -> Kind {
        Kind::Sorted
    }

    fn empty(&self) -> Self::Output {
        SortedMap::new(Shared::EMPTY, self.comparator.clone())
    }

    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output> {
        let table = bake::sorted(keys, values, &self.comparator)?;
        Ok(SortedMap::new(Shared::new(table), self.comparator.clone()))
    }
}

impl<T, C> ItemRecipe<T> for Sorted<C>
where
    T: Clone,
    C: Comparator<T> + Clone,
{
    type Output = SortedSet<T, C>;

    fn kind(&self) -> Kind {
        Kind::Sorted
    }

    fn empty(&self) -> Self::Output {
        SortedSet::new(Recipe::<T, ()>::empty(self))
    }

    fn bake(&self, items: &[T]) -> Result<Self::Output> {
        let map = Recipe::bake(self, items, &units(items)[..])?;
        Ok(SortedSet::new(map))
    }
}

/// Entries sorted by key, with values searchable through a value-order permutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedBi<KC = NaturalOrder, VC = NaturalOrder> {
    keys: KC,
    values: VC,
}

impl SortedBi<NaturalOrder, NaturalOrder> {
    #[must_use]
    pub const fn natural() -> Self {
        Self::new(NaturalOrder, NaturalOrder)
    }
}

impl<KC, VC> SortedBi<KC, VC> {
    #[must_use]
    pub const fn new(keys: KC, values: VC) -> Self {
        Self { keys, values }
    }
}

impl<K, V, KC, VC> Recipe<K, V> for SortedBi<KC, VC>
where
    K: Clone,
    V: Clone,
    KC: Comparator<K> + Clone,
    VC: Comparator<V> + Clone,
{
    type Output = SortedBiMap<K, V, KC, VC>;

    fn kind(&self) -> Kind {
        Kind::SortedBi
    }

    fn empty(&self) -> Self::Output {
        SortedBiMap::new(Shared::EMPTY, self.keys.clone(), self.values.clone())
    }

    fn bake(&self, keys: &[K], values: &[V]) -> Result<Self::Output> {
        let table = bake::sorted_bi(keys, values, &self.keys, &self.values)?;
        Ok(SortedBiMap::new(
            Shared::new(table),
            self.keys.clone(),
            self.values.clone(),
        ))
    }
}

/// Values sorted by the key a function computes from each of them.
pub struct ByKeyMethod<K, F, C = NaturalOrder> {
    key_of: Arc<F>,
    comparator: C,
    _key: PhantomData<fn() -> K>,
}

impl<K, F> ByKeyMethod<K, F, NaturalOrder> {
    #[must_use]
    pub fn new(key_of: F) -> Self {
        Self::with(key_of, NaturalOrder)
    }
}

impl<K, F, C> ByKeyMethod<K, F, C> {
    #[must_use]
    pub fn with(key_of: F, comparator: C) -> Self {
        Self {
            key_of: Arc::new(key_of),
            comparator,
            _key: PhantomData,
        }
    }
}

impl<K, F, C: Clone> Clone for ByKeyMethod<K, F, C> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
            comparator: self.comparator.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, F, C: Debug> Debug for ByKeyMethod<K, F, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByKeyMethod")
            .field("comparator", &self.comparator)
            .finish_non_exhaustive()
    }
}

impl<K, V, F, C> ItemRecipe<V> for ByKeyMethod<K, F, C>
where
    V: Clone,
    F: Fn(&V) -> K,
    C: Comparator<K> + Clone,
{
    type Output = PropertyMap<K, V, F, C>;

    fn kind(&self) -> Kind {
        Kind::Property
    }

    fn empty(&self) -> Self::Output {
        PropertyMap::new(
            Shared::EMPTY,
            Arc::clone(&self.key_of),
            self.comparator.clone(),
        )
    }

    fn bake(&self, items: &[V]) -> Result<Self::Output> {
        let table: Table<(), V> = bake::by_key(items, &*self.key_of, &self.comparator)?;
        Ok(PropertyMap::new(
            Shared::new(table),
            Arc::clone(&self.key_of),
            self.comparator.clone(),
        ))
    }
}

fn units<T>(items: &[T]) -> Vec<()> {
    vec![(); items.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn kind_of<R: Recipe<i32, i32>>(recipe: &R) -> Kind {
        recipe.kind()
    }

    #[test]
    fn recipes_report_their_kind() {
        assert_eq!(Kind::Unsorted, kind_of(&Unsorted));
        assert_eq!(Kind::Unsorted, kind_of(&Unsorted::bi_map()));
        assert_eq!(Kind::Hashed, kind_of(&Hashed::new()));
        assert_eq!(Kind::Sorted, kind_of(&Sorted::natural()));
        assert_eq!(Kind::SortedBi, kind_of(&SortedBi::natural()));

        let by_len = ByKeyMethod::new(|s: &String| s.len());
        assert_eq!(Kind::Property, ItemRecipe::<String>::kind(&by_len));
    }

    #[test]
    fn empty_outputs_share_one_identity() {
        let a: ArrayMap<i32, i32> = Recipe::empty(&Unsorted);
        let b: ArrayMap<i32, i32> = Recipe::empty(&Unsorted);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn hashed_bi_map_rejects_repeated_values() {
        let recipe = Hashed::new().bi_map();
        let result: Result<HashedMap<&str, i32>> = Recipe::bake(&recipe, &["a", "b"], &[1, 1]);
        assert_eq!(Err(Error::DuplicateValue), result.map(|_| ()));

        let recipe = Hashed::new();
        let result: Result<HashedMap<&str, i32>> = Recipe::bake(&recipe, &["a", "b"], &[1, 1]);
        assert!(result.is_ok());
    }

    #[test]
    fn sorted_by_uses_the_function() {
        let recipe = Sorted::by(|a: &i32, b: &i32| b.cmp(a));
        let map = Recipe::bake(&recipe, &[1, 3, 2], &['a', 'c', 'b']).unwrap();
        assert_eq!(&[3, 2, 1], map.key_slice());
    }

    #[test]
    fn item_recipes_bake_sets() {
        let set = ItemRecipe::bake(&Sorted::natural(), &[3, 1, 2]).unwrap();
        assert_eq!(&[1, 2, 3], set.as_slice());

        let result = ItemRecipe::bake(&Unsorted, &[1, 1]).map(|_: ArraySet<i32>| ());
        assert_eq!(Err(Error::DuplicateKey), result);
    }
}
