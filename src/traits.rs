use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::hash::DefaultHasher;

/// The positional and search surface shared by every map with stored keys.
///
/// This is what adapters to other collection interfaces need: entries addressed by position, the
/// entry count, and the position of a key or a value.
pub trait IndexedMap<K, V> {
    fn len(&self) -> usize;

    fn get_by_index(&self, index: usize) -> Option<(&K, &V)>;

    fn index_of_key(&self, key: &K) -> Option<usize>;

    fn index_of_value(&self, value: &V) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: 'a,
        V: 'a,
    {
        let index = self.index_of_key(key)?;
        self.get_by_index(index).map(|x| x.1)
    }

    /// Returns `true` if both maps hold the same entries, whatever their kind or order.
    fn content_eq<M>(&self, other: &M) -> bool
    where
        M: IndexedMap<K, V> + ?Sized,
        V: PartialEq,
    {
        self.len() == other.len()
            && (0..self.len())
                .filter_map(|index| self.get_by_index(index))
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

/// Combines per-item hashes with a wrapping sum so the result does not depend on item order.
pub(crate) fn unordered_hash<I>(items: I) -> u64
where
    I: IntoIterator,
    I::Item: Hash,
{
    let bh = BuildHasherDefault::<DefaultHasher>::default();
    items
        .into_iter()
        .fold(0u64, |sum, item| sum.wrapping_add(bh.hash_one(item)))
}
