use core::hash::{BuildHasher, Hash};
use std::sync::Arc;

use log::trace;

use crate::error::{check_index, check_range, Result};
use crate::maps::permutation::ValueOrder;

/// A window `[start, start + len)` over an immutable, shareable array.
pub struct Column<T> {
    data: Arc<[T]>,
    start: usize,
    len: usize,
}

impl<T> Column<T> {
    pub fn new(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            data: items.into(),
            start: 0,
            len,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.start..self.start + self.len]
    }

    /// A narrower window over the same array; nothing is copied.
    fn window(&self, from: usize, to: usize) -> Self {
        Self {
            data: Arc::clone(&self.data),
            start: self.start + from,
            len: to - from,
        }
    }
}

/// The finished backing storage of every container.
///
/// Position `i` holds key `i` and value `i`. When present, `hash_codes` has `2 * len` slots:
/// key hashes first, then value hashes, each at the offset of its entry.
pub struct Table<K, V> {
    keys: Column<K>,
    values: Column<V>,
    hash_codes: Option<Box<[u64]>>,
    value_order: Option<ValueOrder>,
}

impl<K, V> Table<K, V> {
    pub fn new(keys: Vec<K>, values: Vec<V>) -> Self {
        debug_assert_eq!(keys.len(), values.len());

        Self {
            keys: Column::new(keys),
            values: Column::new(values),
            hash_codes: None,
            value_order: None,
        }
    }

    /// Caches the hash of every key and value.
    #[must_use]
    pub fn with_hash_codes<BH>(mut self, bh: &BH) -> Self
    where
        K: Hash,
        V: Hash,
        BH: BuildHasher,
    {
        let keys = self.keys.as_slice().iter().map(|x| bh.hash_one(x));
        let values = self.values.as_slice().iter().map(|x| bh.hash_one(x));
        self.hash_codes = Some(keys.chain(values).collect());
        self
    }

    /// # Panics
    ///
    /// Panics if `order` does not list every position exactly once.
    #[must_use]
    pub fn with_value_order(mut self, order: ValueOrder) -> Self {
        assert!(
            order.len() == self.len() && order.is_bijection(),
            "value order is not a permutation of the entries"
        );

        self.value_order = Some(order);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len
    }

    #[inline]
    pub fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }

    #[inline]
    pub fn values(&self) -> &[V] {
        self.values.as_slice()
    }

    fn window(&self, from: usize, to: usize) -> Self {
        let hash_codes = self.hash_codes.as_ref().map(|codes| {
            let len = self.len();
            codes[from..to]
                .iter()
                .chain(&codes[len + from..len + to])
                .copied()
                .collect()
        });

        Self {
            keys: self.keys.window(from, to),
            values: self.values.window(from, to),
            hash_codes,
            value_order: self.value_order.as_ref().map(|x| x.restrict(from, to)),
        }
    }
}

/// A reference-counted table, or nothing at all for an empty container.
///
/// Every empty container of a kind is [`Shared::EMPTY`], so emptiness is a single shared
/// identity; every successful bake allocates a fresh table with an identity of its own.
pub struct Shared<K, V>(Option<Arc<Table<K, V>>>);

impl<K, V> Shared<K, V> {
    pub const EMPTY: Self = Self(None);

    pub fn new(table: Table<K, V>) -> Self {
        if table.len() == 0 {
            Self::EMPTY
        } else {
            Self(Some(Arc::new(table)))
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |x| x.len())
    }

    #[inline]
    pub fn keys(&self) -> &[K] {
        match &self.0 {
            Some(table) => table.keys(),
            None => &[],
        }
    }

    #[inline]
    pub fn values(&self) -> &[V] {
        match &self.0 {
            Some(table) => table.values(),
            None => &[],
        }
    }

    #[inline]
    pub fn entry(&self, index: usize) -> Option<(&K, &V)> {
        let table = self.0.as_ref()?;
        Some((table.keys().get(index)?, &table.values()[index]))
    }

    pub fn key_at(&self, index: usize) -> Result<&K> {
        Ok(&self.keys()[check_index(index, self.len())?])
    }

    pub fn value_at(&self, index: usize) -> Result<&V> {
        Ok(&self.values()[check_index(index, self.len())?])
    }

    pub fn entry_at(&self, index: usize) -> Result<(&K, &V)> {
        let index = check_index(index, self.len())?;
        Ok((&self.keys()[index], &self.values()[index]))
    }

    pub fn hash_codes(&self) -> Option<&[u64]> {
        self.0.as_ref()?.hash_codes.as_deref()
    }

    pub fn value_order(&self) -> Option<&ValueOrder> {
        self.0.as_ref()?.value_order.as_ref()
    }

    /// Returns `true` if both handles share the same table, or are both empty.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The entries at positions `[from, to)`.
    ///
    /// The whole range hands back this table, an empty range hands back [`Shared::EMPTY`], and
    /// anything else is a new table aliasing the same columns.
    pub fn window(&self, from: usize, to: usize) -> Self {
        let Some(table) = &self.0 else {
            return Self::EMPTY;
        };

        debug_assert!(from <= to && to <= table.len());

        if from == 0 && to == table.len() {
            self.clone()
        } else if from >= to {
            Self::EMPTY
        } else {
            trace!("slicing entries {from}..{to} of {}", table.len());
            Self(Some(Arc::new(table.window(from, to))))
        }
    }

    /// Same as [`Shared::window`] for a caller-supplied index range, which is validated first.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        check_range(from, to, self.len())?;
        Ok(self.window(from, to))
    }

    /// Positions of entries whose cached key hash equals `hash`; every position when no hash
    /// codes are cached.
    pub fn key_candidates(&self, hash: u64) -> impl DoubleEndedIterator<Item = usize> + '_ {
        let codes = self.hash_codes();
        (0..self.len()).filter(move |i| codes.map_or(true, |c| c[*i] == hash))
    }

    /// Positions of entries whose cached value hash equals `hash`; every position when no hash
    /// codes are cached.
    pub fn value_candidates(&self, hash: u64) -> impl DoubleEndedIterator<Item = usize> + '_ {
        let len = self.len();
        let codes = self.hash_codes();
        (0..len).filter(move |i| codes.map_or(true, |c| c[len + *i] == hash))
    }
}

impl<K, V> Clone for Shared<K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::hash::RandomState;

    use super::*;

    fn table(len: usize) -> Table<usize, String> {
        let values = (0..len).map(|x| x.to_string()).collect();
        Table::new((0..len).collect(), values)
    }

    #[test]
    fn empty_tables_collapse_to_the_shared_empty() {
        let shared = Shared::new(table(0));
        assert!(shared.ptr_eq(&Shared::EMPTY));
        assert_eq!(0, shared.len());
        assert!(shared.keys().is_empty());
        assert_eq!(None, shared.entry(0));
    }

    #[test]
    fn separate_tables_have_separate_identities() {
        let a = Shared::new(table(3));
        let b = Shared::new(table(3));
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn entry_reads_both_columns() {
        let shared = Shared::new(table(3));
        assert_eq!(Some((&1, &"1".to_string())), shared.entry(1));
        assert_eq!(None, shared.entry(3));
    }

    #[test]
    fn window_reuses_or_narrows() {
        let shared = Shared::new(table(5));

        assert!(shared.window(0, 5).ptr_eq(&shared));
        assert!(shared.window(2, 2).ptr_eq(&Shared::EMPTY));

        let window = shared.window(1, 4);
        assert_eq!(&[1, 2, 3], window.keys());
        assert_eq!(&["1", "2", "3"], window.values());

        let nested = window.window(1, 2);
        assert_eq!(&[2], nested.keys());
    }

    #[test]
    fn positional_accessors_check_bounds() {
        let shared = Shared::new(table(2));
        assert_eq!(Ok(&1), shared.key_at(1));
        assert_eq!(Ok("0"), shared.value_at(0).map(String::as_str));
        assert_eq!(
            Err(crate::Error::IndexOutOfBounds { index: 2, len: 2 }),
            shared.entry_at(2)
        );
    }

    #[test]
    fn slice_validates_then_windows() {
        let shared = Shared::new(table(4));
        assert_eq!(&[1, 2], shared.slice(1, 3).unwrap().keys());
        assert!(shared.slice(3, 1).is_err());
        assert!(shared.slice(0, 5).is_err());
    }

    #[test]
    fn window_restricts_value_order() {
        let t = table(4).with_value_order(ValueOrder::from_indices(&[3, 2, 1, 0]));
        let shared = Shared::new(t);

        let window = shared.window(1, 3);
        let order: Vec<usize> = window.value_order().unwrap().iter().collect();
        assert_eq!(vec![1, 0], order);
    }

    #[test]
    #[should_panic(expected = "value order is not a permutation")]
    fn value_order_must_cover_every_entry() {
        let _ = table(3).with_value_order(ValueOrder::from_indices(&[0, 0, 2]));
    }

    #[test]
    fn hash_codes_follow_entries_through_windows() {
        let bh = RandomState::new();
        let shared = Shared::new(table(4).with_hash_codes(&bh));

        let codes = shared.hash_codes().unwrap();
        assert_eq!(8, codes.len());
        assert_eq!(bh.hash_one(2usize), codes[2]);
        assert_eq!(bh.hash_one("2".to_string()), codes[4 + 2]);

        let window = shared.window(2, 4);
        let codes = window.hash_codes().unwrap();
        assert_eq!(&[bh.hash_one(2usize), bh.hash_one(3usize)], &codes[..2]);
        assert_eq!(bh.hash_one("3".to_string()), codes[3]);
    }

    #[test]
    fn candidates_filter_by_hash() {
        let bh = RandomState::new();
        let shared = Shared::new(table(4).with_hash_codes(&bh));

        let keys: Vec<usize> = shared.key_candidates(bh.hash_one(3usize)).collect();
        assert_eq!(vec![3], keys);

        let hash = bh.hash_one("1".to_string());
        let values: Vec<usize> = shared.value_candidates(hash).collect();
        assert_eq!(vec![1], values);

        let unhashed = Shared::new(table(3));
        assert_eq!(3, unhashed.key_candidates(0).count());
    }
}
