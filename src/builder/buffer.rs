use core::fmt::{Debug, Formatter, Result};

/// Capacity is always a multiple of this many entries.
const BLOCK: usize = 8;

/// Append-only key and value storage used by every builder.
///
/// Keys and values live in two parallel vectors that always have the same length. Nothing is
/// validated here; duplicate detection is left to baking.
pub struct EntryBuffer<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
}

impl<K, V> EntryBuffer<K, V> {
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::new();
        buffer.reserve(capacity);
        buffer
    }

    /// Makes room for `additional` more entries.
    ///
    /// Capacity grows by `max(len + additional, capacity)`, rounded up to a whole block, and
    /// both columns grow together.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len() + additional;
        if needed <= self.capacity() {
            return;
        }

        let target = round_up(self.capacity() + needed.max(self.capacity()));
        self.keys.reserve_exact(target - self.keys.len());
        self.values.reserve_exact(target - self.values.len());
    }

    pub fn push(&mut self, key: K, value: V) {
        self.reserve(1);
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.push(key, value);
        }
    }

    /// Moves every entry of `other` to the end of this buffer, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        self.reserve(other.len());
        self.keys.append(&mut other.keys);
        self.values.append(&mut other.values);
    }

    /// Forgets every entry while keeping the allocation.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.keys.capacity().min(self.values.capacity())
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.keys.iter().zip(self.values.iter())
    }
}

impl<K, V> Default for EntryBuffer<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for EntryBuffer<K, V> {
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.len());
        clone.keys.extend_from_slice(&self.keys);
        clone.values.extend_from_slice(&self.values);
        clone
    }
}

impl<K: Debug, V: Debug> Debug for EntryBuffer<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

const fn round_up(capacity: usize) -> usize {
    capacity.div_ceil(BLOCK) * BLOCK
}
