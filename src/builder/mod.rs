use core::fmt::{Debug, Formatter, Result as FmtResult};

use log::debug;

use crate::builder::buffer::EntryBuffer;
pub use crate::builder::recipe::*;
use crate::error::Result;

pub(crate) mod bake;
mod buffer;
mod recipe;

/// Accumulates key/value pairs and bakes them into an immutable map.
///
/// Entries are appended in call order and nothing is checked until [`build`](Self::build).
/// Building borrows the builder, so a failed build can be fixed up and retried, and a successful
/// one can be repeated to get another container with equal contents.
///
/// # Examples
///
/// ```
/// use packed_collections::{MapBuilder, Sorted};
///
/// let map = MapBuilder::new(Sorted::natural())
///     .with("b", 2)
///     .with("a", 1)
///     .build()
///     .unwrap();
///
/// assert_eq!(Some(&1), map.get(&"a"));
/// assert_eq!(&["a", "b"], map.key_slice());
/// ```
pub struct MapBuilder<K, V, R> {
    recipe: R,
    buffer: EntryBuffer<K, V>,
}

impl<K, V, R> MapBuilder<K, V, R>
where
    R: Recipe<K, V>,
{
    #[must_use]
    pub const fn new(recipe: R) -> Self {
        Self {
            recipe,
            buffer: EntryBuffer::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(recipe: R, capacity: usize) -> Self {
        Self {
            recipe,
            buffer: EntryBuffer::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn with(mut self, key: K, value: V) -> Self {
        self.push(key, value);
        self
    }

    /// Appends every pair of `entries`, which may be another map.
    #[must_use]
    pub fn with_entries<I: IntoIterator<Item = (K, V)>>(mut self, entries: I) -> Self {
        self.buffer.extend(entries);
        self
    }

    pub fn push(&mut self, key: K, value: V) {
        self.buffer.push(key, value);
    }

    /// Appends the entries accumulated by `other`.
    #[must_use]
    pub fn merge<R2>(mut self, mut other: MapBuilder<K, V, R2>) -> Self {
        self.buffer.append(&mut other.buffer);
        self
    }

    /// Moves the entries accumulated by `other` into this builder, leaving `other` empty.
    pub fn append<R2>(&mut self, other: &mut MapBuilder<K, V, R2>) {
        self.buffer.append(&mut other.buffer);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub const fn recipe(&self) -> &R {
        &self.recipe
    }

    /// Bakes the accumulated entries.
    ///
    /// An empty builder yields the shared empty container of the recipe's kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if two entries have equal
    /// keys, or [`Error::DuplicateValue`](crate::Error::DuplicateValue) if the recipe builds a
    /// bi-map and two entries have equal values.
    pub fn build(&self) -> Result<R::Output> {
        if self.buffer.is_empty() {
            return Ok(self.recipe.empty());
        }

        let output = self.recipe.bake(self.buffer.keys(), self.buffer.values())?;
        debug!(
            "built {} container with {} entries",
            self.recipe.kind(),
            self.buffer.len()
        );

        Ok(output)
    }
}

impl<K, V, R: Default> Default for MapBuilder<K, V, R> {
    fn default() -> Self {
        Self {
            recipe: R::default(),
            buffer: EntryBuffer::new(),
        }
    }
}

impl<K: Clone, V: Clone, R: Clone> Clone for MapBuilder<K, V, R> {
    fn clone(&self) -> Self {
        Self {
            recipe: self.recipe.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl<K, V, R> Extend<(K, V)> for MapBuilder<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.buffer.extend(iter);
    }
}

impl<K: Debug, V: Debug, R: Debug> Debug for MapBuilder<K, V, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MapBuilder")
            .field("recipe", &self.recipe)
            .field("entries", &self.buffer)
            .finish()
    }
}

/// Accumulates single items and bakes them into a set or a property-keyed map.
pub struct ItemBuilder<T, R> {
    recipe: R,
    buffer: EntryBuffer<T, ()>,
}

impl<T, R> ItemBuilder<T, R>
where
    R: ItemRecipe<T>,
{
    #[must_use]
    pub const fn new(recipe: R) -> Self {
        Self {
            recipe,
            buffer: EntryBuffer::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(recipe: R, capacity: usize) -> Self {
        Self {
            recipe,
            buffer: EntryBuffer::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn with(mut self, item: T) -> Self {
        self.push(item);
        self
    }

    #[must_use]
    pub fn with_items<I: IntoIterator<Item = T>>(mut self, items: I) -> Self {
        self.extend(items);
        self
    }

    pub fn push(&mut self, item: T) {
        self.buffer.push(item, ());
    }

    #[must_use]
    pub fn merge<R2>(mut self, mut other: ItemBuilder<T, R2>) -> Self {
        self.buffer.append(&mut other.buffer);
        self
    }

    pub fn append<R2>(&mut self, other: &mut ItemBuilder<T, R2>) {
        self.buffer.append(&mut other.buffer);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub const fn recipe(&self) -> &R {
        &self.recipe
    }

    /// Bakes the accumulated items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if two items, or the keys
    /// computed from them, are equal.
    pub fn build(&self) -> Result<R::Output> {
        if self.buffer.is_empty() {
            return Ok(self.recipe.empty());
        }

        let output = self.recipe.bake(self.buffer.keys())?;
        debug!(
            "built {} container with {} items",
            self.recipe.kind(),
            self.buffer.len()
        );

        Ok(output)
    }
}

impl<T, R: Default> Default for ItemBuilder<T, R> {
    fn default() -> Self {
        Self {
            recipe: R::default(),
            buffer: EntryBuffer::new(),
        }
    }
}

impl<T: Clone, R: Clone> Clone for ItemBuilder<T, R> {
    fn clone(&self) -> Self {
        Self {
            recipe: self.recipe.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl<T, R> Extend<T> for ItemBuilder<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buffer.extend(iter.into_iter().map(|x| (x, ())));
    }
}

impl<T: Debug, R: Debug> Debug for ItemBuilder<T, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ItemBuilder")
            .field("recipe", &self.recipe)
            .field("items", &self.buffer.keys())
            .finish()
    }
}
