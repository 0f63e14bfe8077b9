use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};

use len_trait::{Empty, Len};

use crate::builder::{ItemBuilder, Unsorted};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::ArrayMap;
use crate::sets::SetIter;
use crate::traits::unordered_hash;

/// An immutable set that keeps its elements in insertion order.
///
/// # Examples
///
/// ```
/// use packed_collections::ArraySet;
///
/// let set = ArraySet::try_from_iter(["red", "green", "blue"]).unwrap();
///
/// assert!(set.contains(&"green"));
/// assert_eq!(Some(2), set.index_of(&"blue"));
/// assert_eq!(&["red", "green", "blue"], set.as_slice());
/// ```
pub struct ArraySet<T> {
    map: ArrayMap<T, ()>,
}

impl<T> ArraySet<T>
where
    T: Eq + Hash + Clone,
{
    #[must_use]
    pub const fn builder() -> ItemBuilder<T, Unsorted> {
        ItemBuilder::new(Unsorted)
    }

    /// Builds a set from `items` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if an element repeats.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(items: I) -> Result<Self> {
        Self::builder().with_items(items).build()
    }
}

impl<T> ArraySet<T> {
    pub(crate) const fn new(map: ArrayMap<T, ()>) -> Self {
        Self { map }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&T> {
        Some(self.map.get_by_index(index)?.0)
    }

    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `index >= len`.
    pub fn element_at(&self, index: usize) -> Result<&T> {
        self.map.key_at(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.map.key_slice()
    }

    #[must_use]
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter::new(self.map.keys())
    }

    #[cfg(feature = "rayon")]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        self.as_slice().par_iter()
    }

    /// The elements at positions `[from, to)`, sharing this set's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(self.map.slice(from, to)?))
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.map.ptr_eq(&other.map)
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.map.kind()
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.map.capabilities()
    }
}

impl<T: Eq> ArraySet<T> {
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.map.index_of_key(value)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|x| other.contains(x))
    }
}

impl<T> Default for ArraySet<T> {
    fn default() -> Self {
        Self::new(ArrayMap::default())
    }
}

impl<T> Clone for ArraySet<T> {
    fn clone(&self) -> Self {
        Self::new(self.map.clone())
    }
}

impl<T: Debug> Debug for ArraySet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq> PartialEq<Self> for ArraySet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Eq> Eq for ArraySet<T> {}

impl<T: Hash> Hash for ArraySet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, T> IntoIterator for &'a ArraySet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Len for ArraySet<T> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T> Empty for ArraySet<T> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}
