use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::hash::DefaultHasher;

use len_trait::{Empty, Len};

use crate::builder::{Hashed, ItemBuilder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::HashedMap;
use crate::sets::SetIter;
use crate::traits::unordered_hash;

/// An immutable set in insertion order that caches the hash of every element.
///
/// A lookup hashes the probe once and compares only the elements whose cached hash matches.
///
/// # Examples
///
/// ```
/// use packed_collections::HashedSet;
///
/// let set = HashedSet::try_from_iter(["red", "green", "blue"]).unwrap();
///
/// assert!(set.contains(&"blue"));
/// assert!(!set.contains(&"mauve"));
/// assert_eq!(Some(0), set.index_of(&"red"));
/// ```
pub struct HashedSet<T, BH = BuildHasherDefault<DefaultHasher>> {
    map: HashedMap<T, (), BH>,
}

impl<T> HashedSet<T, BuildHasherDefault<DefaultHasher>>
where
    T: Eq + Hash + Clone,
{
    #[must_use]
    pub fn builder() -> ItemBuilder<T, Hashed> {
        ItemBuilder::new(Hashed::new())
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

impl<T, BH> HashedSet<T, BH> {
    pub(crate) const fn new(map: HashedMap<T, (), BH>) -> Self {
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

    pub const fn hasher(&self) -> &BH {
        self.map.hasher()
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

impl<T, BH: Clone> HashedSet<T, BH> {
    /// The elements at positions `[from, to)`, sharing this set's storage and hash codes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(self.map.slice(from, to)?))
    }
}

impl<T, BH> HashedSet<T, BH>
where
    T: Eq + Hash,
    BH: BuildHasher,
{
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.map.index_of_key(value)
    }

    /// Returns a reference to the element equal to `value`, if any.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.get_by_index(self.index_of(value)?)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|x| other.contains(x))
    }
}

impl<T, BH: Default> Default for HashedSet<T, BH> {
    fn default() -> Self {
        Self::new(HashedMap::default())
    }
}

impl<T, BH: Clone> Clone for HashedSet<T, BH> {
    fn clone(&self) -> Self {
        Self::new(self.map.clone())
    }
}

impl<T: Debug, BH> Debug for HashedSet<T, BH> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, BH> PartialEq<Self> for HashedSet<T, BH>
where
    T: Eq + Hash,
    BH: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T, BH> Eq for HashedSet<T, BH>
where
    T: Eq + Hash,
    BH: BuildHasher,
{
}

impl<T: Hash, BH> Hash for HashedSet<T, BH> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, T, BH> IntoIterator for &'a HashedSet<T, BH> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, BH> Len for HashedSet<T, BH> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T, BH> Empty for HashedSet<T, BH> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}
