use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::ops::RangeBounds;

use len_trait::{Empty, Len};

use crate::builder::{ItemBuilder, Sorted};
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::kind::{Capabilities, Kind};
use crate::maps::SortedMap;
use crate::search::Probe;
use crate::sets::SetIter;
use crate::traits::unordered_hash;

/// An immutable set kept in comparator order.
///
/// Membership is a binary search, and sub-ranges are views over the same storage.
///
/// # Examples
///
/// ```
/// use packed_collections::SortedSet;
///
/// let set = SortedSet::try_from_iter([40, 10, 30, 20]).unwrap();
///
/// assert_eq!(&[10, 20, 30, 40], set.as_slice());
/// assert_eq!(Some(1), set.floor_index(&25));
/// assert_eq!(&[20, 30], set.sub(&20, &40).as_slice());
/// ```
pub struct SortedSet<T, C = NaturalOrder> {
    map: SortedMap<T, (), C>,
}

impl<T> SortedSet<T, NaturalOrder>
where
    T: Ord + Clone,
{
    #[must_use]
    pub const fn builder() -> ItemBuilder<T, Sorted> {
        ItemBuilder::new(Sorted::natural())
    }

    /// Builds a set from `items` in natural order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if an element repeats.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(items: I) -> Result<Self> {
        Self::builder().with_items(items).build()
    }
}

impl<T, C> SortedSet<T, C> {
    pub(crate) const fn new(map: SortedMap<T, (), C>) -> Self {
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
    pub fn first(&self) -> Option<&T> {
        Some(self.map.first()?.0)
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        Some(self.map.last()?.0)
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

    pub const fn comparator(&self) -> &C {
        self.map.comparator()
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

impl<T, C: Clone> SortedSet<T, C> {
    /// The elements at positions `[from, to)`, sharing this set's storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `from > to`, or
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if `to > len`.
    pub fn slice(&self, from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(self.map.slice(from, to)?))
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C> {
    #[must_use]
    pub fn search(&self, value: &T) -> Probe {
        self.map.search(value)
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.map.index_of_key(value)
    }

    #[must_use]
    pub fn floor_index(&self, value: &T) -> Option<usize> {
        self.map.floor_index(value)
    }

    #[must_use]
    pub fn ceiling_index(&self, value: &T) -> Option<usize> {
        self.map.ceiling_index(value)
    }

    #[must_use]
    pub fn lower_index(&self, value: &T) -> Option<usize> {
        self.map.lower_index(value)
    }

    #[must_use]
    pub fn higher_index(&self, value: &T) -> Option<usize> {
        self.map.higher_index(value)
    }

    /// The greatest element `<=` to `value`.
    #[must_use]
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.get_by_index(self.floor_index(value)?)
    }

    /// The least element `>=` to `value`.
    #[must_use]
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.get_by_index(self.ceiling_index(value)?)
    }

    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|x| other.contains(x))
    }
}

impl<T, C: Comparator<T> + Clone> SortedSet<T, C> {
    #[must_use]
    pub fn range<R: RangeBounds<T>>(&self, range: R) -> Self {
        Self::new(self.map.range(range))
    }

    #[must_use]
    pub fn head(&self, to: &T) -> Self {
        Self::new(self.map.head(to))
    }

    #[must_use]
    pub fn tail(&self, from: &T) -> Self {
        Self::new(self.map.tail(from))
    }

    #[must_use]
    pub fn sub(&self, from: &T, to: &T) -> Self {
        Self::new(self.map.sub(from, to))
    }
}

impl<T, C: Default> Default for SortedSet<T, C> {
    fn default() -> Self {
        Self::new(SortedMap::default())
    }
}

impl<T, C: Clone> Clone for SortedSet<T, C> {
    fn clone(&self) -> Self {
        Self::new(self.map.clone())
    }
}

impl<T: Debug, C> Debug for SortedSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Comparator<T>> PartialEq<Self> for SortedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T, C: Comparator<T>> Eq for SortedSet<T, C> {}

impl<T: Hash, C> Hash for SortedSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<'a, T, C> IntoIterator for &'a SortedSet<T, C> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> Len for SortedSet<T, C> {
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T, C> Empty for SortedSet<T, C> {
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Error;

    fn letters() -> SortedSet<char> {
        SortedSet::try_from_iter(['e', 'c', 'a', 'd', 'b']).unwrap()
    }

    #[test]
    fn elements_are_sorted() {
        let set = letters();
        assert_eq!(&['a', 'b', 'c', 'd', 'e'], set.as_slice());
        assert_eq!(Some(&'a'), set.first());
        assert_eq!(Some(&'e'), set.last());
        assert_eq!(Ok(&'c'), set.element_at(2));
    }

    #[test]
    fn key_ranges_follow_the_order() {
        let set = letters();
        assert_eq!(&['a', 'b'], set.head(&'c').as_slice());
        assert_eq!(&['c', 'd', 'e'], set.tail(&'c').as_slice());
        assert_eq!(&['b', 'c'], set.sub(&'b', &'d').as_slice());
        assert_eq!(&['b', 'c', 'd'], set.range('b'..='d').as_slice());
        assert!(set.range(..).ptr_eq(&set));
        assert!(set.sub(&'d', &'b').ptr_eq(&SortedSet::default()));
    }

    #[rstest]
    #[case('c', Some('c'), Some('c'))]
    #[case('0', None, Some('a'))]
    #[case('z', Some('e'), None)]
    fn floor_and_ceiling(
        #[case] probe: char,
        #[case] floor: Option<char>,
        #[case] ceiling: Option<char>,
    ) {
        let set = letters();
        assert_eq!(floor, set.floor(&probe).copied());
        assert_eq!(ceiling, set.ceiling(&probe).copied());
    }

    #[test]
    fn custom_comparator_reverses() {
        let recipe = Sorted::by(|a: &i32, b: &i32| b.cmp(a));
        let set = ItemBuilder::new(recipe)
            .with_items([1, 3, 2])
            .build()
            .unwrap();

        assert_eq!(&[3, 2, 1], set.as_slice());
        assert!(set.contains(&2));
        assert_eq!(&[2, 1], set.tail(&2).as_slice());
    }

    #[test]
    fn repeated_elements_are_rejected() {
        let result = SortedSet::try_from_iter([2, 1, 2]);
        assert_eq!(Err(Error::DuplicateKey), result);
    }

    #[test]
    fn equality_and_debug() {
        let a = SortedSet::try_from_iter([2, 1]).unwrap();
        let b = SortedSet::try_from_iter([1, 2]).unwrap();
        assert_eq!(a, b);
        assert_eq!("{1, 2}", format!("{a:?}"));
        assert_eq!(Kind::Sorted, a.kind());
        assert!(a.capabilities().sorted);
    }
}
