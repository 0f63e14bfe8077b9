//! Binary search over anything that can be read by index.
//!
//! The source is an abstract `index -> element` function rather than a slice, so the same
//! routine searches a key column, a builder's buffer, keys computed from values, or values
//! visited through a permutation.

use core::borrow::Borrow;
use core::cmp::Ordering;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{Error, Result};

/// The outcome of a binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    /// An element equal to the key lives at this index.
    Found(usize),

    /// No element matched; inserting the key here would keep the range sorted.
    Absent { insertion_point: usize },
}

impl Probe {
    /// Returns the matching index, if any.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::Absent { .. } => None,
        }
    }

    /// Returns the index of the match, or where the key would be inserted.
    #[must_use]
    pub const fn insertion_point(self) -> usize {
        match self {
            Self::Found(index) => index,
            Self::Absent { insertion_point } => insertion_point,
        }
    }

    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Encodes the probe as `index` when found and `-(insertion_point) - 1` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_collections::search::Probe;
    ///
    /// assert_eq!(3, Probe::Found(3).encoded());
    /// assert_eq!(-1, Probe::Absent { insertion_point: 0 }.encoded());
    /// assert_eq!(-5, Probe::Absent { insertion_point: 4 }.encoded());
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn encoded(self) -> isize {
        match self {
            Self::Found(index) => index as isize,
            Self::Absent { insertion_point } => -(insertion_point as isize) - 1,
        }
    }
}

/// Searches `[from, to)` of the virtual array `get` for `key` using the natural order.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] when `from > to`; no element is read in that case.
///
/// # Examples
///
/// ```
/// use packed_collections::search::{binary_search, Probe};
///
/// let squares = |i: usize| i * i;
/// assert_eq!(Probe::Found(4), binary_search(0, 10, &16, squares).unwrap());
/// assert_eq!(Probe::Absent { insertion_point: 5 }, binary_search(0, 10, &17, squares).unwrap());
/// ```
pub fn binary_search<T, B, F>(from: usize, to: usize, key: &T, get: F) -> Result<Probe>
where
    T: Ord + ?Sized,
    B: Borrow<T>,
    F: FnMut(usize) -> B,
{
    binary_search_by(from, to, key, get, &NaturalOrder)
}

/// Searches `[from, to)` of the virtual array `get` for `key` using `comparator`.
///
/// The range must already be sorted by `comparator`. When several elements compare equal to
/// the key, which of them is reported is unspecified.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] when `from > to`; no element is read in that case.
pub fn binary_search_by<T, B, F, C>(
    from: usize,
    to: usize,
    key: &T,
    get: F,
    comparator: &C,
) -> Result<Probe>
where
    T: ?Sized,
    B: Borrow<T>,
    F: FnMut(usize) -> B,
    C: Comparator<T> + ?Sized,
{
    if from > to {
        return Err(Error::InvalidRange { from, to });
    }

    Ok(probe(from, to, key, get, comparator))
}

/// Same as [`binary_search_by`] for callers that already hold a valid range.
pub(crate) fn probe<T, B, F, C>(
    from: usize,
    to: usize,
    key: &T,
    mut get: F,
    comparator: &C,
) -> Probe
where
    T: ?Sized,
    B: Borrow<T>,
    F: FnMut(usize) -> B,
    C: Comparator<T> + ?Sized,
{
    debug_assert!(from <= to);

    let mut low = from;
    let mut high = to;
    while low < high {
        let mid = low + ((high - low) >> 1);
        let candidate = get(mid);
        match comparator.compare(candidate.borrow(), key) {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Probe::Found(mid),
        }
    }

    Probe::Absent {
        insertion_point: low,
    }
}
