use core::fmt::{Debug, Formatter, Result};

use bitvec::prelude::*;
use num_traits::PrimInt;

/// Positions of a table's entries listed in some secondary order, stored in `S`-sized slots.
pub struct Permutation<S: PrimInt> {
    slots: Box<[S]>,
}

impl<S: PrimInt> Permutation<S> {
    fn new(indices: &[usize]) -> Self {
        Self {
            slots: indices.iter().map(|x| S::from(*x).unwrap()).collect(),
        }
    }

    #[inline]
    fn get(&self, rank: usize) -> usize {
        self.slots[rank].to_usize().unwrap()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

/// The value-order permutation of a sorted bi-map.
///
/// `get(j)` is the position of the entry holding the j-th smallest value. The slot width is
/// picked from the number of entries, the same way hash slots are sized.
pub enum ValueOrder {
    Small(Permutation<u8>),
    Medium(Permutation<u16>),
    Large(Permutation<usize>),
}

impl ValueOrder {
    pub fn from_indices(indices: &[usize]) -> Self {
        if indices.len() <= usize::from(u8::MAX) {
            Self::Small(Permutation::new(indices))
        } else if indices.len() <= usize::from(u16::MAX) {
            Self::Medium(Permutation::new(indices))
        } else {
            Self::Large(Permutation::new(indices))
        }
    }

    #[inline]
    pub fn get(&self, rank: usize) -> usize {
        match self {
            Self::Small(p) => p.get(rank),
            Self::Medium(p) => p.get(rank),
            Self::Large(p) => p.get(rank),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Small(p) => p.len(),
            Self::Medium(p) => p.len(),
            Self::Large(p) => p.len(),
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        (0..self.len()).map(|rank| self.get(rank))
    }

    /// Keeps the entries whose position lies in `[from, to)`, renumbered from zero.
    ///
    /// Survivors keep their relative order, so the result is the value order of the window
    /// without sorting again.
    ///
    /// # Panics
    ///
    /// Panics if the window does not contain exactly `to - from` entries, which means the
    /// permutation was corrupt.
    pub fn restrict(&self, from: usize, to: usize) -> Self {
        let kept: Vec<usize> = self
            .iter()
            .filter(|index| (from..to).contains(index))
            .map(|index| index - from)
            .collect();

        assert_eq!(
            to - from,
            kept.len(),
            "value order lost entries while slicing {from}..{to}"
        );

        Self::from_indices(&kept)
    }

    /// Returns `true` if every position in `[0, len)` occurs exactly once.
    pub fn is_bijection(&self) -> bool {
        let mut seen: BitVec = BitVec::repeat(false, self.len());
        for index in self.iter() {
            if index >= seen.len() || seen[index] {
                return false;
            }

            seen.set(index, true);
        }

        true
    }
}

impl Debug for ValueOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
