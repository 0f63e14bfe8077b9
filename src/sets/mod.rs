//! Sets: maps whose values are all `()`, addressed by element.

pub use crate::sets::array_set::ArraySet;
pub use crate::sets::hashed_set::HashedSet;
pub use crate::sets::iterators::SetIter;
pub use crate::sets::sorted_set::SortedSet;

mod array_set;
mod hashed_set;
mod iterators;
mod sorted_set;
