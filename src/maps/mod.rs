//! Map containers and the shared storage, iterators and views behind them.

pub use crate::maps::array_map::ArrayMap;
pub use crate::maps::hashed_map::HashedMap;
pub use crate::maps::iterators::{Iter, Keys, Values};
pub use crate::maps::property_map::PropertyMap;
pub use crate::maps::sorted_bi_map::{Inverse, SortedBiMap};
pub use crate::maps::sorted_map::SortedMap;
pub use crate::maps::views::{Entries, ValuesInOrder};

mod array_map;
mod bounds;
mod hashed_map;
mod iterators;
pub(crate) mod permutation;
mod property_map;
mod sorted_bi_map;
mod sorted_map;
pub(crate) mod table;
mod views;
