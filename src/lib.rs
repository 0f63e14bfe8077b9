//! Immutable array-backed maps, sets and bi-maps.
//!
//! Every container is baked once by a builder and never changes afterwards. Entries live in
//! flat, reference-counted columns, so containers are cheap to clone, safe to share across
//! threads, and can be sliced into sub-containers that reuse the same storage.
//!
//! The layout is chosen up front by a recipe:
//!
//! - [`Unsorted`] keeps insertion order and scans linearly ([`ArrayMap`], [`ArraySet`]).
//! - [`Hashed`] also caches the hash of every key and value ([`HashedMap`], [`HashedSet`]).
//! - [`Sorted`] sorts by key for binary search and range slicing ([`SortedMap`], [`SortedSet`]).
//! - [`SortedBi`] adds a value-order permutation so values are binary searched too
//!   ([`SortedBiMap`]).
//! - [`ByKeyMethod`] stores only values and computes each key from its value ([`PropertyMap`]).
//!
//! # Examples
//!
//! ```
//! use packed_collections::{MapBuilder, SortedBi};
//!
//! let map = MapBuilder::new(SortedBi::natural())
//!     .with("c", "5")
//!     .with("a", "7")
//!     .with("b", "96")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(&["a", "b", "c"], map.key_slice());
//! assert_eq!(map.index_of_key(&"b"), map.index_of_value(&"96"));
//!
//! let head = map.head(&"c");
//! assert_eq!(2, head.len());
//! assert_eq!(Some(&"a"), head.get_key(&"7"));
//! ```
//!
//! # Features
//!
//! - `rayon` adds `par_iter` to every container.

pub use crate::builder::{
    ByKeyMethod, Hashed, ItemBuilder, ItemRecipe, MapBuilder, Recipe, Sorted, SortedBi, Unsorted,
    UnsortedBi,
};
pub use crate::comparator::{nulls_first, ByComparing, Comparator, NaturalOrder, NullsFirst};
pub use crate::error::{Error, Result};
pub use crate::kind::{Capabilities, Kind};
pub use crate::maps::{
    ArrayMap, Entries, HashedMap, Inverse, Iter, Keys, PropertyMap, SortedBiMap, SortedMap, Values,
    ValuesInOrder,
};
pub use crate::sets::{ArraySet, HashedSet, SetIter, SortedSet};
pub use crate::traits::IndexedMap;

mod builder;
mod comparator;
mod error;
mod kind;
mod maps;
pub mod search;
mod sets;
mod traits;
