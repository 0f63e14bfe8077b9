use core::fmt::{Display, Formatter, Result};

/// The storage and search strategy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Entries in insertion order, searched by linear scan.
    Unsorted,

    /// Entries in insertion order with cached key and value hashes for fast rejection.
    Hashed,

    /// Entries sorted by key, searched by binary search.
    Sorted,

    /// Entries sorted by key plus a value-order permutation, binary searched both ways.
    SortedBi,

    /// Values sorted by a key computed from each value.
    Property,
}

/// What a container's bake performed and what its read path can rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Values are unique, so every value identifies exactly one entry.
    pub bi_map: bool,

    /// A hash code is cached for every key and value.
    pub hash_cache: bool,

    /// Entries are ordered by key and keys can be binary searched.
    pub sorted: bool,

    /// A value-order permutation exists and values can be binary searched.
    pub value_order: bool,
}

impl Kind {
    /// The capabilities every container of this kind has.
    ///
    /// Unsorted and hashed containers may additionally be bi-maps; see
    /// [`Capabilities::with_bi_map`].
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Unsorted => Capabilities {
                bi_map: false,
                hash_cache: false,
                sorted: false,
                value_order: false,
            },
            Self::Hashed => Capabilities {
                bi_map: false,
                hash_cache: true,
                sorted: false,
                value_order: false,
            },
            Self::Sorted | Self::Property => Capabilities {
                bi_map: false,
                hash_cache: false,
                sorted: true,
                value_order: false,
            },
            Self::SortedBi => Capabilities {
                bi_map: true,
                hash_cache: false,
                sorted: true,
                value_order: true,
            },
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Unsorted => "unsorted",
            Self::Hashed => "hashed",
            Self::Sorted => "sorted",
            Self::SortedBi => "sorted bi-map",
            Self::Property => "property-keyed",
        };

        f.write_str(name)
    }
}

impl Capabilities {
    #[must_use]
    pub const fn with_bi_map(mut self, bi_map: bool) -> Self {
        self.bi_map = self.bi_map || bi_map;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sorted_bi_maps_have_value_order() {
        for kind in [Kind::Unsorted, Kind::Hashed, Kind::Sorted, Kind::Property] {
            assert!(!kind.capabilities().value_order);
        }

        let caps = Kind::SortedBi.capabilities();
        assert!(caps.value_order);
        assert!(caps.bi_map);
        assert!(caps.sorted);
    }

    #[test]
    fn only_hashed_caches_hash_codes() {
        assert!(Kind::Hashed.capabilities().hash_cache);
        assert!(!Kind::Unsorted.capabilities().with_bi_map(true).hash_cache);
    }

    #[test]
    fn with_bi_map_never_clears_the_flag() {
        assert!(Kind::Unsorted.capabilities().with_bi_map(true).bi_map);
        assert!(Kind::SortedBi.capabilities().with_bi_map(false).bi_map);
    }

    #[test]
    fn display_names_the_kind() {
        assert_eq!("sorted bi-map", Kind::SortedBi.to_string());
        assert_eq!("hashed", Kind::Hashed.to_string());
    }
}
