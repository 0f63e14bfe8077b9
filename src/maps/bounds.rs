//! Turning key probes into positions for navigation and range slicing.

use core::ops::{Bound, RangeBounds};

use crate::search::Probe;

/// Greatest position whose key is `<=` the probed key.
pub const fn floor(probe: Probe) -> Option<usize> {
    match probe {
        Probe::Found(index) => Some(index),
        Probe::Absent { insertion_point } => insertion_point.checked_sub(1),
    }
}

/// Least position whose key is `>=` the probed key.
pub const fn ceiling(probe: Probe, len: usize) -> Option<usize> {
    let index = probe.insertion_point();
    if index < len {
        Some(index)
    } else {
        None
    }
}

/// Greatest position whose key is `<` the probed key.
pub const fn lower(probe: Probe) -> Option<usize> {
    probe.insertion_point().checked_sub(1)
}

/// Least position whose key is `>` the probed key.
pub const fn higher(probe: Probe, len: usize) -> Option<usize> {
    let index = match probe {
        Probe::Found(index) => index + 1,
        Probe::Absent { insertion_point } => insertion_point,
    };

    if index < len {
        Some(index)
    } else {
        None
    }
}

/// Resolves a key range to a position window `[from, to)` using `search` to locate each bound.
///
/// A range whose start lies past its end resolves to an empty window.
pub fn resolve<K, R, S>(range: &R, len: usize, mut search: S) -> (usize, usize)
where
    R: RangeBounds<K> + ?Sized,
    K: ?Sized,
    S: FnMut(&K) -> Probe,
{
    let from = match range.start_bound() {
        Bound::Included(key) => search(key).insertion_point(),
        Bound::Excluded(key) => match search(key) {
            Probe::Found(index) => index + 1,
            Probe::Absent { insertion_point } => insertion_point,
        },
        Bound::Unbounded => 0,
    };

    let to = match range.end_bound() {
        Bound::Included(key) => match search(key) {
            Probe::Found(index) => index + 1,
            Probe::Absent { insertion_point } => insertion_point,
        },
        Bound::Excluded(key) => search(key).insertion_point(),
        Bound::Unbounded => len,
    };

    (from.min(len), to.max(from).min(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::binary_search;

    const KEYS: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

    fn probe(key: &char) -> Probe {
        binary_search(0, KEYS.len(), key, |i| KEYS[i]).unwrap()
    }

    #[test]
    fn navigation_on_present_keys() {
        assert_eq!(Some(2), floor(probe(&'c')));
        assert_eq!(Some(2), ceiling(probe(&'c'), 5));
        assert_eq!(Some(1), lower(probe(&'c')));
        assert_eq!(Some(3), higher(probe(&'c'), 5));
    }

    #[test]
    fn navigation_at_the_edges() {
        assert_eq!(None, lower(probe(&'a')));
        assert_eq!(None, higher(probe(&'e'), 5));
        assert_eq!(None, floor(probe(&'0')));
        assert_eq!(None, ceiling(probe(&'z'), 5));
        assert_eq!(Some(4), floor(probe(&'z')));
        assert_eq!(Some(0), ceiling(probe(&'0'), 5));
    }

    #[test]
    fn resolve_follows_bound_kinds() {
        assert_eq!((0, 2), resolve(&(..'c'), 5, probe));
        assert_eq!((2, 5), resolve(&('c'..), 5, probe));
        assert_eq!((1, 3), resolve(&('b'..'d'), 5, probe));
        assert_eq!((1, 4), resolve(&('b'..='d'), 5, probe));
        assert_eq!((0, 5), resolve(&(..), 5, probe));
        assert_eq!(
            (2, 4),
            resolve(&(Bound::Excluded('b'), Bound::Excluded('e')), 5, probe)
        );
    }

    #[test]
    fn resolve_collapses_inverted_ranges() {
        let (from, to) = resolve(&('d'..'b'), 5, probe);
        assert_eq!(from, to);
    }
}
