//! The steps shared by every recipe when turning buffered entries into a table.

use core::hash::Hash;
use std::collections::HashSet;

use crate::comparator::Comparator;
use crate::error::{Error, Result};
use crate::maps::permutation::ValueOrder;
use crate::maps::table::Table;

/// Fails with `error` if any two items are equal.
pub fn reject_repeats<T: Eq + Hash>(items: &[T], error: Error) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item) {
            return Err(error);
        }
    }

    Ok(())
}

/// Positions of `items` listed in ascending `comparator` order. Equal items keep their relative
/// order.
pub fn sort_order<T, C>(items: &[T], comparator: &C) -> Vec<usize>
where
    C: Comparator<T> + ?Sized,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|a, b| comparator.compare(&items[*a], &items[*b]));
    order
}

/// Fails with `error` if two neighbours in `order` compare equal.
pub fn reject_adjacent<T, C>(
    items: &[T],
    order: &[usize],
    comparator: &C,
    error: Error,
) -> Result<()>
where
    C: Comparator<T> + ?Sized,
{
    let repeated = order
        .windows(2)
        .any(|w| comparator.compare(&items[w[0]], &items[w[1]]).is_eq());

    if repeated {
        Err(error)
    } else {
        Ok(())
    }
}

pub fn permute<T: Clone>(items: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|x| items[*x].clone()).collect()
}

/// Copies the entries in insertion order after checking that no key repeats.
pub fn unsorted<K, V>(keys: &[K], values: &[V]) -> Result<Table<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    reject_repeats(keys, Error::DuplicateKey)?;
    Ok(Table::new(keys.to_vec(), values.to_vec()))
}

/// Same as [`unsorted`], and additionally no value may repeat.
pub fn unsorted_bi<K, V>(keys: &[K], values: &[V]) -> Result<Table<K, V>>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    let table = unsorted(keys, values)?;
    reject_repeats(values, Error::DuplicateValue)?;
    Ok(table)
}

/// Sorts the entries by key and rejects repeated keys.
pub fn sorted<K, V, C>(keys: &[K], values: &[V], comparator: &C) -> Result<Table<K, V>>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + ?Sized,
{
    let order = sort_order(keys, comparator);
    reject_adjacent(keys, &order, comparator, Error::DuplicateKey)?;

    Ok(Table::new(permute(keys, &order), permute(values, &order)))
}

/// Sorts the entries by key, then orders the sorted values into a permutation, rejecting
/// repeated keys and repeated values.
pub fn sorted_bi<K, V, KC, VC>(
    keys: &[K],
    values: &[V],
    key_comparator: &KC,
    value_comparator: &VC,
) -> Result<Table<K, V>>
where
    K: Clone,
    V: Clone,
    KC: Comparator<K> + ?Sized,
    VC: Comparator<V> + ?Sized,
{
    let table = sorted(keys, values, key_comparator)?;

    let order = sort_order(table.values(), value_comparator);
    reject_adjacent(
        table.values(),
        &order,
        value_comparator,
        Error::DuplicateValue,
    )?;

    Ok(table.with_value_order(ValueOrder::from_indices(&order)))
}

/// Sorts `values` by the key `key_of` computes for each of them, rejecting repeated keys.
///
/// The computed keys only live for the duration of the sort.
pub fn by_key<K, V, F, C>(values: &[V], key_of: &F, comparator: &C) -> Result<Table<(), V>>
where
    V: Clone,
    F: Fn(&V) -> K + ?Sized,
    C: Comparator<K> + ?Sized,
{
    let keys: Vec<K> = values.iter().map(key_of).collect();
    let order = sort_order(&keys, comparator);
    reject_adjacent(&keys, &order, comparator, Error::DuplicateKey)?;

    Ok(Table::new(vec![(); values.len()], permute(values, &order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{ByComparing, NaturalOrder};
    use crate::maps::table::Shared;

    #[test]
    fn reject_repeats_reports_the_given_error() {
        assert!(reject_repeats(&[1, 2, 3], Error::DuplicateKey).is_ok());
        assert_eq!(
            Err(Error::DuplicateValue),
            reject_repeats(&[1, 2, 1], Error::DuplicateValue)
        );
    }

    #[test]
    fn sort_order_is_stable() {
        let items = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let by_first = ByComparing::new(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(vec![1, 3, 0, 2], sort_order(&items, &by_first));
    }

    #[test]
    fn reject_adjacent_finds_equal_neighbours() {
        let items = [3, 1, 2, 1];
        let order = sort_order(&items, &NaturalOrder);
        assert_eq!(
            Err(Error::DuplicateKey),
            reject_adjacent(&items, &order, &NaturalOrder, Error::DuplicateKey)
        );

        let items = [3, 1, 2];
        let order = sort_order(&items, &NaturalOrder);
        let result = reject_adjacent(&items, &order, &NaturalOrder, Error::DuplicateKey);
        assert!(result.is_ok());
    }

    #[test]
    fn unsorted_keeps_insertion_order() {
        let table = unsorted(&["b", "a"], &[2, 1]).unwrap();
        assert_eq!(&["b", "a"], table.keys());
        assert_eq!(&[2, 1], table.values());
    }

    #[test]
    fn unsorted_checks_values_only_for_bi_maps() {
        assert!(unsorted(&["a", "b"], &[1, 1]).is_ok());
        assert_eq!(
            Err(Error::DuplicateValue),
            unsorted_bi(&["a", "b"], &[1, 1]).map(|_| ())
        );
        assert_eq!(
            Err(Error::DuplicateKey),
            unsorted_bi(&["a", "a"], &[1, 1]).map(|_| ())
        );
    }

    #[test]
    fn sorted_moves_values_with_their_keys() {
        let table = sorted(&["c", "a", "b"], &[3, 1, 2], &NaturalOrder).unwrap();
        assert_eq!(&["a", "b", "c"], table.keys());
        assert_eq!(&[1, 2, 3], table.values());
    }

    #[test]
    fn sorted_bi_builds_value_order() {
        let (keys, values) = (["a", "b", "c"], [30, 10, 20]);
        let table = sorted_bi(&keys, &values, &NaturalOrder, &NaturalOrder);
        let shared = Shared::new(table.unwrap());
        let order = shared.value_order().unwrap();
        assert_eq!(vec![1, 2, 0], order.iter().collect::<Vec<_>>());
        assert!(order.is_bijection());
    }

    #[test]
    fn sorted_bi_rejects_repeated_values() {
        let result = sorted_bi(&["a", "b"], &[1, 1], &NaturalOrder, &NaturalOrder);
        assert_eq!(Err(Error::DuplicateValue), result.map(|_| ()));
    }

    #[test]
    fn by_key_sorts_values_by_computed_key() {
        let table = by_key(&["ccc", "a", "bb"], &|s: &&str| s.len(), &NaturalOrder).unwrap();
        assert_eq!(&["a", "bb", "ccc"], table.values());

        let result = by_key(&["x", "y"], &|s: &&str| s.len(), &NaturalOrder);
        assert_eq!(Err(Error::DuplicateKey), result.map(|_| ()));
    }
}
