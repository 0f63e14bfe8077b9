use core::cmp::Ordering;
use core::fmt::{Debug, Formatter, Result};

/// A total order over `T`, used to sort keys or values while baking and to search them afterwards.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` when this comparator is the type's natural order.
    fn is_natural(&self) -> bool {
        false
    }
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    fn is_natural(&self) -> bool {
        true
    }
}

impl Debug for NaturalOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("NaturalOrder")
    }
}

/// Orders elements with a user-supplied function.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use packed_collections::{ByComparing, Comparator};
///
/// let by_len = ByComparing::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert_eq!(Ordering::Less, by_len.compare(&"ab", &"abc"));
/// ```
#[derive(Clone, Copy)]
pub struct ByComparing<F> {
    f: F,
}

impl<F> ByComparing<F> {
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T: ?Sized, F> Comparator<T> for ByComparing<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.f)(a, b)
    }
}

impl<F> Debug for ByComparing<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str("ByComparing")
    }
}

/// Lifts a comparator over `T` to `Option<T>`, placing `None` before every `Some`.
#[derive(Clone, Copy, Default)]
pub struct NullsFirst<C> {
    inner: C,
}

impl<C> NullsFirst<C> {
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<T, C: Comparator<T>> Comparator<Option<T>> for NullsFirst<C> {
    fn compare(&self, a: &Option<T>, b: &Option<T>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => self.inner.compare(a, b),
        }
    }

    fn is_natural(&self) -> bool {
        self.inner.is_natural()
    }
}

impl<C: Debug> Debug for NullsFirst<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_tuple("NullsFirst").field(&self.inner).finish()
    }
}

/// Wraps `comparator` so that absent elements sort before present ones.
pub const fn nulls_first<C>(comparator: C) -> NullsFirst<C> {
    NullsFirst::new(comparator)
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use super::*;

    #[test]
    fn natural_order_follows_ord() {
        assert_eq!(Ordering::Less, NaturalOrder.compare(&1, &2));
        assert_eq!(Ordering::Equal, NaturalOrder.compare("a", "a"));
        assert!(Comparator::<i32>::is_natural(&NaturalOrder));
    }

    #[test]
    fn by_comparing_uses_the_function() {
        let reverse = ByComparing::new(|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(Ordering::Greater, reverse.compare(&1, &2));
        assert!(!Comparator::<i32>::is_natural(&reverse));
    }

    #[test]
    fn nulls_first_places_none_before_some() {
        let reverse = nulls_first(ByComparing::new(|a: &i32, b: &i32| b.cmp(a)));
        assert_eq!(Ordering::Less, reverse.compare(&None, &Some(i32::MIN)));
        assert_eq!(Ordering::Greater, reverse.compare(&Some(0), &None));
        assert_eq!(Ordering::Equal, reverse.compare(&None, &None));
        assert_eq!(Ordering::Less, reverse.compare(&Some(5), &Some(1)));
    }

    #[test]
    fn nulls_first_sorts_a_vec() {
        let cmp = nulls_first(NaturalOrder);
        let mut v = vec![Some(3), None, Some(1)];
        v.sort_by(|a, b| cmp.compare(a, b));
        assert_eq!(vec![None, Some(1), Some(3)], v);
    }
}
