//! Default comparers and predicates.
//!
//! Every operator that accepts a comparer or a predicate has a variant that
//! omits it; those variants fall back to the functions in this module:
//!
//! - [`default_equality`]: value equality (`==`), used by `distinct`, `union`,
//!   `except`, `intersect`, `contains`, `equals` and the join key comparisons
//! - [`default_ordering`]: the generic value comparer used by the sort and
//!   group engines
//! - [`default_predicate`]: the constant `true` predicate, "match everything"
//!
//! None of them panic. `default_ordering` turns the partial order of floats
//! into a total one: values that are not comparable with themselves (`NaN`)
//! sort after every other value and tie with each other, so sorting and
//! grouping on such keys is well defined.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::comparer::{default_equality, default_ordering, default_predicate};
//! use std::cmp::Ordering;
//!
//! assert!(default_equality(&1, &1));
//! assert_eq!(default_ordering(&1.5, &f64::NAN), Ordering::Less);
//! assert_eq!(default_ordering(&f64::NAN, &f64::NAN), Ordering::Equal);
//! assert!(default_predicate(&"anything"));
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

/// A shared key selector: extracts a key of type `K` from an item.
pub type Selector<T, K> = Rc<dyn Fn(&T) -> K>;

/// A shared equality comparer.
pub type EqualityComparer<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// A shared ordering comparer.
pub type OrderingComparer<K> = Rc<dyn Fn(&K, &K) -> Ordering>;

/// A shared predicate.
pub type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

/// Value equality.
#[inline]
pub fn default_equality<T: PartialEq + ?Sized>(left: &T, right: &T) -> bool {
    left == right
}

/// The generic value comparer.
///
/// Uses [`PartialOrd`] where it is defined. When it is not, a value that is
/// incomparable with itself (such as `NaN`) ranks after one that is, and two
/// such values are equal. Remaining undefined pairs compare as equal.
///
/// # Examples
///
/// ```rust
/// use lazy_query::comparer::default_ordering;
/// use std::cmp::Ordering;
///
/// assert_eq!(default_ordering(&1, &2), Ordering::Less);
/// assert_eq!(default_ordering(&"b", &"a"), Ordering::Greater);
/// assert_eq!(default_ordering(&f64::NAN, &-1.0), Ordering::Greater);
/// ```
#[inline]
pub fn default_ordering<K: PartialOrd + ?Sized>(left: &K, right: &K) -> Ordering {
    left.partial_cmp(right).unwrap_or_else(|| {
        let left_ordered = left.partial_cmp(left).is_some();
        let right_ordered = right.partial_cmp(right).is_some();
        match (left_ordered, right_ordered) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    })
}

/// The predicate that accepts every item.
#[inline]
pub const fn default_predicate<T: ?Sized>(_item: &T) -> bool {
    true
}

/// Wraps [`default_equality`] as a shared comparer.
pub fn equality<T: PartialEq + 'static>() -> EqualityComparer<T> {
    Rc::new(default_equality::<T>)
}

/// Wraps [`default_ordering`] as a shared comparer.
pub fn ordering<K: PartialOrd + 'static>() -> OrderingComparer<K> {
    Rc::new(default_ordering::<K>)
}
