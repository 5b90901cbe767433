//! Constructors for list handles.
//!
//! | Constructor | Result | Evaluation |
//! |---|---|---|
//! | [`List::from_vec`], `From<Vec<T>>`, `From<[T; N]>` | `List` | concrete |
//! | `FromIterator` | `List` | collected once (iterators are single-pass) |
//! | [`List::from_fn`] | `List` | generator invoked once per pass |
//! | [`List::wrap`] | `List` | one-item sequence |
//! | [`List::unfold`] | `List` | unfolded eagerly at construction |
//! | [`List::empty`], [`List::just`], [`List::repeat`] | `OrderedList` | trivially sorted |
//! | [`List::ordered`] | `OrderedList` | caller-declared order, not re-sorted |
//!
//! A list of zero or one item, or of one item repeated, is sorted under any
//! criterion, so the trivially sorted constructors return ordered handles
//! and `then_by` can be chained on them directly.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::prelude::*;
//!
//! let countdown = List::unfold(|n: u32| (n > 0).then(|| (n, n - 1)), 3);
//! assert_eq!(countdown.to_vec(), vec![3, 2, 1]);
//!
//! let squares = List::from_fn(|| (1..=4).map(|n| n * n));
//! assert_eq!(squares.to_vec(), vec![1, 4, 9, 16]);
//!
//! assert_eq!(List::repeat('x', 3).to_vec(), vec!['x', 'x', 'x']);
//! assert!(List::<i32>::empty().is_empty());
//! ```

use std::rc::Rc;

use crate::list::{List, OrderedList};
use crate::sequence::{Generator, IntoSource, Source};
use crate::sort::{KeySpec, SortSpec, SortSpecs};

impl<T> List<T> {
    /// Wraps a vector.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_source(Source::Items(Rc::from(items)))
    }

    /// Wraps a single value as a one-item list.
    pub fn wrap(value: T) -> Self {
        Self::from_vec(vec![value])
    }

    /// Wraps a generator function, invoked once per evaluation pass.
    pub fn from_fn<F, I>(generate: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_producer(Generator::new(generate))
    }

    /// Builds a list by applying `step` to a seed until it returns `None`.
    ///
    /// Each `Some((item, next_seed))` contributes `item`. The whole sequence
    /// is produced at construction, so `step` must eventually return `None`.
    pub fn unfold<S, F>(mut step: F, seed: S) -> Self
    where
        F: FnMut(S) -> Option<(T, S)>,
    {
        let mut items = Vec::new();
        let mut state = seed;
        while let Some((item, next)) = step(state) {
            items.push(item);
            state = next;
        }
        Self::from_vec(items)
    }

    /// The empty list, as an ordered handle.
    pub fn empty() -> OrderedList<T>
    where
        T: 'static,
    {
        OrderedList::presorted(Source::Items(Rc::from(Vec::new())), trivial_specs())
    }

    /// A one-item list, as an ordered handle.
    pub fn just(value: T) -> OrderedList<T>
    where
        T: 'static,
    {
        OrderedList::presorted(Source::Items(Rc::from(vec![value])), trivial_specs())
    }
}

impl<T: Clone + 'static> List<T> {
    /// `value` repeated `count` times, as an ordered handle.
    ///
    /// The items are produced on demand.
    pub fn repeat(value: T, count: usize) -> OrderedList<T> {
        let source =
            Source::deferred(Generator::new(move || std::iter::repeat_n(value.clone(), count)));
        OrderedList::presorted(source, trivial_specs())
    }

    /// Declares `source` as already sorted ascending by `key_selector`.
    ///
    /// Nothing is re-sorted. `then_by` on the result sorts the source by both
    /// criteria, and [`OrderedList::binary_contains`] trusts the declared
    /// order.
    pub fn ordered<S, K, F>(source: S, key_selector: F) -> OrderedList<T>
    where
        S: IntoSource<T>,
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let mut specs = SortSpecs::new();
        specs.push(KeySpec::ascending(key_selector).into_sort_spec());
        OrderedList::presorted(source.into_source(), specs)
    }
}

fn trivial_specs<T: 'static>() -> SortSpecs<T> {
    let mut specs = SortSpecs::new();
    specs.push(SortSpec::trivial());
    specs
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_source(items.into_source())
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Queryable;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn wrap_makes_a_singleton() {
        assert_eq!(List::wrap(7).to_vec(), vec![7]);
    }

    #[rstest]
    fn from_iterator_collects_once() {
        let list: List<i32> = (1..=3).collect();
        assert!(list.is_evaluated());
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn from_fn_reruns_generator_each_pass() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let list = List::from_fn(move || {
            counter.set(counter.get() + 1);
            vec![1, 2]
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(list.count(), 2);
        assert_eq!(list.count(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn unfold_stops_at_none() {
        let powers = List::unfold(|power: u32| (power <= 16).then_some((power, power * 2)), 1);
        assert_eq!(powers.to_vec(), vec![1, 2, 4, 8, 16]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(2, vec!["hi", "hi"])]
    fn repeat_yields_count_copies(#[case] count: usize, #[case] expected: Vec<&str>) {
        assert_eq!(List::repeat("hi", count).to_vec(), expected);
    }

    #[rstest]
    fn trivially_sorted_handles_accept_then_by() {
        let just = List::just(4).then_by(|number| *number);
        assert_eq!(just.to_vec(), vec![4]);
        assert_eq!(just.applied_sorts().len(), 2);
        assert!(just.applied_sorts()[0].is_trivial());

        let empty: OrderedList<i32> = List::empty();
        assert!(empty.then_by_descending(|number| *number).is_empty());
    }

    #[rstest]
    fn ordered_trusts_the_declared_order() {
        let declared = List::ordered(vec![1, 3, 5, 7], |number: &i32| *number);
        assert!(declared.binary_contains(&5));
        assert!(!declared.binary_contains(&4));
        assert_eq!(declared.to_vec(), vec![1, 3, 5, 7]);
    }

    #[rstest]
    fn arrays_convert_to_lists() {
        assert_eq!(List::from([1, 2]).to_vec(), vec![1, 2]);
    }
}
