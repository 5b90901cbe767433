//! Sorted list handles.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::{List, Queryable};
use crate::sequence::Source;
use crate::sort::{compare_by_specs, KeySpec, SortDirection, SortSpec, SortSpecs, Sorted};

/// A list known to be sorted by its [`applied_sorts`](OrderedList::applied_sorts).
///
/// Produced by the `sort_by` family and by the trivially sorted factory
/// constructors. `then_by` returns a new handle that sorts the same base
/// source by the parent's specs plus one more; the parent is left untouched.
///
/// # Examples
///
/// ```rust
/// use lazy_query::prelude::*;
///
/// let people = List::from(vec![("bob", 30), ("alice", 25), ("carol", 30)]);
/// let ordered = people
///     .sort_by_descending(|person| person.1)
///     .then_by(|person| person.0);
///
/// assert_eq!(ordered.applied_sorts().len(), 2);
/// assert_eq!(
///     ordered.to_vec(),
///     vec![("bob", 30), ("carol", 30), ("alice", 25)]
/// );
/// ```
pub struct OrderedList<T> {
    list: List<T>,
    base: Source<T>,
    applied_sorts: Rc<SortSpecs<T>>,
}

impl<T> OrderedList<T> {
    /// The sort specs, highest priority first.
    #[inline]
    pub fn applied_sorts(&self) -> &[SortSpec<T>] {
        &self.applied_sorts
    }

    /// Returns the handle as a plain list.
    #[inline]
    pub const fn list(&self) -> &List<T> {
        &self.list
    }

    /// Drops the ordering information.
    #[inline]
    pub fn into_list(self) -> List<T> {
        self.list
    }

    /// Wraps a source that is already sorted by `specs`; it is not re-sorted.
    pub(crate) fn presorted(base: Source<T>, specs: SortSpecs<T>) -> Self {
        Self {
            list: List::from_source(base.clone()),
            base,
            applied_sorts: Rc::new(specs),
        }
    }
}

impl<T: Clone + 'static> OrderedList<T> {
    /// A deferred sort of `base` by `specs`.
    pub(crate) fn sorted(base: Source<T>, specs: SortSpecs<T>) -> Self {
        let applied_sorts = Rc::new(specs);
        Self {
            list: List::from_producer(Sorted::new(base.clone(), Rc::clone(&applied_sorts))),
            base,
            applied_sorts,
        }
    }

    /// Adds an ascending tie-breaker, using the generic value comparer.
    pub fn then_by<K, S>(&self, key_selector: S) -> Self
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.then_by_spec(KeySpec::ascending(key_selector))
    }

    /// Adds a descending tie-breaker, using the generic value comparer.
    pub fn then_by_descending<K, S>(&self, key_selector: S) -> Self
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.then_by_spec(KeySpec::descending(key_selector))
    }

    /// Adds an ascending tie-breaker under a custom comparer.
    pub fn then_by_with<K, S, C>(&self, key_selector: S, comparer: C) -> Self
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.then_by_spec(KeySpec::new(key_selector, comparer, SortDirection::Ascending))
    }

    /// Adds a descending tie-breaker under a custom comparer.
    pub fn then_by_descending_with<K, S, C>(&self, key_selector: S, comparer: C) -> Self
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.then_by_spec(KeySpec::new(key_selector, comparer, SortDirection::Descending))
    }

    /// Adds an explicit tie-breaker.
    pub fn then_by_spec<K: 'static>(&self, spec: KeySpec<T, K>) -> Self {
        let mut specs = (*self.applied_sorts).clone();
        specs.push(spec.into_sort_spec());
        Self::sorted(self.base.clone(), specs)
    }

    /// Membership test that exploits the ordering.
    ///
    /// Binary-searches for the run of items whose sort keys equal those of
    /// `item`, then checks that run for an equal item. Trivial specs carry no
    /// ordering and are ignored; when no other spec is left the search falls
    /// back to a linear scan. Either way the list is fully evaluated once.
    ///
    /// The result is only meaningful when the handle really is sorted by its
    /// specs, which holds for every handle this crate builds, and for
    /// [`List::ordered`] when the caller's claim is true.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let sorted = List::from(vec![9, 4, 7, 1]).sort_by(|number| *number);
    /// assert!(sorted.binary_contains(&7));
    /// assert!(!sorted.binary_contains(&5));
    /// ```
    pub fn binary_contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let items = self.list.source.drain();
        let specs: SortSpecs<T> = self
            .applied_sorts
            .iter()
            .filter(|spec| !spec.is_trivial())
            .cloned()
            .collect();
        if specs.is_empty() {
            return items.contains(item);
        }
        let start = items.partition_point(|candidate| compare_by_specs(&specs, candidate, item).is_lt());
        items[start..]
            .iter()
            .take_while(|candidate| compare_by_specs(&specs, candidate, item).is_eq())
            .any(|candidate| candidate == item)
    }
}

impl<T: Clone + 'static> Queryable<T> for OrderedList<T> {
    #[inline]
    fn as_list(&self) -> &List<T> {
        &self.list
    }
}

impl<T> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            base: self.base.clone(),
            applied_sorts: Rc::clone(&self.applied_sorts),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OrderedList")
            .field("base", &self.base)
            .field("applied_sorts", &self.applied_sorts)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Display + Clone + 'static> fmt::Display for OrderedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, formatter)
    }
}

impl<T> From<OrderedList<T>> for List<T> {
    fn from(ordered: OrderedList<T>) -> Self {
        ordered.into_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Track {
        artist: &'static str,
        title: &'static str,
        plays: u32,
    }

    fn tracks() -> List<Track> {
        List::from(vec![
            Track { artist: "b", title: "y", plays: 3 },
            Track { artist: "a", title: "z", plays: 5 },
            Track { artist: "b", title: "x", plays: 5 },
            Track { artist: "a", title: "w", plays: 1 },
        ])
    }

    fn titles<Q: Queryable<Track>>(list: &Q) -> Vec<&'static str> {
        list.map(|track| track.title).to_vec()
    }

    #[rstest]
    fn sort_by_then_by_composes_keys() {
        let ordered = tracks()
            .sort_by(|track| track.artist)
            .then_by_descending(|track| track.plays);
        assert_eq!(titles(&ordered), vec!["z", "w", "x", "y"]);
    }

    #[rstest]
    fn display_shows_the_sorted_items() {
        let ordered = List::from(vec![3, 1, 2]).sort_by(|number: &i32| *number);
        assert_eq!(ordered.to_string(), "List(1, 2, 3)");
    }

    #[rstest]
    fn then_by_does_not_change_parent() {
        let parent = tracks().sort_by(|track| track.artist);
        let child = parent.then_by(|track| track.title);
        assert_eq!(parent.applied_sorts().len(), 1);
        assert_eq!(child.applied_sorts().len(), 2);
        assert_eq!(titles(&parent), vec!["z", "w", "y", "x"]);
        assert_eq!(titles(&child), vec!["w", "z", "x", "y"]);
    }

    #[rstest]
    fn then_by_with_uses_custom_comparer() {
        let ordered = tracks()
            .sort_by_descending(|track| track.plays)
            .then_by_with(|track| track.title, |left: &&str, right: &&str| right.cmp(left));
        assert_eq!(titles(&ordered), vec!["z", "x", "y", "w"]);
    }

    #[rstest]
    fn chaining_after_sort_returns_unordered_list() {
        let doubled: List<u32> = tracks().sort_by(|track| track.plays).map(|track| track.plays * 2);
        assert_eq!(doubled.to_vec(), vec![2, 6, 10, 10]);
    }

    #[rstest]
    #[case(1, true)]
    #[case(3, true)]
    #[case(5, true)]
    #[case(2, false)]
    #[case(9, false)]
    fn binary_contains_searches_sorted_items(#[case] plays: u32, #[case] expected: bool) {
        let by_plays = List::from(vec![5, 3, 1, 5]).sort_by(|number: &u32| *number);
        assert_eq!(by_plays.binary_contains(&plays), expected);
    }

    #[rstest]
    fn binary_contains_checks_items_with_equal_keys() {
        let ordered = tracks().sort_by(|track| track.plays);
        let missing = Track { artist: "c", title: "v", plays: 5 };
        assert!(ordered.binary_contains(&Track { artist: "b", title: "x", plays: 5 }));
        assert!(!ordered.binary_contains(&missing));
    }

    #[rstest]
    fn binary_contains_respects_descending_specs() {
        let ordered = List::from(vec![1, 8, 4]).sort_by_descending(|number: &i32| *number);
        assert!(ordered.binary_contains(&4));
        assert!(!ordered.binary_contains(&5));
    }

    #[rstest]
    fn binary_contains_falls_back_to_linear_scan_for_trivial_order() {
        let trivial = OrderedList::presorted(Source::Items(Rc::from(vec![3, 1, 2])), {
            let mut specs = SortSpecs::new();
            specs.push(SortSpec::trivial());
            specs
        });
        assert!(trivial.binary_contains(&1));
        assert!(!trivial.binary_contains(&4));
    }
}
