//! The operator surface shared by every list handle.

use std::hash::Hash;
use std::ops::RangeBounds;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use super::grouped::Grouping;
use super::{GroupNode, GroupedList, List, OrderedList};
use crate::comparer::{default_equality, default_predicate};
use crate::error::QueryError;
use crate::extension::{self, Extended};
use crate::group::Bucket;
use crate::iterators::{
    AddFront, Apply, Concat, CopyWithin, Distinct, DistinctHashed, Except, Fill, Filter, FilterMap,
    FlatMap, GroupJoin, Intersect, Intersperse, Join, Map, OfType, Prefix, Reverse, Skip, Take,
    TypeMatcher, Union, Zip,
};
use crate::sequence::{Cursor, IntoSource, Source};
use crate::sort::{KeySpec, SortDirection, SortSpecs};
use crate::value::{Shaped, Value};

/// Chainable and terminal query operators.
///
/// Implementors only provide [`as_list`](Queryable::as_list); everything else
/// is defined on top of the list's source.
///
/// Chainable operators return a new unordered [`List`] (or an
/// [`OrderedList`] for the sorting operators) and do no work. Terminal
/// operators pull the pipeline once and return a plain value.
///
/// Operators that take a comparer come in two forms: the plain form uses the
/// defaults from [`crate::comparer`], the `_by`/`_with` form takes the
/// comparer explicitly.
///
/// # Examples
///
/// ```rust
/// use lazy_query::prelude::*;
///
/// let numbers = List::from(vec![5, 3, 8, 3, 1]);
/// let scaled = numbers
///     .distinct()
///     .map(|number| number * 10)
///     .take_while(|number| *number < 80);
///
/// assert_eq!(scaled.to_vec(), vec![50, 30]);
/// assert_eq!(numbers.count(), 5);
/// assert_eq!(numbers.first(), Some(5));
/// ```
pub trait Queryable<T: Clone + 'static> {
    /// Returns the underlying unordered handle.
    fn as_list(&self) -> &List<T>;

    /// Returns a copy of the handle's source, for feeding another operator.
    fn to_source(&self) -> Source<T> {
        self.as_list().source.clone()
    }

    /// Starts a new evaluation pass.
    fn cursor(&self) -> Cursor<T> {
        self.as_list().source.cursor()
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Yields `function(item)` for every item.
    fn map<U, F>(&self, function: F) -> List<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        List::from_producer(Map::new(self.to_source(), function))
    }

    /// Yields the `Some` results of `function`, skipping items it maps to
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let parsed = List::from(vec!["1", "two", "3"]).filter_map(|text| text.parse::<i32>().ok());
    /// assert_eq!(parsed.to_vec(), vec![1, 3]);
    /// ```
    fn filter_map<U, F>(&self, function: F) -> List<U>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + 'static,
    {
        List::from_producer(FilterMap::new(self.to_source(), function))
    }

    /// Yields the items `predicate` accepts.
    fn filter<P>(&self, predicate: P) -> List<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        List::from_producer(Filter::new(self.to_source(), predicate))
    }

    /// Maps every item to a sequence and yields the items of every sequence.
    fn flat_map<U, I, F>(&self, function: F) -> List<U>
    where
        U: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + 'static,
    {
        List::from_producer(FlatMap::new(self.to_source(), function))
    }

    /// Yields the items of every item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let nested = List::from(vec![vec![1, 2], vec![], vec![3]]);
    /// assert_eq!(nested.flatten().to_vec(), vec![1, 2, 3]);
    /// ```
    fn flatten(&self) -> List<T::Item>
    where
        T: IntoIterator,
        T::Item: 'static,
        T::IntoIter: 'static,
    {
        self.flat_map(|item| item)
    }

    /// Applies every function in `functions` to every item.
    ///
    /// Results are grouped by function: every item through the first
    /// function, then every item through the second. Functions of different
    /// closure types can be passed as `fn` pointers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let functions: Vec<fn(i32) -> i32> = vec![|n: i32| n + 1, |n: i32| n * 10];
    /// let applied = List::from(vec![1, 2]).apply(functions);
    /// assert_eq!(applied.to_vec(), vec![2, 3, 10, 20]);
    /// ```
    fn apply<U, F, S>(&self, functions: S) -> List<U>
    where
        U: 'static,
        F: Fn(T) -> U + Clone + 'static,
        S: IntoSource<F>,
    {
        List::from_producer(Apply::new(self.to_source(), functions.into_source()))
    }

    /// Yields `separator` between every two consecutive items.
    fn intersperse(&self, separator: T) -> List<T> {
        List::from_producer(Intersperse::new(self.to_source(), separator))
    }

    // =========================================================================
    // Concatenation
    // =========================================================================

    /// Yields the items of this list, then the items of `other`.
    fn concat<S: IntoSource<T>>(&self, other: S) -> List<T> {
        self.concat_all([other])
    }

    /// Yields the items of this list, then the items of every sequence in
    /// `others`, in order.
    fn concat_all<S, I>(&self, others: I) -> List<T>
    where
        S: IntoSource<T>,
        I: IntoIterator<Item = S>,
    {
        let others = others.into_iter().map(IntoSource::into_source).collect();
        List::from_producer(Concat::new(self.to_source(), others))
    }

    /// Yields the items of `other`, then the items of this list.
    fn add_front<S: IntoSource<T>>(&self, other: S) -> List<T> {
        self.add_front_all([other])
    }

    /// Yields the items of every sequence in `others`, in order, then the
    /// items of this list.
    fn add_front_all<S, I>(&self, others: I) -> List<T>
    where
        S: IntoSource<T>,
        I: IntoIterator<Item = S>,
    {
        let others = others.into_iter().map(IntoSource::into_source).collect();
        List::from_producer(AddFront::new(self.to_source(), others))
    }

    // =========================================================================
    // Set operators
    // =========================================================================

    /// Yields the first occurrence of every distinct item.
    fn distinct(&self) -> List<T>
    where
        T: PartialEq,
    {
        self.distinct_by(default_equality::<T>)
    }

    /// [`distinct`](Queryable::distinct) under a custom equality.
    fn distinct_by<C>(&self, comparer: C) -> List<T>
    where
        C: Fn(&T, &T) -> bool + 'static,
    {
        List::from_producer(Distinct::new(self.to_source(), Rc::new(comparer)))
    }

    /// Hash-based [`distinct`](Queryable::distinct), O(n) instead of O(n²).
    fn distinct_hashed(&self) -> List<T>
    where
        T: Hash + Eq,
    {
        List::from_producer(DistinctHashed::new(self.to_source()))
    }

    /// Yields the distinct items of this list, then the distinct items of
    /// `other` not yielded yet.
    fn union<S: IntoSource<T>>(&self, other: S) -> List<T>
    where
        T: PartialEq,
    {
        self.union_by(other, default_equality::<T>)
    }

    /// [`union`](Queryable::union) under a custom equality.
    fn union_by<S, C>(&self, other: S, comparer: C) -> List<T>
    where
        S: IntoSource<T>,
        C: Fn(&T, &T) -> bool + 'static,
    {
        List::from_producer(Union::new(
            self.to_source(),
            other.into_source(),
            Rc::new(comparer),
        ))
    }

    /// Yields the items that have no match in `other`.
    fn except<S: IntoSource<T>>(&self, other: S) -> List<T>
    where
        T: PartialEq,
    {
        self.except_by(other, default_equality::<T>)
    }

    /// [`except`](Queryable::except) under a custom equality.
    fn except_by<S, C>(&self, other: S, comparer: C) -> List<T>
    where
        S: IntoSource<T>,
        C: Fn(&T, &T) -> bool + 'static,
    {
        List::from_producer(Except::new(
            self.to_source(),
            other.into_source(),
            Rc::new(comparer),
        ))
    }

    /// Yields the items that have at least one match in `other`. Duplicates
    /// in this list are kept.
    fn intersect<S: IntoSource<T>>(&self, other: S) -> List<T>
    where
        T: PartialEq,
    {
        self.intersect_by(other, default_equality::<T>)
    }

    /// [`intersect`](Queryable::intersect) under a custom equality.
    fn intersect_by<S, C>(&self, other: S, comparer: C) -> List<T>
    where
        S: IntoSource<T>,
        C: Fn(&T, &T) -> bool + 'static,
    {
        List::from_producer(Intersect::new(
            self.to_source(),
            other.into_source(),
            Rc::new(comparer),
        ))
    }

    // =========================================================================
    // Correlation
    // =========================================================================

    /// Equality join on keys.
    ///
    /// Every matching pair produces one output. To drop some pairs, have the
    /// projector return an `Option` and follow with
    /// [`filter_map`](Queryable::filter_map), or use
    /// [`join_filter_map`](Queryable::join_filter_map).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let customers = List::from(vec![(1, "ada"), (2, "grace")]);
    /// let orders = vec![(1, "tea"), (1, "cake")];
    ///
    /// let rows = customers.join(
    ///     orders,
    ///     |customer| customer.0,
    ///     |order: &(i32, &str)| order.0,
    ///     |customer, order: &(i32, &str)| format!("{}: {}", customer.1, order.1),
    /// );
    /// assert_eq!(rows.to_vec(), vec!["ada: tea", "ada: cake"]);
    /// ```
    fn join<I, K, R, S, OK, IK, P>(
        &self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        projector: P,
    ) -> List<R>
    where
        I: Clone + 'static,
        K: PartialEq + 'static,
        R: 'static,
        S: IntoSource<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        P: Fn(&T, &I) -> R + 'static,
    {
        self.join_by(inner, outer_key, inner_key, projector, default_equality::<K>)
    }

    /// [`join`](Queryable::join) with a projector that may reject a pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let customers = List::from(vec![(1, "ada"), (2, "grace")]);
    /// let orders = vec![(1, 3), (1, 0), (2, 5)];
    ///
    /// let rows = customers.join_filter_map(
    ///     orders,
    ///     |customer| customer.0,
    ///     |order: &(i32, i32)| order.0,
    ///     |customer, order: &(i32, i32)| (order.1 > 0).then(|| (customer.1, order.1)),
    /// );
    /// assert_eq!(rows.to_vec(), vec![("ada", 3), ("grace", 5)]);
    /// ```
    fn join_filter_map<I, K, R, S, OK, IK, P>(
        &self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        projector: P,
    ) -> List<R>
    where
        I: Clone + 'static,
        K: PartialEq + 'static,
        R: Clone + 'static,
        S: IntoSource<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        P: Fn(&T, &I) -> Option<R> + 'static,
    {
        self.join(inner, outer_key, inner_key, projector)
            .filter_map(|row| row)
    }

    /// [`join`](Queryable::join) under a custom key equality.
    fn join_by<I, K, R, S, OK, IK, P, C>(
        &self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        projector: P,
        comparer: C,
    ) -> List<R>
    where
        I: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSource<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        P: Fn(&T, &I) -> R + 'static,
        C: Fn(&K, &K) -> bool + 'static,
    {
        List::from_producer(Join::new(
            self.to_source(),
            inner.into_source(),
            Rc::new(outer_key),
            Rc::new(inner_key),
            Rc::new(projector),
            Rc::new(comparer),
        ))
    }

    /// Pairs every item with the slice of `inner` items sharing its key.
    /// Items without a match are paired with an empty slice.
    ///
    /// Every outer item produces one output; to drop some, return an
    /// `Option` from the projector and follow with
    /// [`filter_map`](Queryable::filter_map).
    fn group_join<I, K, R, S, OK, IK, P>(
        &self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        projector: P,
    ) -> List<R>
    where
        I: Clone + 'static,
        K: PartialEq + 'static,
        R: 'static,
        S: IntoSource<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        P: Fn(&T, &[I]) -> R + 'static,
    {
        self.group_join_by(inner, outer_key, inner_key, projector, default_equality::<K>)
    }

    /// [`group_join`](Queryable::group_join) under a custom key equality.
    fn group_join_by<I, K, R, S, OK, IK, P, C>(
        &self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        projector: P,
        comparer: C,
    ) -> List<R>
    where
        I: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSource<I>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        P: Fn(&T, &[I]) -> R + 'static,
        C: Fn(&K, &K) -> bool + 'static,
    {
        List::from_producer(GroupJoin::new(
            self.to_source(),
            inner.into_source(),
            Rc::new(outer_key),
            Rc::new(inner_key),
            Rc::new(projector),
            Rc::new(comparer),
        ))
    }

    /// Yields `selector(item, other_item)` pairwise, stopping at the shorter
    /// sequence.
    fn zip<O, R, S, F>(&self, other: S, selector: F) -> List<R>
    where
        O: Clone + 'static,
        R: 'static,
        S: IntoSource<O>,
        F: Fn(T, O) -> R + 'static,
    {
        List::from_producer(Zip::new(
            self.to_source(),
            other.into_source(),
            Rc::new(selector),
        ))
    }

    // =========================================================================
    // Partitioning
    // =========================================================================

    /// Yields the first `count` items.
    fn take(&self, count: usize) -> List<T> {
        List::from_producer(Take::new(self.to_source(), Prefix::Count(count)))
    }

    /// Skips the first `count` items and yields the rest.
    fn skip(&self, count: usize) -> List<T> {
        List::from_producer(Skip::new(self.to_source(), Prefix::Count(count)))
    }

    /// Yields items until `predicate` first rejects one.
    fn take_while<P>(&self, predicate: P) -> List<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        List::from_producer(Take::new(
            self.to_source(),
            Prefix::While(Rc::new(predicate)),
        ))
    }

    /// Skips items until `predicate` first rejects one, then yields the rest.
    fn skip_while<P>(&self, predicate: P) -> List<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        List::from_producer(Skip::new(
            self.to_source(),
            Prefix::While(Rc::new(predicate)),
        ))
    }

    /// Yields the items last to first. Materializes the list when pulled.
    fn reverse(&self) -> List<T> {
        List::from_producer(Reverse::new(self.to_source()))
    }

    /// Replaces the items in `range` with clones of `value`.
    ///
    /// Range bounds are relative: a negative bound counts back from the end,
    /// and out-of-range bounds are clamped. Materializes the list when pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let numbers = List::from(vec![1, 2, 3, 4]);
    /// assert_eq!(numbers.fill(0, 1..3).to_vec(), vec![1, 0, 0, 4]);
    /// assert_eq!(numbers.fill(9, -1..).to_vec(), vec![1, 2, 3, 9]);
    /// ```
    fn fill<R: RangeBounds<isize>>(&self, value: T, range: R) -> List<T> {
        List::from_producer(Fill::new(self.to_source(), value, range))
    }

    /// Copies the items in `range` over the items starting at `target`,
    /// keeping the length. Bounds are relative, as for
    /// [`fill`](Queryable::fill). Materializes the list when pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let numbers = List::from(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(numbers.copy_within(3..4, 0).to_vec(), vec![4, 2, 3, 4, 5]);
    /// assert_eq!(numbers.copy_within(.., -2).to_vec(), vec![1, 2, 3, 1, 2]);
    /// ```
    fn copy_within<R: RangeBounds<isize>>(&self, range: R, target: isize) -> List<T> {
        List::from_producer(CopyWithin::new(self.to_source(), range, target))
    }

    /// Yields the items `matcher` accepts.
    fn of_type(&self, matcher: TypeMatcher<T>) -> List<T>
    where
        T: Shaped + PartialEq,
    {
        List::from_producer(OfType::new(self.to_source(), matcher))
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Sorts ascending by a key, using the generic value comparer.
    fn sort_by<K, S>(&self, key_selector: S) -> OrderedList<T>
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.sort_by_spec(KeySpec::ascending(key_selector))
    }

    /// Sorts descending by a key, using the generic value comparer.
    fn sort_by_descending<K, S>(&self, key_selector: S) -> OrderedList<T>
    where
        K: PartialOrd + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.sort_by_spec(KeySpec::descending(key_selector))
    }

    /// Sorts ascending by a key under a custom comparer.
    fn sort_by_with<K, S, C>(&self, key_selector: S, comparer: C) -> OrderedList<T>
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> std::cmp::Ordering + 'static,
    {
        self.sort_by_spec(KeySpec::new(key_selector, comparer, SortDirection::Ascending))
    }

    /// Sorts descending by a key under a custom comparer.
    fn sort_by_descending_with<K, S, C>(&self, key_selector: S, comparer: C) -> OrderedList<T>
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> std::cmp::Ordering + 'static,
    {
        self.sort_by_spec(KeySpec::new(key_selector, comparer, SortDirection::Descending))
    }

    /// Sorts by an explicit criterion.
    fn sort_by_spec<K: 'static>(&self, spec: KeySpec<T, K>) -> OrderedList<T> {
        let mut specs = SortSpecs::new();
        specs.push(spec.into_sort_spec());
        OrderedList::sorted(self.to_source(), specs)
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    /// Groups items by a key, groups in ascending key order.
    ///
    /// Each yielded [`GroupedList`] carries its key and holds its items in
    /// source order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let groups = List::from(vec![1, 2, 3, 4]).group_by(|number| number % 2 == 0).to_vec();
    ///
    /// assert_eq!(groups.len(), 2);
    /// assert!(!*groups[0].key());
    /// assert_eq!(groups[0].to_vec(), vec![1, 3]);
    /// assert_eq!(groups[1].to_vec(), vec![2, 4]);
    /// ```
    fn group_by<K, S>(&self, key_selector: S) -> List<GroupedList<K, T>>
    where
        K: PartialOrd + Clone + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.group_by_spec(KeySpec::ascending(key_selector))
    }

    /// Groups items by a key, groups in descending key order.
    fn group_by_descending<K, S>(&self, key_selector: S) -> List<GroupedList<K, T>>
    where
        K: PartialOrd + Clone + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.group_by_spec(KeySpec::descending(key_selector))
    }

    /// Groups items by an explicit criterion. Keys comparing equal under the
    /// criterion's comparer share a group.
    fn group_by_spec<K>(&self, spec: KeySpec<T, K>) -> List<GroupedList<K, T>>
    where
        K: Clone + 'static,
    {
        List::from_producer(Grouping::new(
            self.to_source(),
            Rc::from([spec]),
            |bucket: Bucket<K, T>| GroupedList::new(bucket.key.clone(), bucket.into_items()),
        ))
    }

    /// Groups items by several criteria, first level outermost.
    ///
    /// With no levels, the result is empty.
    fn group_by_levels<K>(&self, levels: Vec<KeySpec<T, K>>) -> List<GroupNode<K, T>>
    where
        K: Clone + 'static,
    {
        List::from_producer(Grouping::new(
            self.to_source(),
            Rc::from(levels),
            GroupNode::from_bucket,
        ))
    }

    // =========================================================================
    // Conversion (terminal)
    // =========================================================================

    /// Collects the items into a vector.
    fn to_vec(&self) -> Vec<T> {
        self.cursor().collect()
    }

    /// Collects the distinct items into an insertion-ordered set.
    fn to_set(&self) -> IndexSet<T>
    where
        T: Hash + Eq,
    {
        self.cursor().collect()
    }

    /// Collects the items into an insertion-ordered map keyed by position.
    fn to_map(&self) -> IndexMap<usize, T> {
        self.cursor().enumerate().collect()
    }

    /// Collects the items into an insertion-ordered map keyed by
    /// `key_selector`. When two items share a key the later item wins, at
    /// the position of the first.
    fn to_map_by<K, S>(&self, key_selector: S) -> IndexMap<K, T>
    where
        K: Hash + Eq,
        S: Fn(&T) -> K,
    {
        self.cursor().map(|item| (key_selector(&item), item)).collect()
    }

    /// Evaluates the pipeline once and returns a handle over the result.
    ///
    /// The returned handle no longer re-runs anything when iterated.
    fn to_evaluated_list(&self) -> List<T> {
        let items = self.as_list().source.drain();
        tracing::trace!(items = items.len(), "materialized list");
        List::from(items)
    }

    // =========================================================================
    // Counting and lookup (terminal)
    // =========================================================================

    /// Counts the items.
    fn count(&self) -> usize {
        self.cursor().count()
    }

    /// Counts the items `predicate` accepts.
    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().filter(|item| predicate(item)).count()
    }

    /// Returns `true` when the list yields nothing.
    fn is_empty(&self) -> bool {
        self.cursor().next().is_none()
    }

    /// Returns the first item. Stops pulling after it.
    fn first(&self) -> Option<T> {
        self.cursor().next()
    }

    /// Returns the first item `predicate` accepts.
    fn first_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().find(|item| predicate(item))
    }

    /// Returns the last item.
    fn last(&self) -> Option<T> {
        self.cursor().last()
    }

    /// Returns the last item `predicate` accepts.
    fn last_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().filter(|item| predicate(item)).last()
    }

    /// Returns the position of the first item `predicate` accepts.
    fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().position(|item| predicate(&item))
    }

    /// Returns the position of the last item `predicate` accepts.
    fn find_last_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.cursor()
            .enumerate()
            .filter(|(_, item)| predicate(item))
            .last()
            .map(|(index, _)| index)
    }

    // =========================================================================
    // Predicates (terminal)
    // =========================================================================

    /// Returns `true` when some item satisfies `predicate`.
    fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().any(|item| predicate(&item))
    }

    /// Returns `true` when every item satisfies `predicate`.
    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().all(|item| predicate(&item))
    }

    /// [`any`](Queryable::any) with the accept-everything predicate: `true`
    /// when the list has at least one item.
    fn any_item(&self) -> bool {
        self.any(default_predicate::<T>)
    }

    /// [`all`](Queryable::all) with the accept-everything predicate.
    fn all_items(&self) -> bool {
        self.all(default_predicate::<T>)
    }

    /// Returns `true` when some item equals `item`. Stops at the first match.
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_by(item, default_equality::<T>)
    }

    /// [`contains`](Queryable::contains) under a custom equality.
    fn contains_by<C>(&self, item: &T, comparer: C) -> bool
    where
        C: Fn(&T, &T) -> bool,
    {
        self.cursor().any(|candidate| comparer(&candidate, item))
    }

    // =========================================================================
    // Aggregation (terminal)
    // =========================================================================

    /// Left fold.
    fn fold<A, F>(&self, seed: A, function: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.cursor().fold(seed, function)
    }

    /// Right fold: combines items last to first.
    fn fold_right<A, F>(&self, seed: A, function: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.as_list()
            .source
            .drain()
            .iter()
            .rev()
            .cloned()
            .fold(seed, function)
    }

    /// Left fold seeded with the first item. `None` for an empty list.
    fn reduce<F>(&self, function: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.cursor().reduce(function)
    }

    /// Returns `true` when both sequences have the same length and pairwise
    /// equal items.
    fn equals<S: IntoSource<T>>(&self, other: S) -> bool
    where
        T: PartialEq,
    {
        self.equals_by(other, default_equality::<T>)
    }

    /// [`equals`](Queryable::equals) under a custom equality.
    fn equals_by<S, C>(&self, other: S, comparer: C) -> bool
    where
        S: IntoSource<T>,
        C: Fn(&T, &T) -> bool,
    {
        let mut left = self.cursor();
        let mut right = other.into_source().cursor();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(left_item), Some(right_item)) if comparer(&left_item, &right_item) => {}
                _ => return false,
            }
        }
    }

    // =========================================================================
    // Extensions
    // =========================================================================

    /// Invokes the extension registered under `name` for `T`.
    ///
    /// # Errors
    ///
    /// [`QueryError::UnknownOperator`] if no such extension is registered.
    fn apply_extension(&self, name: &str, args: &[Value]) -> Result<Extended<T>, QueryError> {
        extension::apply(self.as_list(), name, args)
    }

    /// Invokes a deferred extension and returns its list.
    ///
    /// # Errors
    ///
    /// [`QueryError::UnknownOperator`] if no such extension is registered,
    /// [`QueryError::UnexpectedResult`] if it is an eager extension.
    fn chain_extension(&self, name: &str, args: &[Value]) -> Result<List<T>, QueryError> {
        self.apply_extension(name, args)?
            .into_list()
            .ok_or_else(|| QueryError::UnexpectedResult {
                name: name.to_owned(),
                expected: "a list",
            })
    }

    /// Invokes an eager extension and returns its value.
    ///
    /// # Errors
    ///
    /// [`QueryError::UnknownOperator`] if no such extension is registered,
    /// [`QueryError::UnexpectedResult`] if it is deferred or its value is not
    /// an `R`.
    fn eval_extension<R: 'static>(&self, name: &str, args: &[Value]) -> Result<R, QueryError> {
        self.apply_extension(name, args)?
            .downcast::<R>()
            .ok_or_else(|| QueryError::UnexpectedResult {
                name: name.to_owned(),
                expected: std::any::type_name::<R>(),
            })
    }
}
