//! Stable multi-key sorting.
//!
//! A sort is described by an ordered sequence of [`SortSpec`]s. Two items are
//! compared by walking the sequence in order: the first spec whose comparison
//! is not [`Ordering::Equal`] decides, and if every spec ties the items keep
//! their original relative order. `slice::sort_by` is a stable merge sort, so
//! the tie-break is guaranteed without an explicit index.
//!
//! [`KeySpec`] is the typed form used by callers and by the group engine (it
//! keeps the key selector so bucket keys can be read back). [`SortSpec`] is
//! the same criterion with the key type erased, which lets the specs of one
//! `sort_by(..).then_by(..)` chain live in a single sequence even when every
//! step sorts on a different key type.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::sort::{compare_by_specs, sort_items, KeySpec, SortSpec};
//!
//! let by_length = KeySpec::ascending(|word: &&str| word.len()).into_sort_spec();
//! let alphabetical = KeySpec::descending(|word: &&str| *word).into_sort_spec();
//! let specs: Vec<SortSpec<&str>> = vec![by_length, alphabetical];
//!
//! let sorted = sort_items(&["bb", "a", "ab", "c"], &specs);
//! assert_eq!(sorted, vec!["c", "a", "bb", "ab"]);
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::comparer::{default_ordering, OrderingComparer, Selector};
use crate::sequence::{Cursor, ItemsCursor, Producer, Source};

/// Number of sort specs stored inline before spilling to the heap.
const INLINE_SPECS: usize = 4;

/// The sort specs of one ordered list, highest priority first.
pub type SortSpecs<T> = SmallVec<[SortSpec<T>; INLINE_SPECS]>;

/// The direction of one sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison result.
    #[inline]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A typed sort criterion: key selector, key comparer and direction.
pub struct KeySpec<T, K> {
    /// Extracts the key from an item.
    pub key_selector: Selector<T, K>,
    /// Compares two keys in ascending order.
    pub comparer: OrderingComparer<K>,
    /// The direction applied to the comparer's result.
    pub direction: SortDirection,
}

impl<T, K> KeySpec<T, K> {
    /// Creates a criterion from its parts.
    pub fn new<S, C>(key_selector: S, comparer: C, direction: SortDirection) -> Self
    where
        S: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        Self {
            key_selector: Rc::new(key_selector),
            comparer: Rc::new(comparer),
            direction,
        }
    }

    /// Extracts the key of an item.
    #[inline]
    pub fn key_of(&self, item: &T) -> K {
        (self.key_selector)(item)
    }

    /// Compares two keys, ignoring the direction.
    #[inline]
    pub fn same_key(&self, left: &K, right: &K) -> bool {
        (self.comparer)(left, right) == Ordering::Equal
    }
}

impl<T, K: PartialOrd + 'static> KeySpec<T, K> {
    /// An ascending criterion using the generic value comparer.
    pub fn ascending<S: Fn(&T) -> K + 'static>(key_selector: S) -> Self {
        Self::new(key_selector, default_ordering::<K>, SortDirection::Ascending)
    }

    /// A descending criterion using the generic value comparer.
    pub fn descending<S: Fn(&T) -> K + 'static>(key_selector: S) -> Self {
        Self::new(key_selector, default_ordering::<K>, SortDirection::Descending)
    }
}

impl<T: 'static, K: 'static> KeySpec<T, K> {
    /// Erases the key type.
    pub fn into_sort_spec(self) -> SortSpec<T> {
        let Self {
            key_selector,
            comparer,
            direction,
        } = self;
        SortSpec {
            compare: Rc::new(move |left: &T, right: &T| {
                comparer(&key_selector(left), &key_selector(right))
            }),
            direction,
            trivial: false,
        }
    }
}

impl<T, K> Clone for KeySpec<T, K> {
    fn clone(&self) -> Self {
        Self {
            key_selector: Rc::clone(&self.key_selector),
            comparer: Rc::clone(&self.comparer),
            direction: self.direction,
        }
    }
}

/// A sort criterion with the key type erased.
pub struct SortSpec<T> {
    compare: Rc<dyn Fn(&T, &T) -> Ordering>,
    direction: SortDirection,
    trivial: bool,
}

impl<T> SortSpec<T> {
    /// The criterion under which every two items tie.
    ///
    /// Empty and single-item lists are sorted under any criterion; they carry
    /// this spec so that `then_by` can be chained on them directly.
    pub fn trivial() -> Self
    where
        T: 'static,
    {
        Self {
            compare: Rc::new(|_: &T, _: &T| Ordering::Equal),
            direction: SortDirection::Ascending,
            trivial: true,
        }
    }

    /// Compares two items, direction applied.
    #[inline]
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        self.direction.apply((self.compare)(left, right))
    }

    /// The direction of the criterion.
    #[inline]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Returns `true` for [`SortSpec::trivial`].
    #[inline]
    pub const fn is_trivial(&self) -> bool {
        self.trivial
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
            direction: self.direction,
            trivial: self.trivial,
        }
    }
}

impl<T> std::fmt::Debug for SortSpec<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SortSpec")
            .field("direction", &self.direction)
            .field("trivial", &self.trivial)
            .finish_non_exhaustive()
    }
}

/// Lexicographic composition of `specs`: the first non-equal result wins.
pub fn compare_by_specs<T>(specs: &[SortSpec<T>], left: &T, right: &T) -> Ordering {
    specs
        .iter()
        .map(|spec| spec.compare(left, right))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Returns a stably sorted copy of `items`.
pub fn sort_items<T: Clone>(items: &[T], specs: &[SortSpec<T>]) -> Vec<T> {
    tracing::trace!(items = items.len(), specs = specs.len(), "sorting");
    let mut sorted = items.to_vec();
    sorted.sort_by(|left, right| compare_by_specs(specs, left, right));
    sorted
}

/// Deferred sort: drains and sorts the source on the first pull of a pass.
pub struct Sorted<T> {
    source: Source<T>,
    specs: Rc<SortSpecs<T>>,
}

impl<T> Sorted<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, specs: Rc<SortSpecs<T>>) -> Self {
        Self { source, specs }
    }
}

impl<T: Clone + 'static> Producer<T> for Sorted<T> {
    fn produce(&self) -> Cursor<T> {
        let source = self.source.clone();
        let specs = Rc::clone(&self.specs);
        let mut sorted: Option<ItemsCursor<T>> = None;
        Box::new(std::iter::from_fn(move || {
            sorted
                .get_or_insert_with(|| ItemsCursor::new(sort_items(&source.drain(), &specs).into()))
                .next()
        }))
    }
}
