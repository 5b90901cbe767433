//! Set operators: distinct, union, except, intersect.
//!
//! An arbitrary equality comparer cannot be hashed, so `distinct` and `union`
//! keep an accumulating "seen" cache that is scanned linearly (O(n²)), and
//! `except`/`intersect` scan the drained second sequence for every source
//! item (O(n·m)). Each pass starts with an empty cache, so re-iterating a
//! list yields the same result every time.
//!
//! [`DistinctHashed`] is the fast path for `Hash + Eq` items.

use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::comparer::EqualityComparer;
use crate::sequence::{Cursor, DrainOnce, Producer, Source};

/// Yields the first item of every equivalence class, in source order.
pub struct Distinct<T> {
    source: Source<T>,
    comparer: EqualityComparer<T>,
}

impl<T> Distinct<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, comparer: EqualityComparer<T>) -> Self {
        Self { source, comparer }
    }
}

impl<T: Clone + 'static> Producer<T> for Distinct<T> {
    fn produce(&self) -> Cursor<T> {
        Box::new(SeenCursor {
            sources: vec![self.source.clone()],
            current: None,
            seen: Vec::new(),
            comparer: Rc::clone(&self.comparer),
        })
    }
}

/// Yields the distinct items of the source followed by the distinct items of
/// the other sequence that were not already yielded.
pub struct Union<T> {
    source: Source<T>,
    other: Source<T>,
    comparer: EqualityComparer<T>,
}

impl<T> Union<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, other: Source<T>, comparer: EqualityComparer<T>) -> Self {
        Self {
            source,
            other,
            comparer,
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Union<T> {
    fn produce(&self) -> Cursor<T> {
        Box::new(SeenCursor {
            sources: vec![self.other.clone(), self.source.clone()],
            current: None,
            seen: Vec::new(),
            comparer: Rc::clone(&self.comparer),
        })
    }
}

/// Walks one or more sources in turn, sharing a single "seen" cache.
struct SeenCursor<T> {
    /// Remaining sources, last one first.
    sources: Vec<Source<T>>,
    current: Option<Cursor<T>>,
    seen: Vec<T>,
    comparer: EqualityComparer<T>,
}

impl<T: Clone + 'static> Iterator for SeenCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if self.current.is_none() {
                self.current = Some(self.sources.pop()?.cursor());
            }
            let Some(cursor) = self.current.as_mut() else {
                continue;
            };
            match cursor.next() {
                Some(item) => {
                    let comparer = &self.comparer;
                    if !self.seen.iter().any(|seen| comparer(seen, &item)) {
                        self.seen.push(item.clone());
                        return Some(item);
                    }
                }
                None => self.current = None,
            }
        }
    }
}

/// Hash-based distinct for `Hash + Eq` items.
pub struct DistinctHashed<T> {
    source: Source<T>,
}

impl<T> DistinctHashed<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>) -> Self {
        Self { source }
    }
}

impl<T: Clone + Hash + Eq + 'static> Producer<T> for DistinctHashed<T> {
    fn produce(&self) -> Cursor<T> {
        let mut seen = FxHashSet::default();
        Box::new(
            self.source
                .cursor()
                .filter(move |item| seen.insert(item.clone())),
        )
    }
}

/// Membership test shared by `except` and `intersect`.
struct MembershipCursor<T> {
    inner: Cursor<T>,
    other: DrainOnce<T>,
    comparer: EqualityComparer<T>,
    keep_members: bool,
}

impl<T: Clone + 'static> Iterator for MembershipCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let other = self.other.items();
        let comparer = &self.comparer;
        let keep_members = self.keep_members;
        self.inner
            .by_ref()
            .find(|item| other.iter().any(|candidate| comparer(item, candidate)) == keep_members)
    }
}

/// Yields the source items that have no match in the other sequence.
pub struct Except<T> {
    source: Source<T>,
    other: Source<T>,
    comparer: EqualityComparer<T>,
}

impl<T> Except<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, other: Source<T>, comparer: EqualityComparer<T>) -> Self {
        Self {
            source,
            other,
            comparer,
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Except<T> {
    fn produce(&self) -> Cursor<T> {
        Box::new(MembershipCursor {
            inner: self.source.cursor(),
            other: DrainOnce::new(self.other.clone()),
            comparer: Rc::clone(&self.comparer),
            keep_members: false,
        })
    }
}

/// Yields the source items that have at least one match in the other sequence.
pub struct Intersect<T> {
    source: Source<T>,
    other: Source<T>,
    comparer: EqualityComparer<T>,
}

impl<T> Intersect<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, other: Source<T>, comparer: EqualityComparer<T>) -> Self {
        Self {
            source,
            other,
            comparer,
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Intersect<T> {
    fn produce(&self) -> Cursor<T> {
        Box::new(MembershipCursor {
            inner: self.source.cursor(),
            other: DrainOnce::new(self.other.clone()),
            comparer: Rc::clone(&self.comparer),
            keep_members: true,
        })
    }
}
