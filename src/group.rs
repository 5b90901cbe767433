//! Bucketing items into nested groups.
//!
//! Grouping runs in two steps over a drained sequence:
//!
//! 1. stable sort by the group levels, so that equal keys become contiguous
//!    and buckets come out in key order;
//! 2. one linear pass that, level by level, finds the sibling bucket whose
//!    key compares equal to the item's key, or appends a new one.
//!
//! The find step scans the buckets created so far, so each level costs
//! O(items × distinct keys). That is fine for the small key cardinalities
//! grouping is normally used with, and it only needs an ordering comparer
//! (no `Hash`).

use std::fmt;

use crate::sort::{sort_items, KeySpec, SortSpec};

/// One group: a key plus either the grouped items or the next level of
/// buckets.
#[derive(Clone, PartialEq)]
pub struct Bucket<K, T> {
    /// The key shared by everything in the bucket.
    pub key: K,
    /// The bucket's contents.
    pub contents: BucketContents<K, T>,
}

/// What a [`Bucket`] holds.
#[derive(Clone, PartialEq)]
pub enum BucketContents<K, T> {
    /// Items of the last grouping level.
    Items(Vec<T>),
    /// Sub-buckets of an intermediate level.
    Buckets(Vec<Bucket<K, T>>),
}

impl<K, T> Bucket<K, T> {
    fn new(key: K, leaf: bool) -> Self {
        let contents = if leaf {
            BucketContents::Items(Vec::new())
        } else {
            BucketContents::Buckets(Vec::new())
        };
        Self { key, contents }
    }

    /// Flattens the bucket into its items, depth first.
    pub fn into_items(self) -> Vec<T> {
        match self.contents {
            BucketContents::Items(items) => items,
            BucketContents::Buckets(buckets) => {
                buckets.into_iter().flat_map(Self::into_items).collect()
            }
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Bucket<K, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Bucket");
        debug.field("key", &self.key);
        match &self.contents {
            BucketContents::Items(items) => debug.field("items", items),
            BucketContents::Buckets(buckets) => debug.field("buckets", buckets),
        };
        debug.finish()
    }
}

/// Groups `items` by `levels`, first level outermost.
///
/// With no levels there is nothing to group by and the result is empty.
pub fn group_items<T: Clone + 'static, K: 'static>(
    items: &[T],
    levels: &[KeySpec<T, K>],
) -> Vec<Bucket<K, T>> {
    if levels.is_empty() {
        return Vec::new();
    }
    let specs: Vec<SortSpec<T>> = levels
        .iter()
        .cloned()
        .map(KeySpec::into_sort_spec)
        .collect();
    let sorted = sort_items(items, &specs);
    tracing::trace!(items = sorted.len(), levels = levels.len(), "grouping");

    let mut buckets = Vec::new();
    for item in sorted {
        insert(&mut buckets, levels, item);
    }
    buckets
}

fn insert<T, K>(buckets: &mut Vec<Bucket<K, T>>, levels: &[KeySpec<T, K>], item: T) {
    let Some((level, rest)) = levels.split_first() else {
        return;
    };
    let key = level.key_of(&item);
    let index = match buckets
        .iter()
        .position(|bucket| level.same_key(&bucket.key, &key))
    {
        Some(index) => index,
        None => {
            buckets.push(Bucket::new(key, rest.is_empty()));
            buckets.len() - 1
        }
    };
    match &mut buckets[index].contents {
        BucketContents::Items(items) => items.push(item),
        BucketContents::Buckets(children) => insert(children, rest, item),
    }
}
