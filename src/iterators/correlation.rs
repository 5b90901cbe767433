//! Correlation operators: join, group join, zip.
//!
//! All three drain their second sequence once per pass, on the first pull.

use std::rc::Rc;

use crate::comparer::Selector;
use crate::sequence::{Cursor, DrainOnce, Producer, Source};

/// Key comparer shared by the join operators.
pub type KeyComparer<K> = Rc<dyn Fn(&K, &K) -> bool>;

/// Nested-loop equality join.
///
/// For each outer item, for each inner item, yields `projector(outer, inner)`
/// when the comparer accepts the two keys. Output follows outer order, then
/// inner order within one outer item.
pub struct Join<T, I, K, R> {
    outer: Source<T>,
    inner: Source<I>,
    outer_selector: Selector<T, K>,
    inner_selector: Selector<I, K>,
    projector: Rc<dyn Fn(&T, &I) -> R>,
    comparer: KeyComparer<K>,
}

impl<T, I, K, R> Join<T, I, K, R> {
    /// Creates the operator.
    pub fn new(
        outer: Source<T>,
        inner: Source<I>,
        outer_selector: Selector<T, K>,
        inner_selector: Selector<I, K>,
        projector: Rc<dyn Fn(&T, &I) -> R>,
        comparer: KeyComparer<K>,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_selector,
            inner_selector,
            projector,
            comparer,
        }
    }
}

impl<T, I, K, R> Producer<R> for Join<T, I, K, R>
where
    T: Clone + 'static,
    I: Clone + 'static,
    K: 'static,
    R: 'static,
{
    fn produce(&self) -> Cursor<R> {
        Box::new(JoinCursor {
            outer: self.outer.cursor(),
            inner: DrainOnce::new(self.inner.clone()),
            inner_keys: None,
            current: None,
            index: 0,
            outer_selector: Rc::clone(&self.outer_selector),
            inner_selector: Rc::clone(&self.inner_selector),
            projector: Rc::clone(&self.projector),
            comparer: Rc::clone(&self.comparer),
        })
    }
}

struct JoinCursor<T, I, K, R> {
    outer: Cursor<T>,
    inner: DrainOnce<I>,
    inner_keys: Option<Rc<[K]>>,
    current: Option<(T, K)>,
    index: usize,
    outer_selector: Selector<T, K>,
    inner_selector: Selector<I, K>,
    projector: Rc<dyn Fn(&T, &I) -> R>,
    comparer: KeyComparer<K>,
}

impl<T, I, K, R> Iterator for JoinCursor<T, I, K, R>
where
    T: Clone + 'static,
    I: Clone + 'static,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let inner = self.inner.items();
        let inner_selector = &self.inner_selector;
        let inner_keys = Rc::clone(
            self.inner_keys
                .get_or_insert_with(|| inner.iter().map(|item| inner_selector(item)).collect()),
        );
        loop {
            if self.current.is_none() {
                let outer = self.outer.next()?;
                let key = (self.outer_selector)(&outer);
                self.current = Some((outer, key));
                self.index = 0;
            }
            if let Some((outer, key)) = &self.current {
                while self.index < inner.len() {
                    let index = self.index;
                    self.index += 1;
                    if (self.comparer)(key, &inner_keys[index]) {
                        return Some((self.projector)(outer, &inner[index]));
                    }
                }
            }
            self.current = None;
        }
    }
}

/// Grouped join: every outer item is paired with the bucket of inner items
/// whose key matches, or with an empty bucket.
///
/// The inner buckets are built by a linear scan over the buckets created so
/// far, so building them is O(m²) in the worst case.
pub struct GroupJoin<T, I, K, R> {
    outer: Source<T>,
    inner: Source<I>,
    outer_selector: Selector<T, K>,
    inner_selector: Selector<I, K>,
    projector: Rc<dyn Fn(&T, &[I]) -> R>,
    comparer: KeyComparer<K>,
}

impl<T, I, K, R> GroupJoin<T, I, K, R> {
    /// Creates the operator.
    pub fn new(
        outer: Source<T>,
        inner: Source<I>,
        outer_selector: Selector<T, K>,
        inner_selector: Selector<I, K>,
        projector: Rc<dyn Fn(&T, &[I]) -> R>,
        comparer: KeyComparer<K>,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_selector,
            inner_selector,
            projector,
            comparer,
        }
    }
}

impl<T, I, K, R> Producer<R> for GroupJoin<T, I, K, R>
where
    T: Clone + 'static,
    I: Clone + 'static,
    K: 'static,
    R: 'static,
{
    fn produce(&self) -> Cursor<R> {
        Box::new(GroupJoinCursor {
            outer: self.outer.cursor(),
            inner: self.inner.clone(),
            buckets: None,
            outer_selector: Rc::clone(&self.outer_selector),
            inner_selector: Rc::clone(&self.inner_selector),
            projector: Rc::clone(&self.projector),
            comparer: Rc::clone(&self.comparer),
        })
    }
}

struct GroupJoinCursor<T, I, K, R> {
    outer: Cursor<T>,
    inner: Source<I>,
    buckets: Option<Vec<(K, Vec<I>)>>,
    outer_selector: Selector<T, K>,
    inner_selector: Selector<I, K>,
    projector: Rc<dyn Fn(&T, &[I]) -> R>,
    comparer: KeyComparer<K>,
}

impl<T, I, K, R> GroupJoinCursor<T, I, K, R>
where
    I: Clone + 'static,
{
    fn build_buckets(&self) -> Vec<(K, Vec<I>)> {
        let mut buckets: Vec<(K, Vec<I>)> = Vec::new();
        for item in self.inner.cursor() {
            let key = (self.inner_selector)(&item);
            match buckets
                .iter_mut()
                .find(|(bucket_key, _)| (self.comparer)(bucket_key, &key))
            {
                Some((_, items)) => items.push(item),
                None => buckets.push((key, vec![item])),
            }
        }
        buckets
    }
}

impl<T, I, K, R> Iterator for GroupJoinCursor<T, I, K, R>
where
    T: Clone + 'static,
    I: Clone + 'static,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.buckets.is_none() {
            self.buckets = Some(self.build_buckets());
        }
        let outer = self.outer.next()?;
        let key = (self.outer_selector)(&outer);
        let comparer = &self.comparer;
        let items = self
            .buckets
            .iter()
            .flatten()
            .find(|(bucket_key, _)| comparer(&key, bucket_key))
            .map_or(&[][..], |(_, items)| items.as_slice());
        Some((self.projector)(&outer, items))
    }
}

/// Pairs items by position and stops at the shorter sequence.
pub struct Zip<T, O, R> {
    source: Source<T>,
    other: Source<O>,
    selector: Rc<dyn Fn(T, O) -> R>,
}

impl<T, O, R> Zip<T, O, R> {
    /// Creates the operator.
    pub fn new(source: Source<T>, other: Source<O>, selector: Rc<dyn Fn(T, O) -> R>) -> Self {
        Self {
            source,
            other,
            selector,
        }
    }
}

impl<T, O, R> Producer<R> for Zip<T, O, R>
where
    T: Clone + 'static,
    O: Clone + 'static,
    R: 'static,
{
    fn produce(&self) -> Cursor<R> {
        Box::new(ZipCursor {
            inner: self.source.cursor(),
            other: DrainOnce::new(self.other.clone()),
            index: 0,
            selector: Rc::clone(&self.selector),
        })
    }
}

struct ZipCursor<T, O, R> {
    inner: Cursor<T>,
    other: DrainOnce<O>,
    index: usize,
    selector: Rc<dyn Fn(T, O) -> R>,
}

impl<T, O, R> Iterator for ZipCursor<T, O, R>
where
    T: Clone + 'static,
    O: Clone + 'static,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let other = self.other.items();
        let paired = other.get(self.index)?.clone();
        let item = self.inner.next()?;
        self.index += 1;
        Some((self.selector)(item, paired))
    }
}
