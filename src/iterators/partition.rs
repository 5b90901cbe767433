//! Prefix operators: take, skip and their predicate-driven variants.

use std::rc::Rc;

use crate::comparer::Predicate;
use crate::sequence::{Cursor, Producer, Source};

/// How many leading items, or which leading run of items, a prefix operator
/// acts on.
pub enum Prefix<T> {
    /// The first `n` items. Zero selects nothing.
    Count(usize),
    /// The leading items the predicate accepts.
    While(Predicate<T>),
}

impl<T> Clone for Prefix<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Count(count) => Self::Count(*count),
            Self::While(predicate) => Self::While(Rc::clone(predicate)),
        }
    }
}

/// Yields the selected prefix.
pub struct Take<T> {
    source: Source<T>,
    prefix: Prefix<T>,
}

impl<T> Take<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, prefix: Prefix<T>) -> Self {
        Self { source, prefix }
    }
}

impl<T: Clone + 'static> Producer<T> for Take<T> {
    fn produce(&self) -> Cursor<T> {
        let cursor = self.source.cursor();
        match self.prefix.clone() {
            Prefix::Count(count) => Box::new(cursor.take(count)),
            Prefix::While(predicate) => Box::new(cursor.take_while(move |item| predicate(item))),
        }
    }
}

/// Omits the selected prefix and yields the rest.
pub struct Skip<T> {
    source: Source<T>,
    prefix: Prefix<T>,
}

impl<T> Skip<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, prefix: Prefix<T>) -> Self {
        Self { source, prefix }
    }
}

impl<T: Clone + 'static> Producer<T> for Skip<T> {
    fn produce(&self) -> Cursor<T> {
        let cursor = self.source.cursor();
        match self.prefix.clone() {
            Prefix::Count(count) => Box::new(cursor.skip(count)),
            Prefix::While(predicate) => Box::new(cursor.skip_while(move |item| predicate(item))),
        }
    }
}
