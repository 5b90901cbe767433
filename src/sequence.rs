//! Sequence coercion and the restartable-producer contract.
//!
//! A [`Producer`] is a deferred sequence computation: nothing happens until
//! [`Producer::produce`] is called, and every call returns a fresh
//! [`Cursor`] that re-runs the whole computation from the start.
//!
//! A [`Source`] is the upstream data of a list. It is either a concrete,
//! shared array of items or a producer. Algorithms that can stream pull from
//! [`Source::cursor`]; algorithms that need random access or several passes
//! (sorting, grouping, binary search, membership tests) call
//! [`Source::drain`], which never mutates the source.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::sequence::{as_sequence, Source};
//!
//! let source: Source<i32> = as_sequence(vec![1, 2, 3]);
//! assert!(source.is_concrete());
//! assert_eq!(source.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(&*source.drain(), &[1, 2, 3]);
//! ```

use std::fmt;
use std::rc::Rc;

/// A pull cursor over one evaluation pass.
pub type Cursor<T> = Box<dyn Iterator<Item = T>>;

/// A restartable, deferred sequence computation.
///
/// Each call to [`produce`](Producer::produce) must return an independent
/// cursor positioned at the start of the sequence.
pub trait Producer<T> {
    /// Starts a new evaluation pass.
    fn produce(&self) -> Cursor<T>;
}

/// A producer backed by a generator function, invoked once per pass.
///
/// # Examples
///
/// ```rust
/// use lazy_query::sequence::{Generator, Producer};
///
/// let producer = Generator::new(|| 1..=3);
/// assert_eq!(producer.produce().sum::<i32>(), 6);
/// assert_eq!(producer.produce().sum::<i32>(), 6);
/// ```
pub struct Generator<F> {
    generate: F,
}

impl<F> Generator<F> {
    /// Wraps a generator function.
    #[inline]
    pub const fn new(generate: F) -> Self {
        Self { generate }
    }
}

impl<T, I, F> Producer<T> for Generator<F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
{
    fn produce(&self) -> Cursor<T> {
        Box::new((self.generate)().into_iter())
    }
}

/// The upstream data of a list.
pub enum Source<T> {
    /// A concrete, already evaluated array.
    Items(Rc<[T]>),
    /// A deferred computation, re-run on every pass.
    Deferred(Rc<dyn Producer<T>>),
}

impl<T> Source<T> {
    /// Wraps a producer.
    pub fn deferred<P: Producer<T> + 'static>(producer: P) -> Self {
        Self::Deferred(Rc::new(producer))
    }

    /// Returns `true` when the source is a concrete array.
    #[inline]
    pub const fn is_concrete(&self) -> bool {
        matches!(self, Self::Items(_))
    }
}

impl<T: Clone + 'static> Source<T> {
    /// Starts a new pass over the source.
    pub fn cursor(&self) -> Cursor<T> {
        match self {
            Self::Items(items) => Box::new(ItemsCursor::new(Rc::clone(items))),
            Self::Deferred(producer) => producer.produce(),
        }
    }

    /// Returns every item of the source as a concrete array.
    ///
    /// A concrete source is shared rather than copied; a deferred source is
    /// evaluated in one full pass.
    pub fn drain(&self) -> Rc<[T]> {
        match self {
            Self::Items(items) => Rc::clone(items),
            Self::Deferred(producer) => producer.produce().collect(),
        }
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Items(items) => Self::Items(Rc::clone(items)),
            Self::Deferred(producer) => Self::Deferred(Rc::clone(producer)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(items) => formatter.debug_tuple("Items").field(items).finish(),
            Self::Deferred(_) => formatter.write_str("Deferred(..)"),
        }
    }
}

/// Cursor over a shared concrete array.
pub struct ItemsCursor<T> {
    items: Rc<[T]>,
    index: usize,
}

impl<T> ItemsCursor<T> {
    /// Creates a cursor positioned at the first item.
    #[inline]
    pub const fn new(items: Rc<[T]>) -> Self {
        Self { items, index: 0 }
    }
}

impl<T: Clone> Iterator for ItemsCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for ItemsCursor<T> {}

/// A source that is drained on first use and kept for the rest of the pass.
///
/// Cursors hold one of these for their secondary sequence so that the
/// secondary sequence is evaluated at most once per pass, and only when the
/// cursor is first pulled.
pub struct DrainOnce<T> {
    source: Source<T>,
    items: Option<Rc<[T]>>,
}

impl<T: Clone + 'static> DrainOnce<T> {
    /// Wraps a source without evaluating it.
    #[inline]
    pub const fn new(source: Source<T>) -> Self {
        Self {
            source,
            items: None,
        }
    }

    /// Drains the source if needed and returns its items.
    pub fn items(&mut self) -> Rc<[T]> {
        let source = &self.source;
        Rc::clone(self.items.get_or_insert_with(|| source.drain()))
    }
}

/// Conversion into a [`Source`].
///
/// Concrete collections become [`Source::Items`]; lists hand over their own
/// source so the consuming algorithm pulls their pipeline.
pub trait IntoSource<T> {
    /// Performs the conversion.
    fn into_source(self) -> Source<T>;
}

impl<T> IntoSource<T> for Source<T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self
    }
}

impl<T> IntoSource<T> for Vec<T> {
    fn into_source(self) -> Source<T> {
        Source::Items(Rc::from(self))
    }
}

impl<T, const N: usize> IntoSource<T> for [T; N] {
    fn into_source(self) -> Source<T> {
        Source::Items(self.into_iter().collect())
    }
}

impl<T: Clone> IntoSource<T> for &[T] {
    fn into_source(self) -> Source<T> {
        Source::Items(Rc::from(self))
    }
}

impl<T> IntoSource<T> for Rc<[T]> {
    #[inline]
    fn into_source(self) -> Source<T> {
        Source::Items(self)
    }
}

/// Normalizes any supported input into a [`Source`].
#[inline]
pub fn as_sequence<T, S: IntoSource<T>>(sequence: S) -> Source<T> {
    sequence.into_source()
}
