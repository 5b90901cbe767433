//! Lazy list handles.
//!
//! A handle is one of three shapes:
//!
//! - [`List`]: the unordered base handle
//! - [`OrderedList`]: a list produced by `sort_by`, carrying the sort specs
//!   that `then_by` extends
//! - [`GroupedList`]: one group of a `group_by`, carrying its key
//!
//! Ordered and grouped handles *contain* a `List`, and all three implement
//! [`Queryable`], which provides the whole operator surface on top of
//! [`Queryable::as_list`]. Every chainable operator returns a new unordered
//! `List`; the only way to reach the other shapes is through sorting and
//! grouping.
//!
//! Handles are immutable and cheap to clone: they share their upstream
//! source through `Rc`. Constructing a handle never evaluates anything.
//! Iterating it (directly or through a terminal operator) runs the whole
//! upstream pipeline once, and iterating it again runs it again.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::prelude::*;
//!
//! let words = List::from(vec!["pear", "fig", "apple", "kiwi"]);
//! let short = words
//!     .filter(|word| word.len() <= 4)
//!     .sort_by(|word| word.len())
//!     .then_by(|word| *word);
//!
//! assert_eq!(short.to_vec(), vec!["fig", "kiwi", "pear"]);
//! ```

mod grouped;
mod ordered;
mod queryable;

use std::fmt;
use std::rc::Rc;

pub use grouped::{GroupNode, GroupedList};
pub use ordered::OrderedList;
pub use queryable::Queryable;

use crate::sequence::{Cursor, IntoSource, Producer, Source};

/// The unordered list handle.
pub struct List<T> {
    pub(crate) source: Source<T>,
}

impl<T> List<T> {
    /// Wraps an existing source.
    #[inline]
    pub const fn from_source(source: Source<T>) -> Self {
        Self { source }
    }

    /// Wraps a deferred producer.
    pub fn from_producer<P: Producer<T> + 'static>(producer: P) -> Self {
        Self::from_source(Source::deferred(producer))
    }

    /// Returns the handle's upstream source.
    #[inline]
    pub const fn source(&self) -> &Source<T> {
        &self.source
    }

    /// Returns `true` when the handle is backed by a concrete array, so
    /// iterating it does no upstream work.
    #[inline]
    pub const fn is_evaluated(&self) -> bool {
        self.source.is_concrete()
    }
}

impl<T: Clone + 'static> List<T> {
    /// Starts a new evaluation pass.
    #[inline]
    pub fn iter(&self) -> Cursor<T> {
        self.source.cursor()
    }
}

impl<T: Clone + 'static> Queryable<T> for List<T> {
    #[inline]
    fn as_list(&self) -> &List<T> {
        self
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("List").field("source", &self.source).finish()
    }
}

/// Formats as `List(a, b, c)`. This evaluates the list.
impl<T: fmt::Display + Clone + 'static> fmt::Display for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("List(")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{item}")?;
        }
        formatter.write_str(")")
    }
}

impl<T: Clone + 'static> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for &List<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoSource<T> for List<T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.source
    }
}

impl<T> IntoSource<T> for &List<T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.source.clone()
    }
}

impl<T> IntoSource<T> for OrderedList<T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.into_list().source
    }
}

impl<T> IntoSource<T> for &OrderedList<T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.list().source.clone()
    }
}

impl<K, T> IntoSource<T> for GroupedList<K, T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.into_list().source
    }
}

impl<K, T> IntoSource<T> for &GroupedList<K, T> {
    #[inline]
    fn into_source(self) -> Source<T> {
        self.list().source.clone()
    }
}

impl<T> From<Source<T>> for List<T> {
    fn from(source: Source<T>) -> Self {
        Self::from_source(source)
    }
}

impl<T> From<Rc<[T]>> for List<T> {
    fn from(items: Rc<[T]>) -> Self {
        Self::from_source(Source::Items(items))
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::List;
    use serde::ser::{Serialize, SerializeSeq, Serializer};

    /// Serializes the list as a sequence. This evaluates the list.
    impl<T: Serialize + Clone + 'static> Serialize for List<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let items = self.source.drain();
            let mut sequence = serializer.serialize_seq(Some(items.len()))?;
            for item in items.iter() {
                sequence.serialize_element(item)?;
            }
            sequence.end()
        }
    }
}
