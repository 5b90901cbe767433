//! Sequence concatenation: `concat` appends, `add_front` prepends.

use std::rc::Rc;

use crate::sequence::{Cursor, Producer, Source};

/// Yields the source items followed by the items of every appended sequence.
pub struct Concat<T> {
    source: Source<T>,
    others: Rc<[Source<T>]>,
}

impl<T> Concat<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, others: Vec<Source<T>>) -> Self {
        Self {
            source,
            others: Rc::from(others),
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Concat<T> {
    fn produce(&self) -> Cursor<T> {
        let others = self.others.to_vec();
        Box::new(
            self.source
                .cursor()
                .chain(others.into_iter().flat_map(|other| other.cursor())),
        )
    }
}

/// Yields the items of every prepended sequence followed by the source items.
pub struct AddFront<T> {
    source: Source<T>,
    others: Rc<[Source<T>]>,
}

impl<T> AddFront<T> {
    /// Creates the operator.
    pub fn new(source: Source<T>, others: Vec<Source<T>>) -> Self {
        Self {
            source,
            others: Rc::from(others),
        }
    }
}

impl<T: Clone + 'static> Producer<T> for AddFront<T> {
    fn produce(&self) -> Cursor<T> {
        let source = self.source.clone();
        let others = self.others.to_vec();
        Box::new(
            others
                .into_iter()
                .flat_map(|other| other.cursor())
                .chain(std::iter::once(source).flat_map(|source| source.cursor())),
        )
    }
}
