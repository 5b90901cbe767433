//! The `reverse` operator.

use crate::sequence::{Cursor, ItemsCursor, Producer, Source};

/// Drains the source and yields its items last to first.
///
/// Not a streaming operator: the first pull materializes the whole source.
pub struct Reverse<T> {
    source: Source<T>,
}

impl<T> Reverse<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>) -> Self {
        Self { source }
    }
}

impl<T: Clone + 'static> Producer<T> for Reverse<T> {
    fn produce(&self) -> Cursor<T> {
        let source = self.source.clone();
        let mut reversed: Option<ItemsCursor<T>> = None;
        Box::new(std::iter::from_fn(move || {
            reversed
                .get_or_insert_with(|| {
                    let mut items = source.drain().to_vec();
                    tracing::trace!(items = items.len(), "reverse drained its source");
                    items.reverse();
                    ItemsCursor::new(items.into())
                })
                .next()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{as_sequence, Generator};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![1])]
    #[case(vec![1, 2, 3], vec![3, 2, 1])]
    fn reverse_flips_order(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        let producer = Reverse::new(as_sequence(input));
        assert_eq!(producer.produce().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn reverse_drains_only_when_pulled() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let producer: Reverse<i32> = Reverse::new(Source::deferred(Generator::new(move || {
            counter.set(counter.get() + 1);
            vec![1, 2]
        })));

        let mut cursor = producer.produce();
        assert_eq!(calls.get(), 0);
        assert_eq!(cursor.next(), Some(2));
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), None);
        assert_eq!(calls.get(), 1);
    }
}
