//! In-place style operators: fill and copy-within.
//!
//! Both keep the length of the list and rewrite a slice of it. Positions are
//! `isize` ranges: a negative bound counts back from the end, and bounds past
//! either end are clamped, so `-2..` is the last two items and `..100` on a
//! three-item list is the whole list. Both operators materialize the source
//! on the first pull of a pass.

use std::ops::{Bound, Range, RangeBounds};

use crate::sequence::{Cursor, ItemsCursor, Producer, Source};

/// Resolves one relative position against `len`, clamping to `0..=len`.
fn resolve(position: isize, len: usize) -> usize {
    if position < 0 {
        len.saturating_sub(position.unsigned_abs())
    } else {
        position.unsigned_abs().min(len)
    }
}

/// Resolves a relative range into an absolute one within `0..len`.
///
/// An empty or inverted range resolves to an empty range.
pub fn resolve_range<R: RangeBounds<isize>>(range: &R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => resolve(start, len),
        Bound::Excluded(&start) => (resolve(start, len) + 1).min(len),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => (resolve(end, len) + 1).min(len),
        Bound::Excluded(&end) => resolve(end, len),
        Bound::Unbounded => len,
    };
    start..end.max(start)
}

fn rewritten<T: Clone + 'static>(
    source: Source<T>,
    rewrite: impl Fn(&mut Vec<T>) + 'static,
) -> Cursor<T> {
    let mut rewritten: Option<ItemsCursor<T>> = None;
    Box::new(std::iter::from_fn(move || {
        rewritten
            .get_or_insert_with(|| {
                let mut items = source.drain().to_vec();
                rewrite(&mut items);
                ItemsCursor::new(items.into())
            })
            .next()
    }))
}

/// Replaces the items in a range with copies of one value.
pub struct Fill<T> {
    source: Source<T>,
    value: T,
    range: (Bound<isize>, Bound<isize>),
}

impl<T> Fill<T> {
    /// Creates the operator.
    pub fn new<R: RangeBounds<isize>>(source: Source<T>, value: T, range: R) -> Self {
        Self {
            source,
            value,
            range: (range.start_bound().cloned(), range.end_bound().cloned()),
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Fill<T> {
    fn produce(&self) -> Cursor<T> {
        let value = self.value.clone();
        let range = self.range;
        rewritten(self.source.clone(), move |items| {
            let span = resolve_range(&range, items.len());
            tracing::trace!(items = items.len(), start = span.start, end = span.end, "fill");
            items[span].fill(value.clone());
        })
    }
}

/// Copies the items in a range over the items starting at `target`.
///
/// The copy reads the range before writing, so overlapping ranges behave as
/// if copied through a buffer. Items that would land past the end are
/// dropped.
pub struct CopyWithin<T> {
    source: Source<T>,
    range: (Bound<isize>, Bound<isize>),
    target: isize,
}

impl<T> CopyWithin<T> {
    /// Creates the operator.
    pub fn new<R: RangeBounds<isize>>(source: Source<T>, range: R, target: isize) -> Self {
        Self {
            source,
            range: (range.start_bound().cloned(), range.end_bound().cloned()),
            target,
        }
    }
}

impl<T: Clone + 'static> Producer<T> for CopyWithin<T> {
    fn produce(&self) -> Cursor<T> {
        let range = self.range;
        let target = self.target;
        rewritten(self.source.clone(), move |items| {
            let len = items.len();
            let span = resolve_range(&range, len);
            let target = resolve(target, len);
            let count = span.len().min(len - target);
            tracing::trace!(items = len, start = span.start, destination = target, count, "copy within");
            let copied = items[span.start..span.start + count].to_vec();
            items[target..target + count].clone_from_slice(&copied);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Generator, as_sequence};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(0..2, 0..2)]
    #[case(-2..5, 3..5)]
    #[case(3..1, 3..3)]
    #[case(-10..10, 0..5)]
    fn ranges_resolve_relative_to_length(#[case] range: Range<isize>, #[case] expected: Range<usize>) {
        assert_eq!(resolve_range(&range, 5), expected);
    }

    #[rstest]
    fn unbounded_and_inclusive_ranges_resolve() {
        assert_eq!(resolve_range(&(..), 4), 0..4);
        assert_eq!(resolve_range(&(1..), 4), 1..4);
        assert_eq!(resolve_range(&(..=-1), 4), 0..4);
        assert_eq!(resolve_range(&(..-1), 5), 0..4);
        assert_eq!(resolve_range(&(-1..=-1), 5), 4..5);
        assert_eq!(resolve_range(&(..), 0), 0..0);
    }

    #[rstest]
    #[case(1..3, vec![1, 0, 0, 4, 5])]
    #[case(-2..-1, vec![1, 2, 3, 0, 5])]
    #[case(4..2, vec![1, 2, 3, 4, 5])]
    fn fill_overwrites_the_range(#[case] range: Range<isize>, #[case] expected: Vec<i32>) {
        let producer = Fill::new(as_sequence(vec![1, 2, 3, 4, 5]), 0, range);
        assert_eq!(producer.produce().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn fill_whole_list() {
        let producer = Fill::new(as_sequence(vec!['a', 'b']), 'z', ..);
        assert_eq!(producer.produce().collect::<String>(), "zz");
    }

    #[rstest]
    #[case(3..4, 0, vec![4, 2, 3, 4, 5])]
    #[case(0..3, 1, vec![1, 1, 2, 3, 5])]
    #[case(2..5, 0, vec![3, 4, 5, 4, 5])]
    #[case(0..5, 3, vec![1, 2, 3, 1, 2])]
    #[case(-2..5, -4, vec![1, 4, 5, 4, 5])]
    #[case(2..2, 0, vec![1, 2, 3, 4, 5])]
    fn copy_within_keeps_the_length(
        #[case] range: Range<isize>,
        #[case] target: isize,
        #[case] expected: Vec<i32>,
    ) {
        let producer = CopyWithin::new(as_sequence(vec![1, 2, 3, 4, 5]), range, target);
        assert_eq!(producer.produce().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn rewrites_drain_once_per_pass_and_only_when_pulled() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let source: Source<i32> = Source::deferred(Generator::new(move || {
            counter.set(counter.get() + 1);
            vec![1, 2, 3]
        }));
        let producer = Fill::new(source, 9, 1..);

        let cursor = producer.produce();
        assert_eq!(calls.get(), 0);
        assert_eq!(cursor.collect::<Vec<_>>(), vec![1, 9, 9]);
        assert_eq!(producer.produce().count(), 3);
        assert_eq!(calls.get(), 2);
    }
}
