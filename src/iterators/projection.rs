//! Element-wise operators: map, filter, filter-map, flat-map, apply, intersperse.

use std::rc::Rc;

use crate::comparer::Predicate;
use crate::sequence::{Cursor, DrainOnce, ItemsCursor, Producer, Source};

/// Yields `function(item)` for every item.
pub struct Map<T, U> {
    source: Source<T>,
    function: Rc<dyn Fn(T) -> U>,
}

impl<T, U> Map<T, U> {
    /// Creates the operator.
    pub fn new<F: Fn(T) -> U + 'static>(source: Source<T>, function: F) -> Self {
        Self {
            source,
            function: Rc::new(function),
        }
    }
}

impl<T: Clone + 'static, U: 'static> Producer<U> for Map<T, U> {
    fn produce(&self) -> Cursor<U> {
        let function = Rc::clone(&self.function);
        Box::new(self.source.cursor().map(move |item| function(item)))
    }
}

/// Yields `value` for every item whose mapping returns `Some(value)`.
///
/// A mapping that has nothing to say for an item returns `None`, and the
/// item produces no output.
pub struct FilterMap<T, U> {
    source: Source<T>,
    function: Rc<dyn Fn(T) -> Option<U>>,
}

impl<T, U> FilterMap<T, U> {
    /// Creates the operator.
    pub fn new<F: Fn(T) -> Option<U> + 'static>(source: Source<T>, function: F) -> Self {
        Self {
            source,
            function: Rc::new(function),
        }
    }
}

impl<T: Clone + 'static, U: 'static> Producer<U> for FilterMap<T, U> {
    fn produce(&self) -> Cursor<U> {
        let function = Rc::clone(&self.function);
        Box::new(self.source.cursor().filter_map(move |item| function(item)))
    }
}

/// Yields the items the predicate accepts.
pub struct Filter<T> {
    source: Source<T>,
    predicate: Predicate<T>,
}

impl<T> Filter<T> {
    /// Creates the operator.
    pub fn new<P: Fn(&T) -> bool + 'static>(source: Source<T>, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<T: Clone + 'static> Producer<T> for Filter<T> {
    fn produce(&self) -> Cursor<T> {
        let predicate = Rc::clone(&self.predicate);
        Box::new(self.source.cursor().filter(move |item| predicate(item)))
    }
}

/// Maps every item to a sequence and yields the items of those sequences.
pub struct FlatMap<T, U> {
    source: Source<T>,
    function: Rc<dyn Fn(T) -> Cursor<U>>,
}

impl<T, U: 'static> FlatMap<T, U> {
    /// Creates the operator.
    pub fn new<I, F>(source: Source<T>, function: F) -> Self
    where
        F: Fn(T) -> I + 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
    {
        Self {
            source,
            function: Rc::new(move |item| Box::new(function(item).into_iter()) as Cursor<U>),
        }
    }
}

impl<T: Clone + 'static, U: 'static> Producer<U> for FlatMap<T, U> {
    fn produce(&self) -> Cursor<U> {
        let function = Rc::clone(&self.function);
        Box::new(self.source.cursor().flat_map(move |item| function(item)))
    }
}

/// Applies every function of a sequence of functions to every item.
///
/// Output is function-major: all results of the first function, then all
/// results of the second. The item source is drained on the first pull of a
/// pass and reused for each function.
pub struct Apply<T, F> {
    source: Source<T>,
    functions: Source<F>,
}

impl<T, F> Apply<T, F> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, functions: Source<F>) -> Self {
        Self { source, functions }
    }
}

impl<T, U, F> Producer<U> for Apply<T, F>
where
    T: Clone + 'static,
    U: 'static,
    F: Fn(T) -> U + Clone + 'static,
{
    fn produce(&self) -> Cursor<U> {
        let mut items = DrainOnce::new(self.source.clone());
        Box::new(self.functions.cursor().flat_map(move |function| {
            ItemsCursor::new(items.items()).map(move |item| function(item))
        }))
    }
}

/// Yields `separator` between every two consecutive items.
pub struct Intersperse<T> {
    source: Source<T>,
    separator: T,
}

impl<T> Intersperse<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, separator: T) -> Self {
        Self { source, separator }
    }
}

impl<T: Clone + 'static> Producer<T> for Intersperse<T> {
    fn produce(&self) -> Cursor<T> {
        Box::new(IntersperseCursor {
            inner: self.source.cursor(),
            separator: self.separator.clone(),
            pending: None,
            started: false,
        })
    }
}

struct IntersperseCursor<T> {
    inner: Cursor<T>,
    separator: T,
    pending: Option<T>,
    started: bool,
}

impl<T: Clone> Iterator for IntersperseCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if !self.started {
            self.started = true;
            return self.inner.next();
        }
        if let Some(item) = self.pending.take() {
            return Some(item);
        }
        let item = self.inner.next()?;
        self.pending = Some(item);
        Some(self.separator.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Generator, as_sequence};
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn map_applies_function() {
        let producer = Map::new(as_sequence(vec![1, 2, 3]), |item: i32| item * 10);
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[rstest]
    fn map_of_empty_is_empty() {
        let producer = Map::new(as_sequence(Vec::<i32>::new()), |item: i32| item + 1);
        assert_eq!(producer.produce().count(), 0);
    }

    #[rstest]
    fn filter_map_skips_none() {
        let producer = FilterMap::new(as_sequence(vec!["1", "x", "3"]), |item: &str| {
            item.parse::<i32>().ok()
        });
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[rstest]
    fn filter_keeps_accepted_items() {
        let producer = Filter::new(as_sequence(vec![0, 1, 2, 3]), |item: &i32| item % 2 == 0);
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[rstest]
    fn flat_map_flattens() {
        let producer = FlatMap::new(as_sequence(vec![1, 2]), |item: i32| vec![item; item as usize]);
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![1, 2, 2]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![1])]
    #[case(vec![1, 2, 3], vec![1, 0, 2, 0, 3])]
    fn intersperse_places_separators(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        let producer = Intersperse::new(as_sequence(input), 0);
        assert_eq!(producer.produce().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn apply_is_function_major() {
        let functions: Vec<fn(i32) -> i32> = vec![|item: i32| item + 1, |item: i32| item * 10];
        let producer = Apply::new(as_sequence(vec![1, 2, 3]), as_sequence(functions));
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![2, 3, 4, 10, 20, 30]);
    }

    #[rstest]
    fn apply_drains_items_once_per_pass() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let items: Source<i32> = Source::deferred(Generator::new(move || {
            counter.set(counter.get() + 1);
            vec![1, 2]
        }));
        let functions: Vec<fn(i32) -> i32> = vec![|item: i32| -item, |item: i32| item, |item: i32| item * item];
        let producer = Apply::new(items, as_sequence(functions));

        let mut cursor = producer.produce();
        assert_eq!(calls.get(), 0);
        assert_eq!(cursor.next(), Some(-1));
        assert_eq!(cursor.by_ref().count(), 5);
        assert_eq!(calls.get(), 1);

        assert_eq!(producer.produce().last(), Some(4));
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn apply_without_functions_never_pulls_items() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let items: Source<i32> = Source::deferred(Generator::new(move || {
            counter.set(counter.get() + 1);
            vec![1]
        }));
        let producer = Apply::new(items, as_sequence(Vec::<fn(i32) -> i32>::new()));
        assert_eq!(producer.produce().count(), 0);
        assert_eq!(calls.get(), 0);
    }
}
