//! Traversing lists with effectful functions.
//!
//! `traverse` maps every item to a container and turns the list of
//! containers inside out: the result is one container holding all values,
//! or the first alternative met. `sequence` does the same for a list that
//! already holds containers.
//!
//! The generic forms work for any [`Container`]. The `_option` and
//! `_result` forms stop pulling the list at the first `None` or `Err`.

use super::Container;
use crate::list::{List, Queryable};

impl<T: Clone + 'static> List<T> {
    /// Applies `function` to every item and collects the values, or returns
    /// the first alternative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let halves = List::from(vec![2, 4, 6]).traverse(|n: i32| if n % 2 == 0 { Some(n / 2) } else { None });
    /// assert_eq!(halves, Some(vec![1, 2, 3]));
    ///
    /// let parsed = List::from(vec!["1", "x"]).traverse(|text: &str| text.parse::<i32>());
    /// assert!(parsed.is_err());
    /// ```
    pub fn traverse<C, F>(&self, function: F) -> C::WithType<Vec<C::Inner>>
    where
        C: Container,
        F: Fn(T) -> C,
        C::WithType<Vec<C::Inner>>: Container<
                Inner = Vec<C::Inner>,
                WithType<Vec<C::Inner>> = C::WithType<Vec<C::Inner>>,
            >,
    {
        let seed: C::WithType<Vec<C::Inner>> = C::pure(Vec::new());
        self.cursor().fold(seed, |accumulated, item| {
            let effect = function(item);
            accumulated.chain::<Vec<C::Inner>, _>(move |mut values| {
                effect.fmap(move |value| {
                    values.push(value);
                    values
                })
            })
        })
    }

    /// [`traverse`](List::traverse) for `Option`, stopping at the first
    /// `None`.
    pub fn traverse_option<U, F>(&self, function: F) -> Option<Vec<U>>
    where
        F: FnMut(T) -> Option<U>,
    {
        self.cursor().map(function).collect()
    }

    /// [`traverse`](List::traverse) for `Result`, stopping at the first
    /// `Err`.
    ///
    /// # Errors
    ///
    /// The first error returned by `function`.
    pub fn traverse_result<U, E, F>(&self, function: F) -> Result<Vec<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        self.cursor().map(function).collect()
    }
}

impl<C: Container + Clone + 'static> List<C> {
    /// Turns a list of containers into a container of a vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_query::prelude::*;
    ///
    /// let all_present = List::from(vec![Some(1), Some(2)]);
    /// assert_eq!(all_present.sequence(), Some(vec![1, 2]));
    ///
    /// let one_missing = List::from(vec![Some(1), None]);
    /// assert_eq!(one_missing.sequence(), None);
    /// ```
    pub fn sequence(&self) -> C::WithType<Vec<C::Inner>>
    where
        C::WithType<Vec<C::Inner>>: Container<
                Inner = Vec<C::Inner>,
                WithType<Vec<C::Inner>> = C::WithType<Vec<C::Inner>>,
            >,
    {
        self.traverse(|container| container)
    }
}

impl<U: Clone + 'static> List<Option<U>> {
    /// [`sequence`](List::sequence) for `Option`, stopping at the first
    /// `None`.
    pub fn sequence_option(&self) -> Option<Vec<U>> {
        self.traverse_option(|item| item)
    }
}

impl<U: Clone + 'static, E: Clone + 'static> List<Result<U, E>> {
    /// [`sequence`](List::sequence) for `Result`, stopping at the first
    /// `Err`.
    ///
    /// # Errors
    ///
    /// The first `Err` in the list.
    pub fn sequence_result(&self) -> Result<Vec<U>, E> {
        self.traverse_result(|item| item)
    }
}
