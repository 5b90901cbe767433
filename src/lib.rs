//! # lazy-query
//!
//! Deferred, LINQ-style query lists for Rust.
//!
//! ## Overview
//!
//! A [`List`](list::List) wraps either materialized items or a restartable
//! producer. Chainable operators build new lists without pulling anything;
//! terminal operators evaluate the pipeline. Every iteration of a deferred
//! list restarts it from scratch.
//!
//! - **Projection and filtering**: `map`, `filter_map`, `filter`, `flat_map`,
//!   `flatten`, `apply`
//! - **Rewriting**: `fill` and `copy_within` over relative ranges
//! - **Set operators**: `distinct`, `union`, `except`, `intersect`
//! - **Correlation**: `join`, `group_join`, `zip`
//! - **Ordering**: stable multi-key sorts with `sort_by` / `then_by`
//! - **Grouping**: nested, sorted groups with a key per bucket
//! - **Extensions**: user operators registered by name per element type
//!
//! ## Feature Flags
//!
//! - `typeclass`: `traverse` and `sequence` over `Option`, `Result` and
//!   `Identity` (enabled by default)
//! - `serde`: serialization of lists and groups, plus [`Shaped`](value::Shaped)
//!   for `serde_json::Value`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_query::prelude::*;
//!
//! let words = List::from(vec!["pear", "fig", "apple", "kiwi"]);
//! let by_length = words.sort_by(|word: &&str| word.len()).then_by(|word: &&str| *word);
//! assert_eq!(by_length.to_vec(), vec!["fig", "kiwi", "pear", "apple"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::type_complexity)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lazy_query::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::QueryError;
    pub use crate::extension::{Extended, Extension};
    pub use crate::iterators::TypeMatcher;
    pub use crate::list::{GroupNode, GroupedList, List, OrderedList, Queryable};
    pub use crate::sort::{KeySpec, SortDirection};
    pub use crate::value::{Kind, Shaped, Value};

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::{Container, Identity, TypeConstructor};
}

pub mod comparer;
pub mod error;
pub mod extension;
pub mod factory;
pub mod group;
pub mod iterators;
pub mod list;
pub mod sequence;
pub mod sort;
pub mod value;

#[cfg(feature = "typeclass")]
pub mod typeclass;

pub use error::QueryError;

// Handles share state through `Rc` and are confined to one thread.
static_assertions::assert_not_impl_any!(list::List<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(list::OrderedList<i32>: Send, Sync);
