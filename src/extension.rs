//! Runtime registry of user-defined operators.
//!
//! [`List::extend`] registers an operator under a name for lists of one
//! element type; [`Queryable::apply_extension`](crate::list::Queryable::apply_extension)
//! and its helpers invoke it on any handle of that type.
//!
//! An [`Extension`] is one of two kinds:
//!
//! - [`Extension::deferred`]: builds a [`Producer`] from the handle and the
//!   arguments. Invoking it returns a new lazy [`List`], like a built-in
//!   chainable operator.
//! - [`Extension::eager`]: computes a value right away, like a built-in
//!   terminal operator.
//!
//! The registry starts empty and only grows. Names are unique per element
//! type, and the names of built-in operators are reserved. Handles are not
//! `Send`, so the registry is per thread.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::prelude::*;
//! use lazy_query::sequence::Generator;
//!
//! List::<i64>::extend(
//!     "every_nth",
//!     Extension::deferred(|list: &List<i64>, args: &[Value]| {
//!         let step = args.first().and_then(Value::as_number).unwrap_or(1.0) as usize;
//!         let list = list.clone();
//!         Generator::new(move || list.iter().step_by(step.max(1)))
//!     }),
//! )?;
//! List::<i64>::extend(
//!     "sum",
//!     Extension::eager(|list: &List<i64>, _: &[Value]| list.fold(0, |sum, item| sum + item)),
//! )?;
//!
//! let numbers = List::from(vec![1_i64, 2, 3, 4, 5]);
//! let odd_positions = numbers.chain_extension("every_nth", &[Value::from(2)])?;
//! assert_eq!(odd_positions.to_vec(), vec![1, 3, 5]);
//! assert_eq!(odd_positions.eval_extension::<i64>("sum", &[])?, 9);
//!
//! assert!(List::<i64>::extend("map", Extension::eager(|_: &List<i64>, _: &[Value]| ())).is_err());
//! # Ok::<(), QueryError>(())
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::QueryError;
use crate::list::List;
use crate::sequence::{Producer, Source};
use crate::value::Value;

/// Names of the built-in operators, which extensions may not reuse.
pub const BUILT_IN_OPERATORS: &[&str] = &[
    "add_front",
    "add_front_all",
    "all",
    "all_items",
    "any",
    "any_item",
    "apply",
    "apply_extension",
    "binary_contains",
    "chain_extension",
    "concat",
    "concat_all",
    "contains",
    "contains_by",
    "copy_within",
    "count",
    "count_where",
    "distinct",
    "distinct_by",
    "distinct_hashed",
    "empty",
    "equals",
    "equals_by",
    "eval_extension",
    "except",
    "except_by",
    "extend",
    "fill",
    "filter",
    "filter_map",
    "find_index",
    "find_last_index",
    "first",
    "first_where",
    "flat_map",
    "flatten",
    "fold",
    "fold_right",
    "from_fn",
    "from_vec",
    "group_by",
    "group_by_descending",
    "group_by_levels",
    "group_by_spec",
    "group_join",
    "group_join_by",
    "intersect",
    "intersect_by",
    "intersperse",
    "is_empty",
    "join",
    "join_by",
    "join_filter_map",
    "just",
    "last",
    "last_where",
    "map",
    "of_type",
    "ordered",
    "reduce",
    "repeat",
    "reverse",
    "sequence",
    "skip",
    "skip_while",
    "sort_by",
    "sort_by_descending",
    "sort_by_descending_with",
    "sort_by_spec",
    "sort_by_with",
    "take",
    "take_while",
    "then_by",
    "then_by_descending",
    "then_by_descending_with",
    "then_by_spec",
    "then_by_with",
    "to_evaluated_list",
    "to_map",
    "to_map_by",
    "to_set",
    "to_vec",
    "traverse",
    "union",
    "union_by",
    "unfold",
    "wrap",
    "zip",
];

/// Builds the producer of a deferred extension.
pub type DeferredBuilder<T> = Rc<dyn Fn(&List<T>, &[Value]) -> Rc<dyn Producer<T>>>;

/// Computes the result of an eager extension.
pub type EagerBuilder<T> = Rc<dyn Fn(&List<T>, &[Value]) -> Box<dyn Any>>;

/// A user-defined operator for lists of `T`.
pub enum Extension<T> {
    /// A lazy operator returning a new list.
    Deferred(DeferredBuilder<T>),
    /// A terminal operator returning a value.
    Eager(EagerBuilder<T>),
}

impl<T: 'static> Extension<T> {
    /// A lazy operator. `build` must not evaluate the list; it returns the
    /// producer that does.
    pub fn deferred<F, P>(build: F) -> Self
    where
        F: Fn(&List<T>, &[Value]) -> P + 'static,
        P: Producer<T> + 'static,
    {
        Self::Deferred(Rc::new(move |list: &List<T>, args: &[Value]| {
            Rc::new(build(list, args)) as Rc<dyn Producer<T>>
        }))
    }

    /// A terminal operator.
    pub fn eager<F, R>(build: F) -> Self
    where
        F: Fn(&List<T>, &[Value]) -> R + 'static,
        R: 'static,
    {
        Self::Eager(Rc::new(move |list: &List<T>, args: &[Value]| {
            Box::new(build(list, args)) as Box<dyn Any>
        }))
    }

    /// Returns `true` for [`Extension::Deferred`].
    #[inline]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T> Clone for Extension<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Deferred(build) => Self::Deferred(Rc::clone(build)),
            Self::Eager(build) => Self::Eager(Rc::clone(build)),
        }
    }
}

impl<T> fmt::Debug for Extension<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred(_) => formatter.write_str("Extension::Deferred(..)"),
            Self::Eager(_) => formatter.write_str("Extension::Eager(..)"),
        }
    }
}

/// The result of invoking an extension.
pub enum Extended<T> {
    /// The list returned by a deferred extension.
    List(List<T>),
    /// The value returned by an eager extension.
    Value(Box<dyn Any>),
}

impl<T> Extended<T> {
    /// Returns the list of a deferred extension.
    pub fn into_list(self) -> Option<List<T>> {
        match self {
            Self::List(list) => Some(list),
            Self::Value(_) => None,
        }
    }

    /// Returns the value of an eager extension if it has type `R`.
    pub fn downcast<R: 'static>(self) -> Option<R> {
        match self {
            Self::List(_) => None,
            Self::Value(value) => value.downcast::<R>().ok().map(|value| *value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Extended<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => formatter.debug_tuple("List").field(list).finish(),
            Self::Value(_) => formatter.write_str("Value(..)"),
        }
    }
}

type Operators = FxHashMap<String, Rc<dyn Any>>;

thread_local! {
    static REGISTRY: RefCell<FxHashMap<TypeId, Operators>> = RefCell::new(FxHashMap::default());
}

impl<T: Clone + 'static> List<T> {
    /// Registers an operator for lists of `T`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::ReservedOperator`] if `name` is a built-in operator
    /// - [`QueryError::OperatorAlreadyRegistered`] if an operator with this
    ///   name already exists for `T`
    pub fn extend(name: impl Into<String>, extension: Extension<T>) -> Result<(), QueryError> {
        let name = name.into();
        if BUILT_IN_OPERATORS.contains(&name.as_str()) {
            tracing::debug!(name = %name, "rejected extension with a built-in name");
            return Err(QueryError::ReservedOperator { name });
        }
        REGISTRY.with_borrow_mut(|registry| {
            let operators = registry.entry(TypeId::of::<T>()).or_default();
            if operators.contains_key(&name) {
                tracing::debug!(name = %name, "rejected duplicate extension");
                return Err(QueryError::OperatorAlreadyRegistered { name });
            }
            tracing::debug!(
                name = %name,
                element = std::any::type_name::<T>(),
                deferred = extension.is_deferred(),
                "registered extension"
            );
            operators.insert(name, Rc::new(extension));
            Ok(())
        })
    }

    /// Returns `true` if an operator named `name` is registered for `T`.
    pub fn is_extended(name: &str) -> bool {
        lookup::<T>(name).is_some()
    }
}

fn lookup<T: 'static>(name: &str) -> Option<Extension<T>> {
    REGISTRY.with_borrow(|registry| {
        registry
            .get(&TypeId::of::<T>())
            .and_then(|operators| operators.get(name))
            .and_then(|extension| extension.downcast_ref::<Extension<T>>())
            .cloned()
    })
}

/// Invokes the extension `name` on `list`.
///
/// The registry is not borrowed while the extension runs, so an extension
/// may itself invoke or register extensions.
pub(crate) fn apply<T: Clone + 'static>(
    list: &List<T>,
    name: &str,
    args: &[Value],
) -> Result<Extended<T>, QueryError> {
    let extension = lookup::<T>(name).ok_or_else(|| QueryError::UnknownOperator {
        name: name.to_owned(),
    })?;
    Ok(match extension {
        Extension::Deferred(build) => {
            Extended::List(List::from_source(Source::Deferred(build(list, args))))
        }
        Extension::Eager(build) => Extended::Value(build(list, args)),
    })
}
