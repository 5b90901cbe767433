//! Runtime-shape filtering for heterogeneous lists.
//!
//! A [`TypeMatcher`] describes what to keep:
//!
//! - [`TypeMatcher::Primitive`]: items of one [`Kind`]
//! - [`TypeMatcher::ExactValue`]: items equal to a reference value
//! - [`TypeMatcher::StructuralShape`]: records whose field names are exactly
//!   the given keys, in any order
//!
//! The structural check is strict in both directions. A record with an extra
//! field does not match, and neither does one with a missing field.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::iterators::TypeMatcher;
//! use lazy_query::value::{Kind, Value};
//!
//! let point = TypeMatcher::<Value>::shape(["x", "y"]);
//! assert!(point.matches(&Value::object([("y", Value::from(1)), ("x", Value::from(2))])));
//! assert!(!point.matches(&Value::object([("x", Value::from(2))])));
//! assert!(TypeMatcher::<Value>::Primitive(Kind::Number).matches(&Value::from(3)));
//! ```

use crate::sequence::{Cursor, Producer, Source};
use crate::value::{Kind, Shaped};

/// A runtime type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMatcher<T> {
    /// Matches every item of the given kind.
    Primitive(Kind),
    /// Matches items equal to the given value.
    ExactValue(T),
    /// Matches records whose field-name set equals the given keys.
    StructuralShape(Vec<String>),
}

impl<T> TypeMatcher<T> {
    /// Builds a [`TypeMatcher::StructuralShape`] from any list of keys.
    pub fn shape<K, I>(keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        Self::StructuralShape(keys.into_iter().map(Into::into).collect())
    }
}

impl<T: Shaped + PartialEq> TypeMatcher<T> {
    /// Tests one item against the descriptor.
    pub fn matches(&self, item: &T) -> bool {
        match self {
            Self::Primitive(kind) => item.kind() == *kind,
            Self::ExactValue(value) => item == value,
            Self::StructuralShape(keys) => item.field_names().is_some_and(|fields| {
                keys.iter().all(|key| fields.contains(&key.as_str()))
                    && fields
                        .iter()
                        .all(|field| keys.iter().any(|key| key == field))
            }),
        }
    }
}

/// Yields the items a [`TypeMatcher`] accepts.
pub struct OfType<T> {
    source: Source<T>,
    matcher: TypeMatcher<T>,
}

impl<T> OfType<T> {
    /// Creates the operator.
    pub const fn new(source: Source<T>, matcher: TypeMatcher<T>) -> Self {
        Self { source, matcher }
    }
}

impl<T: Shaped + PartialEq + Clone + 'static> Producer<T> for OfType<T> {
    fn produce(&self) -> Cursor<T> {
        let matcher = self.matcher.clone();
        Box::new(self.source.cursor().filter(move |item| matcher.matches(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::as_sequence;
    use crate::value::Value;
    use rstest::rstest;

    fn mixed() -> Vec<Value> {
        vec![
            Value::from(1),
            Value::from("one"),
            Value::object([("id", Value::from(1))]),
            Value::object([("id", Value::from(2)), ("name", Value::from("b"))]),
            Value::Null,
            Value::from(2),
        ]
    }

    #[rstest]
    #[case(Kind::Number, 2)]
    #[case(Kind::String, 1)]
    #[case(Kind::Object, 2)]
    #[case(Kind::Null, 1)]
    #[case(Kind::Array, 0)]
    fn primitive_matches_kind(#[case] kind: Kind, #[case] expected: usize) {
        let producer = OfType::new(as_sequence(mixed()), TypeMatcher::Primitive(kind));
        assert_eq!(producer.produce().count(), expected);
    }

    #[rstest]
    fn exact_value_matches_equal_items() {
        let producer = OfType::new(as_sequence(mixed()), TypeMatcher::ExactValue(Value::from(2)));
        assert_eq!(producer.produce().collect::<Vec<_>>(), vec![Value::from(2)]);
    }

    #[rstest]
    #[case(vec!["id"], 1)]
    #[case(vec!["name", "id"], 1)]
    #[case(vec!["id", "name", "extra"], 0)]
    #[case(vec![], 0)]
    fn structural_shape_requires_exact_key_set(#[case] keys: Vec<&str>, #[case] expected: usize) {
        let producer = OfType::new(as_sequence(mixed()), TypeMatcher::shape(keys));
        assert_eq!(producer.produce().count(), expected);
    }

    #[rstest]
    fn empty_shape_matches_empty_record() {
        let empty = Value::object(Vec::<(String, Value)>::new());
        assert!(TypeMatcher::<Value>::StructuralShape(Vec::new()).matches(&empty));
        assert!(!TypeMatcher::<Value>::StructuralShape(Vec::new()).matches(&Value::from(1)));
    }
}
