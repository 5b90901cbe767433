//! Dynamic values for heterogeneous lists.
//!
//! [`Value`] is a JSON-like value with `Rc`-shared payloads, so cloning a
//! value (which every cursor does when it reads a concrete array) is O(1).
//! Its [`Ord`] implementation is the generic value comparer used when
//! heterogeneous data is sorted or grouped: numbers compare numerically with
//! `NaN` after every other number, strings lexicographically, booleans
//! `false < true`, arrays element-wise, records entry by entry in key order,
//! and values of different kinds by kind rank. Equality agrees with that
//! order, so `NaN` equals `NaN` and records with the same fields are equal
//! whatever their insertion order.
//!
//! [`Shaped`] is the runtime-shape protocol consumed by the `of_type`
//! operator.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::value::{Kind, Shaped, Value};
//!
//! let record = Value::object([("id", Value::from(1)), ("name", Value::from("ada"))]);
//! assert_eq!(record.kind(), Kind::Object);
//! assert_eq!(record.get("name"), Some(&Value::from("ada")));
//! assert!(Value::from(1) < Value::from(2.5));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// The runtime kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// The absent value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number.
    Number,
    /// A string.
    String,
    /// An ordered sequence.
    Array,
    /// A keyed record.
    Object,
}

impl Kind {
    /// Returns the lowercase tag name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Runtime shape inspection.
///
/// Implemented by dynamic value types so that `of_type` can filter a
/// heterogeneous list by kind or by record shape.
pub trait Shaped {
    /// The kind of the value.
    fn kind(&self) -> Kind;

    /// The field names of a record, or `None` for non-records.
    fn field_names(&self) -> Option<Vec<&str>>;
}

/// A dynamic, JSON-like value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(Rc<str>),
    /// An ordered sequence of values.
    Array(Rc<Vec<Value>>),
    /// An insertion-ordered record.
    Object(Rc<IndexMap<String, Value>>),
}

impl Value {
    /// Builds a record from key/value pairs, keeping insertion order.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(Rc::new(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Builds an array.
    pub fn array<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::Array(Rc::new(items.into_iter().collect()))
    }

    /// Looks up a record field.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Shaped for Value {
    fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    fn field_names(&self) -> Option<Vec<&str>> {
        match self {
            Self::Object(fields) => Some(fields.keys().map(String::as_str).collect()),
            _ => None,
        }
    }
}

fn compare_numbers(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (left_nan, right_nan) => left_nan.cmp(&right_nan),
    }
}

fn entries_by_key(fields: &IndexMap<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

fn compare_records(left: &IndexMap<String, Value>, right: &IndexMap<String, Value>) -> Ordering {
    entries_by_key(left).cmp(&entries_by_key(right))
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => compare_numbers(*left, *right),
            (Self::String(left), Self::String(right)) => left.cmp(right),
            (Self::Array(left), Self::Array(right)) => {
                if Rc::ptr_eq(left, right) {
                    Ordering::Equal
                } else {
                    left.iter().cmp(right.iter())
                }
            }
            (Self::Object(left), Self::Object(right)) => {
                if Rc::ptr_eq(left, right) {
                    Ordering::Equal
                } else {
                    compare_records(left, right)
                }
            }
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(string) => write!(formatter, "{string:?}"),
            Self::Array(items) => {
                formatter.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                formatter.write_str("]")
            }
            Self::Object(fields) => {
                formatter.write_str("{")?;
                for (index, (key, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                formatter.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(Rc::new(items))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::{Kind, Shaped, Value};
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Null => serializer.serialize_unit(),
                Self::Bool(boolean) => serializer.serialize_bool(*boolean),
                Self::Number(number) => serializer.serialize_f64(*number),
                Self::String(string) => serializer.serialize_str(string),
                Self::Array(items) => {
                    let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                    for item in items.iter() {
                        sequence.serialize_element(item)?;
                    }
                    sequence.end()
                }
                Self::Object(fields) => {
                    let mut map = serializer.serialize_map(Some(fields.len()))?;
                    for (key, value) in fields.iter() {
                        map.serialize_entry(key, value)?;
                    }
                    map.end()
                }
            }
        }
    }

    impl Shaped for serde_json::Value {
        fn kind(&self) -> Kind {
            match self {
                Self::Null => Kind::Null,
                Self::Bool(_) => Kind::Boolean,
                Self::Number(_) => Kind::Number,
                Self::String(_) => Kind::String,
                Self::Array(_) => Kind::Array,
                Self::Object(_) => Kind::Object,
            }
        }

        fn field_names(&self) -> Option<Vec<&str>> {
            self.as_object()
                .map(|fields| fields.keys().map(String::as_str).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, Kind::Null)]
    #[case(Value::from(true), Kind::Boolean)]
    #[case(Value::from(1), Kind::Number)]
    #[case(Value::from("text"), Kind::String)]
    #[case(Value::array([Value::from(1)]), Kind::Array)]
    #[case(Value::object([("a", Value::Null)]), Kind::Object)]
    fn kind_matches_variant(#[case] value: Value, #[case] expected: Kind) {
        assert_eq!(value.kind(), expected);
    }

    #[rstest]
    fn numbers_compare_numerically() {
        assert!(Value::from(2) < Value::from(10));
        assert_eq!(Value::from(-0.0), Value::from(0.0));
    }

    #[rstest]
    #[case(Value::from(f64::NAN), Value::from(1), Ordering::Greater)]
    #[case(Value::from(f64::INFINITY), Value::from(f64::NAN), Ordering::Less)]
    #[case(Value::from(f64::NAN), Value::from(f64::NAN), Ordering::Equal)]
    #[case(Value::from(f64::NAN), Value::from("1"), Ordering::Less)]
    fn nan_ranks_after_every_other_number(#[case] left: Value, #[case] right: Value, #[case] expected: Ordering) {
        assert_eq!(left.cmp(&right), expected);
        assert_eq!(right.cmp(&left), expected.reverse());
    }

    #[rstest]
    fn records_compare_by_sorted_entries() {
        let first = Value::object([("b", Value::from(1)), ("a", Value::from(2))]);
        let reordered = Value::object([("a", Value::from(2)), ("b", Value::from(1))]);
        let larger = Value::object([("a", Value::from(3))]);
        let smaller = Value::object([("a", Value::from(2))]);

        assert_eq!(first.cmp(&reordered), Ordering::Equal);
        assert_eq!(first, reordered);
        assert!(smaller < first);
        assert!(first < larger);
        assert!(Value::array([Value::from(1)]) < smaller);
    }

    #[rstest]
    fn mixed_values_sort_without_panicking() {
        let mut values: Vec<Value> = (0..30)
            .map(|index| match index % 5 {
                0 => Value::from(f64::NAN),
                1 => Value::object([("n", Value::from(index % 3))]),
                2 => Value::array([Value::from(f64::NAN), Value::from(index)]),
                3 => Value::from(index),
                _ => Value::Null,
            })
            .collect();
        values.sort();

        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        let kinds: Vec<Kind> = values.iter().map(Shaped::kind).collect();
        assert!(kinds.windows(2).all(|pair| pair[0] <= pair[1]));
        let numbers: Vec<&Value> = values.iter().filter(|value| value.kind() == Kind::Number).collect();
        assert!(numbers[6..].iter().all(|value| value.as_number().is_some_and(f64::is_nan)));
    }

    #[rstest]
    fn strings_compare_lexicographically() {
        assert!(Value::from("apple") < Value::from("banana"));
    }

    #[rstest]
    fn mixed_kinds_compare_by_rank() {
        assert!(Value::Null < Value::from(false));
        assert!(Value::from(100) < Value::from("1"));
    }

    #[rstest]
    fn object_keeps_insertion_order() {
        let record = Value::object([("z", Value::from(1)), ("a", Value::from(2))]);
        assert_eq!(record.field_names(), Some(vec!["z", "a"]));
        assert_eq!(record.to_string(), "{z: 1, a: 2}");
    }

    #[rstest]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[rstest]
    fn clone_shares_payload() {
        let array = Value::array([Value::from(1), Value::from(2)]);
        let copy = array.clone();
        match (&array, &copy) {
            (Value::Array(left), Value::Array(right)) => assert!(Rc::ptr_eq(left, right)),
            _ => unreachable!(),
        }
    }
}
