//! Error types for the query engine.
//!
//! Callback failures are not represented here: a selector, comparer or
//! projector that panics unwinds out of the pull that invoked it. The errors
//! below cover the library's own contracts, which are all about the
//! extension registry.

use thiserror::Error;

/// Represents errors raised by the extension registry.
///
/// # Examples
///
/// ```rust
/// use lazy_query::QueryError;
///
/// let error = QueryError::UnknownOperator { name: "median".to_string() };
/// assert_eq!(
///     error.to_string(),
///     "no operator named `median` is registered for this element type"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// An extension with this name is already registered for the element type.
    #[error("operator `{name}` is already registered")]
    OperatorAlreadyRegistered {
        /// The rejected name.
        name: String,
    },
    /// The name belongs to a built-in operator.
    #[error("`{name}` is a built-in operator and cannot be redefined")]
    ReservedOperator {
        /// The rejected name.
        name: String,
    },
    /// No extension with this name exists for the element type.
    #[error("no operator named `{name}` is registered for this element type")]
    UnknownOperator {
        /// The requested name.
        name: String,
    },
    /// The extension produced a result of another shape or type.
    #[error("operator `{name}` did not produce {expected}")]
    UnexpectedResult {
        /// The invoked name.
        name: String,
        /// What the caller asked for.
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn already_registered_display() {
        let error = QueryError::OperatorAlreadyRegistered {
            name: "median".to_string(),
        };
        assert_eq!(error.to_string(), "operator `median` is already registered");
    }

    #[rstest]
    fn reserved_display() {
        let error = QueryError::ReservedOperator {
            name: "map".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "`map` is a built-in operator and cannot be redefined"
        );
    }

    #[rstest]
    fn unexpected_result_display() {
        let error = QueryError::UnexpectedResult {
            name: "median".to_string(),
            expected: "a list",
        };
        assert_eq!(error.to_string(), "operator `median` did not produce a list");
    }
}
