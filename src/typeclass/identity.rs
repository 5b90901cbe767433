//! The identity container.
//!
//! [`Identity`] wraps one value and adds no effect. Traversing a list with a
//! function returning `Identity` is a plain map, which makes it the baseline
//! the other containers are checked against.

use super::TypeConstructor;

/// Wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use lazy_query::typeclass::Identity;
///
/// let wrapped = Identity::new(42);
/// assert_eq!(wrapped.into_inner(), 42);
/// assert_eq!(Identity(7).0, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Wraps `value`.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Borrows the wrapped value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }
}

impl<A> TypeConstructor for Identity<A> {
    type Inner = A;
    type WithType<B> = Identity<B>;
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_and_into_inner_round_trip_the_value() {
        assert_eq!(Identity::new(String::from("hello")).into_inner(), "hello");
    }

    #[rstest]
    fn as_inner_borrows() {
        let wrapped = Identity::new(vec![1, 2, 3]);
        assert_eq!(wrapped.as_inner(), &vec![1, 2, 3]);
    }

    #[rstest]
    fn from_wraps() {
        let wrapped: Identity<char> = 'x'.into();
        assert_eq!(wrapped, Identity('x'));
    }
}
