//! The single-value container protocol.
//!
//! A [`Container`] holds either one value or an alternative (nothing, an
//! error). Lists only ever talk to containers through the four operations
//! below, which is all `traverse` and `sequence` need.
//!
//! | Container | `Alternative` |
//! |---|---|
//! | `Option<A>` | `()` |
//! | `Result<A, E>` | `E` |
//! | `Identity<A>` | [`Infallible`] |

use std::convert::Infallible;

use super::{Identity, TypeConstructor};

/// A container of at most one value.
///
/// # Laws
///
/// - `C::pure(a).chain(f) == f(a)`
/// - `c.chain(C::pure) == c`
/// - `c.fmap(f) == c.chain(|a| C::pure(f(a)))`
///
/// # Examples
///
/// ```rust
/// use lazy_query::typeclass::Container;
///
/// let halved = Some(10).chain(|n| if n % 2 == 0 { Some(n / 2) } else { None });
/// assert_eq!(halved, Some(5));
///
/// let described = Err::<i32, _>("boom").fold(|error| format!("failed: {error}"), |n| n.to_string());
/// assert_eq!(described, "failed: boom");
/// ```
pub trait Container: TypeConstructor {
    /// What the container holds when it holds no value.
    type Alternative;

    /// Wraps a value.
    fn pure<B>(value: B) -> Self::WithType<B>;

    /// Maps the value, leaving an alternative untouched.
    fn fmap<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> B;

    /// Maps the value to another container of the same kind and flattens.
    fn chain<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;

    /// Eliminates the container.
    fn fold<R, A, V>(self, on_alternative: A, on_value: V) -> R
    where
        A: FnOnce(Self::Alternative) -> R,
        V: FnOnce(Self::Inner) -> R;
}

impl<T> Container for Option<T> {
    type Alternative = ();

    #[inline]
    fn pure<B>(value: B) -> Option<B> {
        Some(value)
    }

    #[inline]
    fn fmap<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(T) -> B,
    {
        self.map(function)
    }

    #[inline]
    fn chain<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(T) -> Option<B>,
    {
        self.and_then(function)
    }

    fn fold<R, A, V>(self, on_alternative: A, on_value: V) -> R
    where
        A: FnOnce(()) -> R,
        V: FnOnce(T) -> R,
    {
        match self {
            Some(value) => on_value(value),
            None => on_alternative(()),
        }
    }
}

impl<T, E> Container for Result<T, E> {
    type Alternative = E;

    #[inline]
    fn pure<B>(value: B) -> Result<B, E> {
        Ok(value)
    }

    #[inline]
    fn fmap<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> B,
    {
        self.map(function)
    }

    #[inline]
    fn chain<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> Result<B, E>,
    {
        self.and_then(function)
    }

    fn fold<R, A, V>(self, on_alternative: A, on_value: V) -> R
    where
        A: FnOnce(E) -> R,
        V: FnOnce(T) -> R,
    {
        match self {
            Ok(value) => on_value(value),
            Err(error) => on_alternative(error),
        }
    }
}

impl<T> Container for Identity<T> {
    type Alternative = Infallible;

    #[inline]
    fn pure<B>(value: B) -> Identity<B> {
        Identity(value)
    }

    #[inline]
    fn fmap<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(T) -> B,
    {
        Identity(function(self.0))
    }

    #[inline]
    fn chain<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(T) -> Identity<B>,
    {
        function(self.0)
    }

    fn fold<R, A, V>(self, _on_alternative: A, on_value: V) -> R
    where
        A: FnOnce(Infallible) -> R,
        V: FnOnce(T) -> R,
    {
        on_value(self.0)
    }
}
