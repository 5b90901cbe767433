//! Type constructors through Generic Associated Types.
//!
//! Rust cannot abstract over `Option<_>` or `Result<_, E>` as type
//! constructors directly. [`TypeConstructor`] recovers that ability with a
//! GAT: a type knows its element type and how to rebuild itself around
//! another one. The [`Container`](super::Container) protocol and the list
//! traversals are written against it.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::typeclass::TypeConstructor;
//!
//! fn empty_like<C: TypeConstructor>(_container: C) -> C::WithType<String>
//! where
//!     C::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none: Option<String> = empty_like(Some(42));
//! assert_eq!(none, None);
//! ```

/// A type constructor applied to [`Inner`](TypeConstructor::Inner).
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F`.
pub trait TypeConstructor {
    /// The element type, for example `i32` in `Option<i32>`.
    type Inner;

    /// The same constructor applied to `B`, for example `Option<B>`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}
