//! Interop with single-value containers.
//!
//! Lists consume `Option`, `Result` and [`Identity`] through a minimal
//! protocol:
//!
//! - [`TypeConstructor`]: GAT-based emulation of higher-kinded types, so a
//!   container can be rebuilt around another element type
//! - [`Container`]: `pure`, `fmap`, `chain` and `fold`
//!
//! On top of it, `List::traverse` and `List::sequence` turn a list of
//! containers inside out.
//!
//! # Examples
//!
//! ```rust
//! use lazy_query::prelude::*;
//!
//! let inputs = List::from(vec!["3", "4"]);
//! let numbers: Result<Vec<i32>, _> = inputs.traverse(|text: &str| text.parse::<i32>());
//! assert_eq!(numbers, Ok(vec![3, 4]));
//!
//! let wrapped = List::from(vec![Identity(1), Identity(2)]);
//! assert_eq!(wrapped.sequence(), Identity(vec![1, 2]));
//! ```

mod container;
mod higher;
mod identity;
mod traverse;

pub use container::Container;
pub use higher::TypeConstructor;
pub use identity::Identity;
