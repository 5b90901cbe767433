//! Deferred per-operator transformations.
//!
//! Every type in this module implements [`Producer`](crate::sequence::Producer):
//! constructing one does no work, and every call to `produce` returns a fresh
//! cursor that re-runs the operator over its upstream [`Source`](crate::sequence::Source).
//! The list handles in [`crate::list`] are thin wrappers that chain these
//! producers together.
//!
//! Operators that need a second sequence in full (set membership, joins,
//! zip) drain it once per pass, on the first pull, and never before.

mod concatenation;
mod correlation;
mod of_type;
mod overwrite;
mod partition;
mod projection;
mod reverse;
mod set;

pub use concatenation::{AddFront, Concat};
pub use correlation::{GroupJoin, Join, KeyComparer, Zip};
pub use of_type::{OfType, TypeMatcher};
pub use overwrite::{CopyWithin, Fill, resolve_range};
pub use partition::{Prefix, Skip, Take};
pub use projection::{Apply, FilterMap, Filter, FlatMap, Intersperse, Map};
pub use reverse::Reverse;
pub use set::{Distinct, DistinctHashed, Except, Intersect, Union};
