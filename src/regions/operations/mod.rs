//! Element-wise boolean combinators applied to child masks.
//!
//! Every function broadcasts its operands with the same rules as position
//! arrays and fails with [`RegionError::ShapeMismatch`](crate::regions::RegionError)
//! when the masks cannot be aligned.

mod difference;
mod intersection;
mod symmetric_difference;
mod union;

pub use difference::combine_difference;
pub use intersection::combine_intersection;
pub use symmetric_difference::combine_symmetric_difference;
pub use union::combine_union;
