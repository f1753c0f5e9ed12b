//! Transform algebra.
//!
//! - [`RigidTransform`]: translation + unit quaternion, with composition,
//!   inversion and the `trans_fact` / `lin_fact` factorization
//! - [`QuatExt`]: real powers and pow-based slerp for `glam::Quat`

pub mod quat;
pub mod rigid;

pub use quat::{QuatExt, same_rotation};
pub use rigid::RigidTransform;
