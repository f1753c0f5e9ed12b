//! Quaternion operations missing from `glam::Quat`.
//!
//! `glam` covers the Hamilton product, conjugation and vector rotation. The
//! keyframe interpolation additionally needs a real-valued power, which is
//! defined here through the angle-axis decomposition, and a slerp built on
//! top of it.

use glam::{Quat, Vec3};

/// Below this norm the vector part is treated as zero (no rotation axis).
pub const AXIS_EPSILON: f32 = 1e-6;

/// Extension methods over [`Quat`].
pub trait QuatExt: Sized {
    /// Raises a unit quaternion to a real power.
    ///
    /// The rotation angle is scaled by `exponent` around the same axis, so
    /// `q.pow(1.0) == q`, `q.pow(0.0) == IDENTITY` and `q.pow(-1.0) == q⁻¹`.
    #[must_use]
    fn pow(self, exponent: f32) -> Self;

    /// Flips the sign so the scalar part is non-negative.
    ///
    /// `q` and `-q` are the same rotation; the canonical one is the short way
    /// round when used as a relative rotation.
    #[must_use]
    fn canonical(self) -> Self;

    /// Shortest-arc spherical interpolation from `self` to `to`.
    ///
    /// Computed as `canonical(to * self⁻¹)^alpha * self`.
    #[must_use]
    fn arc_slerp(self, to: Self, alpha: f32) -> Self;

    /// Rotation of `degrees` about the X axis.
    #[must_use]
    fn from_x_degrees(degrees: f32) -> Self;

    /// Rotation of `degrees` about the Y axis.
    #[must_use]
    fn from_y_degrees(degrees: f32) -> Self;

    /// Builds `(w, v)` directly from a scalar and a vector part.
    ///
    /// With unit `a`, `b` the pair `(a·b, a×b)` is the rotation taking `a` to
    /// `b` applied twice, which is what the arcball uses.
    #[must_use]
    fn from_scalar_vector(w: f32, v: Vec3) -> Self;
}

impl QuatExt for Quat {
    fn pow(self, exponent: f32) -> Self {
        let axis = self.xyz();
        let sin_half = axis.length();
        if sin_half < AXIS_EPSILON {
            return Quat::IDENTITY;
        }
        let half_angle = sin_half.atan2(self.w);
        let axis = axis / sin_half;
        let scaled = half_angle * exponent;
        Quat::from_scalar_vector(scaled.cos(), axis * scaled.sin())
    }

    fn canonical(self) -> Self {
        if self.w < 0.0 { -self } else { self }
    }

    fn arc_slerp(self, to: Self, alpha: f32) -> Self {
        (to * self.inverse()).canonical().pow(alpha) * self
    }

    fn from_x_degrees(degrees: f32) -> Self {
        Quat::from_rotation_x(degrees.to_radians())
    }

    fn from_y_degrees(degrees: f32) -> Self {
        Quat::from_rotation_y(degrees.to_radians())
    }

    fn from_scalar_vector(w: f32, v: Vec3) -> Self {
        Quat::from_xyzw(v.x, v.y, v.z, w)
    }
}

/// Compares two rotations up to the `q` / `-q` ambiguity.
#[must_use]
pub fn same_rotation(a: Quat, b: Quat, epsilon: f32) -> bool {
    a.abs_diff_eq(b, epsilon) || a.abs_diff_eq(-b, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_halves_the_angle() {
        let q = Quat::from_rotation_z(1.2);
        let half = q.pow(0.5);
        assert!(half.abs_diff_eq(Quat::from_rotation_z(0.6), 1e-5));
    }

    #[test]
    fn pow_of_identity_is_identity() {
        assert_eq!(Quat::IDENTITY.pow(0.3), Quat::IDENTITY);
    }

    #[test]
    fn canonical_has_non_negative_w() {
        let q = Quat::from_xyzw(0.0, 0.6, 0.0, -0.8);
        assert!(q.canonical().w >= 0.0);
        assert!(same_rotation(q, q.canonical(), 1e-6));
    }
}
