use std::ops::Mul;

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::math::quat::same_rotation;

/// Homogeneous `w` values closer to zero than this are treated as directions.
const DIRECTION_EPSILON: f32 = 1e-6;

/// A rigid body transform: a rotation followed by a translation.
///
/// No scale, no shear. The rotation is kept as a unit quaternion; every
/// constructor normalizes it.
///
/// Composition follows matrix order: `a * b` applies `b` first, then `a`
/// in `a`'s parent frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
        }
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pure rotation.
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// Inverse transform: `t * t.inverse() == IDENTITY`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    /// Translation factor `T` of `self == T * R`.
    #[inline]
    #[must_use]
    pub fn trans_fact(&self) -> Self {
        Self::from_translation(self.translation)
    }

    /// Rotation factor `R` of `self == T * R`.
    #[inline]
    #[must_use]
    pub fn lin_fact(&self) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: self.rotation,
        }
    }

    /// Applies the transform to a point (`w = 1`).
    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// Applies the transform to a direction (`w = 0`): rotation only.
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Applies the transform to a homogeneous coordinate.
    ///
    /// The translation is only added when `w` is non-zero, so directions
    /// stay directions. `w` itself is passed through unchanged.
    #[must_use]
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let rotated = self.rotation * v.truncate();
        if v.w.abs() < DIRECTION_EPSILON {
            rotated.extend(v.w)
        } else {
            (rotated + self.translation * v.w).extend(v.w)
        }
    }

    /// Equivalent 4x4 matrix `T * R`.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Re-normalizes the rotation after a long chain of compositions.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(self.translation, self.rotation)
    }

    /// Component-wise comparison, treating `q` and `-q` as equal.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.translation.abs_diff_eq(other.translation, epsilon)
            && same_rotation(self.rotation, other.rotation, epsilon)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            translation: self.translation + self.rotation * rhs.translation,
            rotation: self.rotation * rhs.rotation,
        }
    }
}

impl Mul<&RigidTransform> for &RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: &RigidTransform) -> RigidTransform {
        *self * *rhs
    }
}

impl Mul<Vec4> for RigidTransform {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.transform_vec4(rhs)
    }
}

impl From<Vec3> for RigidTransform {
    fn from(translation: Vec3) -> Self {
        Self::from_translation(translation)
    }
}

impl From<Quat> for RigidTransform {
    fn from(rotation: Quat) -> Self {
        Self::from_rotation(rotation)
    }
}
