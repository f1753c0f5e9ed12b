//! Arcball rotation widget.
//!
//! A drag from pixel `a` to pixel `b` is lifted onto a virtual sphere of
//! fixed screen radius centered on the widget, and turned into the rotation
//! taking one sphere point to the other.

use glam::{Quat, Vec2, Vec3};

use crate::camera::Projection;
use crate::math::QuatExt;

/// Initial world scale, before the first frame has been drawn.
const INITIAL_SCALE: f32 = 0.001;

/// Lifts a pixel offset from the arcball center onto the unit sphere.
///
/// Offsets outside the radius land on the silhouette (`z = 0`). A zero
/// offset gives the zero vector.
#[must_use]
pub fn sphere_point(offset: Vec2, radius: f32) -> Vec3 {
    let z_sq = radius * radius - offset.length_squared();
    let z = if z_sq > 0.0 { z_sq.sqrt() } else { 0.0 };
    offset.extend(z).normalize_or_zero()
}

/// Rotation dragging sphere point `from` to sphere point `to`.
///
/// Built as `(from·to, from×to)`, which rotates by twice the angle between
/// the points. Degenerate inputs give the identity.
#[must_use]
pub fn arcball_rotation(from: Vec3, to: Vec3) -> Quat {
    if from == Vec3::ZERO || to == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_scalar_vector(from.dot(to), from.cross(to)).normalize()
}

/// On-screen size of the arcball and the matching world scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcball {
    /// Radius in pixels.
    pub screen_radius: f32,
    /// World units per pixel at the arcball center.
    pub scale: f32,
}

impl Arcball {
    #[must_use]
    pub fn new(screen_radius: f32) -> Self {
        Self {
            screen_radius,
            scale: INITIAL_SCALE,
        }
    }

    /// Re-derives the world scale from the eye-space depth of the center, so
    /// the widget keeps its screen size as the eye moves.
    pub fn update_scale(&mut self, projection: &Projection, eye_depth: f32) {
        self.scale = projection.screen_to_eye_scale(eye_depth);
    }

    /// Sphere radius in world units.
    #[must_use]
    pub fn world_radius(&self) -> f32 {
        self.scale * self.screen_radius
    }

    /// Rotation for a drag from `from` to `to`, all in GL pixel coordinates.
    #[must_use]
    pub fn rotation(&self, center: Vec2, from: Vec2, to: Vec2) -> Quat {
        let v1 = sphere_point(from - center, self.screen_radius);
        let v2 = sphere_point(to - center, self.screen_radius);
        arcball_rotation(v1, v2)
    }
}
