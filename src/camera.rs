//! Perspective projection of the editor viewport.
//!
//! The eye itself is a transform node in the scene; this module only holds
//! the viewport size and frustum parameters, and the conversions between
//! screen pixels and eye space that picking and the arcball need.

use glam::{Mat4, Vec2, Vec3};

/// Eye-space depths closer to zero than this are treated as "at the eye".
const DEPTH_EPSILON: f32 = 1e-8;

/// Frustum and viewport of the editor camera.
///
/// The vertical field of view is derived from the window shape: for
/// landscape windows it equals [`Projection::min_fov_y`]; for portrait
/// windows it widens so the horizontal extent never drops below that angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    min_fov_y: f32,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl Projection {
    /// Creates a projection; `min_fov_y` is in degrees, `near` and `far` are
    /// positive distances.
    #[must_use]
    pub fn new(width: u32, height: u32, min_fov_y: f32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            width: width.max(1),
            height: height.max(1),
            min_fov_y,
            fov_y: min_fov_y,
            near,
            far,
        };
        projection.update_fov_y();
        projection
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.update_fov_y();
        log::debug!("Viewport resized to {}x{}", self.width, self.height);
    }

    /// Recomputes the vertical field of view from the window shape.
    pub fn update_fov_y(&mut self) {
        if self.width >= self.height {
            self.fov_y = self.min_fov_y;
        } else {
            let half = self.min_fov_y.to_radians() * 0.5;
            let widened = (half.sin() * self.height as f32 / self.width as f32).atan2(half.cos());
            self.fov_y = (widened * 2.0).to_degrees();
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn min_fov_y(&self) -> f32 {
        self.min_fov_y
    }

    /// Current vertical field of view, in degrees.
    #[inline]
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    #[inline]
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// OpenGL style perspective matrix (clip z in `[-1, 1]`).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect(), self.near, self.far)
    }

    /// World units per pixel at eye-space depth `z` (negative in front of
    /// the eye).
    #[must_use]
    pub fn screen_to_eye_scale(&self, z: f32) -> f32 {
        -(z * (self.fov_y.to_radians() * 0.5).tan()) * 2.0 / self.height as f32
    }

    /// Pixel coordinates (origin bottom-left) of an eye-space point, or
    /// `None` when the point is not in front of the eye.
    #[must_use]
    pub fn screen_space_coord(&self, point: Vec3) -> Option<Vec2> {
        if point.z > -DEPTH_EPSILON {
            return None;
        }
        let ndc = self.projection_matrix().project_point3(point);
        let w = self.width as f32;
        let h = self.height as f32;
        Some(Vec2::new(
            ndc.x * w * 0.5 + (w - 1.0) * 0.5,
            ndc.y * h * 0.5 + (h - 1.0) * 0.5,
        ))
    }

    /// Arcball radius in pixels for the given fraction of the smaller side.
    #[must_use]
    pub fn arcball_screen_radius(&self, factor: f32) -> f32 {
        factor * self.width.min(self.height) as f32
    }
}
