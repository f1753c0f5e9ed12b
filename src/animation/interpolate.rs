//! Keyframe interpolation.
//!
//! Segment `i` runs from `F[i]` to `F[i+1]`. Its two inner control points
//! are derived Catmull-Rom style from the neighbouring keyframes `F[i-1]`
//! and `F[i+2]`, then the cubic Bezier is evaluated at `alpha`: as a
//! Bernstein polynomial for translations, by De Casteljau with slerp for
//! rotations.

use glam::{Quat, Vec3};

use crate::animation::frame::Frame;
use crate::animation::track::Animation;
use crate::math::{QuatExt, RigidTransform};

const SIXTH: f32 = 1.0 / 6.0;

pub trait Interpolatable: Copy {
    /// Inner Bezier control points `(d, e)` of the segment `from -> to`.
    fn control_points(prev: Self, from: Self, to: Self, next: Self) -> (Self, Self);

    /// Cubic Bezier through `from`, `d`, `e`, `to` at `alpha` in `[0, 1]`.
    fn bezier(from: Self, d: Self, e: Self, to: Self, alpha: f32) -> Self;

    fn interpolate(prev: Self, from: Self, to: Self, next: Self, alpha: f32) -> Self {
        let (d, e) = Self::control_points(prev, from, to, next);
        Self::bezier(from, d, e, to, alpha)
    }
}

impl Interpolatable for Vec3 {
    fn control_points(prev: Self, from: Self, to: Self, next: Self) -> (Self, Self) {
        (from + (to - prev) * SIXTH, to - (next - from) * SIXTH)
    }

    fn bezier(from: Self, d: Self, e: Self, to: Self, alpha: f32) -> Self {
        let beta = 1.0 - alpha;
        from * (beta * beta * beta)
            + d * (3.0 * beta * beta * alpha)
            + e * (3.0 * beta * alpha * alpha)
            + to * (alpha * alpha * alpha)
    }
}

impl Interpolatable for Quat {
    fn control_points(prev: Self, from: Self, to: Self, next: Self) -> (Self, Self) {
        let d = (to * prev.inverse()).pow(SIXTH) * from;
        let e = (next * from.inverse()).pow(-SIXTH) * to;
        (d, e)
    }

    fn bezier(from: Self, d: Self, e: Self, to: Self, alpha: f32) -> Self {
        let f = from.arc_slerp(d, alpha);
        let g = d.arc_slerp(e, alpha);
        let h = e.arc_slerp(to, alpha);
        let m = f.arc_slerp(g, alpha);
        let n = g.arc_slerp(h, alpha);
        m.arc_slerp(n, alpha)
    }
}

/// Interpolates one pose between `from` and `to`.
#[must_use]
pub fn interpolate_pose(
    prev: &RigidTransform,
    from: &RigidTransform,
    to: &RigidTransform,
    next: &RigidTransform,
    alpha: f32,
) -> RigidTransform {
    RigidTransform::new(
        Vec3::interpolate(
            prev.translation,
            from.translation,
            to.translation,
            next.translation,
            alpha,
        ),
        Quat::interpolate(prev.rotation, from.rotation, to.rotation, next.rotation, alpha),
    )
}

/// Interpolates every pose of the window `[F[i-1], F[i], F[i+1], F[i+2]]`.
#[must_use]
pub fn interpolate_frames(window: [&Frame; 4], alpha: f32) -> Frame {
    let [prev, from, to, next] = window.map(Frame::poses);
    prev.iter()
        .zip(from)
        .zip(to)
        .zip(next)
        .map(|(((p, f), t), n)| interpolate_pose(p, f, t, n, alpha))
        .collect()
}

/// Segment index and blend factor for animation time `t` (in keyframe
/// intervals): `i = floor(t) + 1`, `alpha = t - floor(t)`.
#[must_use]
pub fn segment_at(t: f32) -> (usize, f32) {
    let t = t.max(0.0);
    let whole = t.floor();
    // Non-negative; huge or infinite times saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (whole as usize).saturating_add(1);
    let alpha = if t.is_finite() { t - whole } else { 0.0 };
    (index, alpha)
}

/// Whether segment `i` is past the playable range.
///
/// The first and last keyframes only shape the tangents, so segment `i`
/// needs `F[i+2]`: playback ends once `i > len - 3`.
#[must_use]
pub fn is_past_end(index: usize, frame_count: usize) -> bool {
    index.saturating_add(3) > frame_count
}

/// Interpolated frame at time `t`, or `None` once the track has ended.
#[must_use]
pub fn sample(animation: &Animation, t: f32) -> Option<Frame> {
    let (index, alpha) = segment_at(t);
    if is_past_end(index, animation.len()) {
        return None;
    }
    animation
        .window(index)
        .map(|window| interpolate_frames(window, alpha))
}
