//! Turning pointer drags into pose edits.
//!
//! A drag produces an increment `M` expressed in some reference frame `A`
//! (the "auxiliary frame"). Applying it to a node with local pose `L` and
//! parent world frame `P` gives the new local pose
//!
//! ```text
//! L' = P⁻¹ · A · M · A⁻¹ · P · L
//! ```
//!
//! i.e. `M` is conjugated into world space by `A`, then pulled back into the
//! node's parent frame.

use glam::{Quat, Vec2, Vec3};

use crate::editor::input::MouseButtons;
use crate::errors::Result;
use crate::math::{QuatExt, RigidTransform};
use crate::scene::{NodeKey, SceneGraph};

/// Whether the current target may be edited, and in which frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulationSettings {
    pub can_manipulate: bool,
    /// Auxiliary frame `A` the increment is expressed in.
    pub reference: RigidTransform,
}

/// Which factors of the increment are inverted before applying it.
///
/// Moving the eye itself must feel like moving the world the opposite way,
/// hence the flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inversion {
    pub translation: bool,
    pub linear: bool,
}

impl Inversion {
    /// Returns `T' · R'` where `T'`, `R'` are the (possibly inverted)
    /// translation and rotation factors of `increment`.
    #[must_use]
    pub fn correct(&self, increment: RigidTransform) -> RigidTransform {
        let mut trans = increment.trans_fact();
        let mut lin = increment.lin_fact();
        if self.translation {
            trans = trans.inverse();
        }
        if self.linear {
            lin = lin.inverse();
        }
        trans * lin
    }
}

/// Who is looking at what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulationContext {
    pub sky: NodeKey,
    pub eye: NodeKey,
    pub target: NodeKey,
    /// Rotate the sky camera about its own origin instead of the world
    /// origin.
    pub sky_sky: bool,
}

impl ManipulationContext {
    /// Reference frame for the current target.
    ///
    /// Editing the sky is only allowed while looking through it: about the
    /// world origin (`linFact` of its pose) or, in sky-sky mode, about
    /// itself. Any other target is edited about its own origin with the
    /// eye's axes.
    pub fn settings(&self, scene: &SceneGraph) -> Result<ManipulationSettings> {
        if self.target == self.sky {
            if self.eye != self.sky {
                return Ok(ManipulationSettings {
                    can_manipulate: false,
                    reference: RigidTransform::IDENTITY,
                });
            }
            let sky_world = scene.world_pose(self.sky)?;
            let reference = if self.sky_sky {
                sky_world
            } else {
                sky_world.lin_fact()
            };
            return Ok(ManipulationSettings {
                can_manipulate: true,
                reference,
            });
        }

        let target_world = scene.world_pose(self.target)?;
        let eye_world = scene.world_pose(self.eye)?;
        Ok(ManipulationSettings {
            can_manipulate: true,
            reference: target_world.trans_fact() * eye_world.lin_fact(),
        })
    }

    #[must_use]
    pub fn inversion(&self) -> Inversion {
        if self.target == self.sky {
            Inversion {
                translation: self.eye == self.sky && !self.sky_sky,
                linear: true,
            }
        } else if self.eye == self.target {
            Inversion {
                translation: false,
                linear: true,
            }
        } else {
            Inversion::default()
        }
    }

    /// Where the arcball is drawn, in world space; `None` when hidden.
    pub fn arcball_pose(&self, scene: &SceneGraph) -> Result<Option<RigidTransform>> {
        if self.eye == self.sky && self.target == self.sky && !self.sky_sky {
            return Ok(Some(RigidTransform::IDENTITY));
        }
        if self.target != self.sky && self.target != self.eye {
            return Ok(Some(scene.world_pose(self.target)?));
        }
        Ok(None)
    }

    /// Applies a raw drag increment to the target.
    ///
    /// Returns `false` when the target may not be edited from this eye.
    pub fn apply(&self, scene: &mut SceneGraph, increment: RigidTransform) -> Result<bool> {
        let settings = self.settings(scene)?;
        if !settings.can_manipulate {
            return Ok(false);
        }
        let m = self.inversion().correct(increment);
        let a = settings.reference;
        let parent = scene.parent_world_pose(self.target)?;
        let local = scene.pose(self.target)?;

        let updated = parent.inverse() * a * m * a.inverse() * parent * local;
        scene.set_pose(self.target, updated.normalized())?;
        Ok(true)
    }
}

/// What a drag does, by the buttons held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Left without right.
    Rotate,
    /// Right without left.
    TranslateXY,
    /// Middle, or left and right together.
    TranslateZ,
}

impl DragMode {
    #[must_use]
    pub fn from_buttons(buttons: MouseButtons) -> Option<Self> {
        let left = buttons.contains(MouseButtons::LEFT);
        let right = buttons.contains(MouseButtons::RIGHT);
        if left && !right {
            Some(Self::Rotate)
        } else if right && !left {
            Some(Self::TranslateXY)
        } else if buttons.is_depth_drag() {
            Some(Self::TranslateZ)
        } else {
            None
        }
    }
}

/// Raw increment for a pointer delta (GL pixels, y up).
///
/// Rotations use `arcball` when given, otherwise `dy` degrees about X
/// (negated) followed by `dx` degrees about Y. Translations are scaled to
/// world units by `translation_scale`.
#[must_use]
pub fn drag_increment(
    mode: DragMode,
    delta: Vec2,
    translation_scale: f32,
    arcball: Option<Quat>,
) -> RigidTransform {
    match mode {
        DragMode::Rotate => RigidTransform::from_rotation(arcball.unwrap_or_else(|| {
            Quat::from_x_degrees(-delta.y) * Quat::from_y_degrees(delta.x)
        })),
        DragMode::TranslateXY => {
            RigidTransform::from_translation(Vec3::new(delta.x, delta.y, 0.0) * translation_scale)
        }
        DragMode::TranslateZ => {
            RigidTransform::from_translation(Vec3::new(0.0, 0.0, -delta.y) * translation_scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_translate_in_depth() {
        assert_eq!(
            DragMode::from_buttons(MouseButtons::LEFT | MouseButtons::RIGHT),
            Some(DragMode::TranslateZ)
        );
        assert_eq!(
            DragMode::from_buttons(MouseButtons::LEFT | MouseButtons::MIDDLE),
            Some(DragMode::Rotate)
        );
        assert_eq!(DragMode::from_buttons(MouseButtons::empty()), None);
    }

    #[test]
    fn correction_inverts_each_factor() {
        let inc = RigidTransform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.3));
        let both = Inversion {
            translation: true,
            linear: true,
        }
        .correct(inc);
        assert!(both.translation.abs_diff_eq(Vec3::new(-1.0, -2.0, -3.0), 1e-6));
        assert!(both.rotation.abs_diff_eq(Quat::from_rotation_y(-0.3), 1e-6));
    }
}
