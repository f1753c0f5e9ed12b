use crate::errors::{PoseError, Result};
use crate::math::RigidTransform;
use crate::scene::{NodeKey, SceneGraph};

/// A full pose snapshot: one local pose per transform node, in the scene's
/// canonical pre-order (see [`SceneGraph::transform_nodes`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    poses: Vec<RigidTransform>,
}

impl Frame {
    #[must_use]
    pub fn new(poses: Vec<RigidTransform>) -> Self {
        Self { poses }
    }

    /// Snapshots the current local poses of `nodes`.
    pub fn capture(scene: &SceneGraph, nodes: &[NodeKey]) -> Result<Self> {
        let poses = nodes
            .iter()
            .map(|&key| scene.pose(key))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { poses })
    }

    /// Writes the snapshot back into the scene.
    ///
    /// Fails without touching the scene when the frame length does not match.
    pub fn apply(&self, scene: &mut SceneGraph, nodes: &[NodeKey]) -> Result<()> {
        if self.poses.len() != nodes.len() {
            return Err(PoseError::FrameLengthMismatch {
                expected: nodes.len(),
                actual: self.poses.len(),
            });
        }
        for (&key, &pose) in nodes.iter().zip(&self.poses) {
            scene.set_pose(key, pose)?;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn poses(&self) -> &[RigidTransform] {
        &self.poses
    }
}

impl FromIterator<RigidTransform> for Frame {
    fn from_iter<I: IntoIterator<Item = RigidTransform>>(iter: I) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}
