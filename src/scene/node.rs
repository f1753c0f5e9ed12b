use glam::{Mat4, Quat, Vec3};

use crate::math::RigidTransform;
use crate::scene::{GeometryKey, MaterialKey, NodeKey};

/// A scene-graph node.
///
/// # Design Principles
///
/// - The set of node kinds is closed: traversal dispatches on the variant
///   instead of on a trait object
/// - Nodes live in the [`SceneGraph`](crate::scene::SceneGraph) arena and
///   refer to each other by [`NodeKey`]; a child has exactly one parent
/// - Geometry and materials are shared by key, never duplicated per shape
#[derive(Debug, Clone)]
pub enum SceneNode {
    /// Interior node carrying a mutable rigid pose.
    Transform(TransformNode),
    /// Leaf node drawing a piece of geometry.
    Shape(ShapeNode),
}

impl SceneNode {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Transform(node) => &node.name,
            Self::Shape(node) => &node.name,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        match self {
            Self::Transform(node) => node.parent,
            Self::Shape(node) => node.parent,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_transform(&self) -> Option<&TransformNode> {
        match self {
            Self::Transform(node) => Some(node),
            Self::Shape(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_transform_mut(&mut self) -> Option<&mut TransformNode> {
        match self {
            Self::Transform(node) => Some(node),
            Self::Shape(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_shape(&self) -> Option<&ShapeNode> {
        match self {
            Self::Shape(node) => Some(node),
            Self::Transform(_) => None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeKey>) {
        match self {
            Self::Transform(node) => node.parent = parent,
            Self::Shape(node) => node.parent = parent,
        }
    }
}

/// A node with a rigid pose relative to its parent and an ordered child list.
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: String,
    pub(crate) pose: RigidTransform,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl TransformNode {
    #[must_use]
    pub fn new(name: impl Into<String>, pose: RigidTransform) -> Self {
        Self {
            name: name.into(),
            pose,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Pose relative to the parent node.
    #[inline]
    #[must_use]
    pub fn pose(&self) -> RigidTransform {
        self.pose
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Fixed placement of a shape inside its parent transform node.
///
/// Baked at construction: a translation and a per-axis scale, applied as
/// `T * S` to the unit geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeOffset {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl ShapeOffset {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self { translation, scale }
    }

    #[must_use]
    pub fn translated(translation: Vec3) -> Self {
        Self::new(translation, Vec3::ONE)
    }

    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.translation)
    }
}

impl Default for ShapeOffset {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A leaf drawing shared geometry with a shared material.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub name: String,
    pub geometry: GeometryKey,
    pub material: MaterialKey,
    offset: ShapeOffset,
    pub(crate) parent: Option<NodeKey>,
}

impl ShapeNode {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        geometry: GeometryKey,
        material: MaterialKey,
        offset: ShapeOffset,
    ) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            offset,
            parent: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> &ShapeOffset {
        &self.offset
    }
}
