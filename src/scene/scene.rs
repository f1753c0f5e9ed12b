use slotmap::SlotMap;

use crate::errors::{PoseError, Result};
use crate::math::RigidTransform;
use crate::scene::node::{SceneNode, ShapeNode, ShapeOffset, TransformNode};
use crate::scene::query::{AccumulateVisitor, TransformCollector};
use crate::scene::resources::{Geometry, Material};
use crate::scene::visitor::{self, SceneVisitor};
use crate::scene::{GeometryKey, MaterialKey, NodeKey};

/// The scene graph.
///
/// Owns every node in an arena together with the shared geometry and
/// material tables. Nodes form a single tree below [`SceneGraph::root`], a
/// transform node with identity pose that stands for the world frame.
///
/// Structure is built once; afterwards only poses change.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    geometries: SlotMap<GeometryKey, Geometry>,
    materials: SlotMap<MaterialKey, Material>,
    root: NodeKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::Transform(TransformNode::new(
            "World",
            RigidTransform::IDENTITY,
        )));
        Self {
            nodes,
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            root,
        }
    }

    /// The world node every other node descends from.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    // ========================================================================
    // Shared resources
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn geometry(&self, key: GeometryKey) -> Option<&Geometry> {
        self.geometries.get(key)
    }

    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Adds a transform node as the last child of `parent`.
    pub fn add_transform(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
        pose: RigidTransform,
    ) -> Result<NodeKey> {
        self.insert_child(parent, SceneNode::Transform(TransformNode::new(name, pose)))
    }

    /// Adds a shape leaf as the last child of `parent`.
    pub fn add_shape(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
        geometry: GeometryKey,
        material: MaterialKey,
        offset: ShapeOffset,
    ) -> Result<NodeKey> {
        self.insert_child(
            parent,
            SceneNode::Shape(ShapeNode::new(name, geometry, material, offset)),
        )
    }

    fn insert_child(&mut self, parent: NodeKey, mut child: SceneNode) -> Result<NodeKey> {
        // Validate before inserting so a bad parent leaves no orphan behind.
        self.transform_node(parent)?;
        child.set_parent(Some(parent));
        let key = self.nodes.insert(child);
        if let Some(parent_node) = self.nodes.get_mut(parent).and_then(SceneNode::as_transform_mut) {
            parent_node.children.push(key);
        }
        Ok(key)
    }

    /// Removes `key` and its whole subtree. The root cannot be removed.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Result<()> {
        if key == self.root {
            log::warn!("Cannot remove the world root node");
            return Ok(());
        }
        let parent = self
            .nodes
            .get(key)
            .ok_or(PoseError::NodeNotFound(key))?
            .parent();

        if let Some(parent_node) = parent
            .and_then(|p| self.nodes.get_mut(p))
            .and_then(SceneNode::as_transform_mut)
            && let Some(pos) = parent_node.children.iter().position(|&c| c == key)
        {
            parent_node.children.remove(pos);
        }

        let mut pending = vec![key];
        while let Some(next) = pending.pop() {
            if let Some(SceneNode::Transform(node)) = self.nodes.remove(next) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[must_use]
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn transform_node(&self, key: NodeKey) -> Result<&TransformNode> {
        self.nodes
            .get(key)
            .ok_or(PoseError::NodeNotFound(key))?
            .as_transform()
            .ok_or(PoseError::NotATransformNode(key))
    }

    /// Pose of `key` relative to its parent.
    pub fn pose(&self, key: NodeKey) -> Result<RigidTransform> {
        Ok(self.transform_node(key)?.pose)
    }

    /// Replaces the pose of `key` relative to its parent.
    pub fn set_pose(&mut self, key: NodeKey, pose: RigidTransform) -> Result<()> {
        let node = self
            .nodes
            .get_mut(key)
            .ok_or(PoseError::NodeNotFound(key))?
            .as_transform_mut()
            .ok_or(PoseError::NotATransformNode(key))?;
        node.pose = pose;
        Ok(())
    }

    // ========================================================================
    // Traversal and queries
    // ========================================================================

    /// Runs `visitor` over the subtree rooted at `start`.
    ///
    /// Returns `false` when the visitor stopped the traversal.
    pub fn accept<V: SceneVisitor + ?Sized>(&self, start: NodeKey, visitor: &mut V) -> bool {
        visitor::walk(&self.nodes, start, visitor)
    }

    /// Product of the poses on the path from `source` down to `target`.
    ///
    /// The last `offset` levels are left out: `0` gives the target's frame
    /// relative to `source`'s parent, `1` its parent's frame, and so on.
    pub fn accumulated_transform(
        &self,
        source: NodeKey,
        target: NodeKey,
        offset: usize,
    ) -> Result<RigidTransform> {
        self.transform_node(source)?;
        self.transform_node(target)?;
        let mut accumulator = AccumulateVisitor::new(target);
        self.accept(source, &mut accumulator);
        accumulator.accumulated(offset)
    }

    /// World frame of `target`.
    pub fn world_pose(&self, target: NodeKey) -> Result<RigidTransform> {
        self.accumulated_transform(self.root, target, 0)
    }

    /// World frame of `target`'s parent.
    pub fn parent_world_pose(&self, target: NodeKey) -> Result<RigidTransform> {
        self.accumulated_transform(self.root, target, 1)
    }

    /// Every transform node below the root, in pre-order.
    ///
    /// This is the canonical layout of an animation frame.
    #[must_use]
    pub fn transform_nodes(&self) -> Vec<NodeKey> {
        let mut collector = TransformCollector::new(self.root);
        self.accept(self.root, &mut collector);
        collector.keys
    }
}
