//! Double-dispatch traversal over the scene graph.
//!
//! [`walk`] visits nodes depth first, in child order. Transform nodes get a
//! pre-visit before their children and a post-visit after them; shape nodes
//! get a visit / post-visit pair with nothing in between.

use slotmap::SlotMap;

use crate::scene::node::{SceneNode, ShapeNode, TransformNode};
use crate::scene::NodeKey;

/// Traversal control returned by visitor callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the children, then post-visit.
    Continue,
    /// Skip the children and the matching post-visit, then go on with the
    /// next sibling.
    SkipChildren,
    /// Abort the whole traversal immediately. No further callbacks run, not
    /// even the post-visits of the nodes currently on the path.
    Stop,
}

/// Per-kind callbacks. Every method defaults to [`Walk::Continue`].
///
/// Post-visits only distinguish [`Walk::Stop`] from everything else.
pub trait SceneVisitor {
    fn visit_transform(&mut self, _key: NodeKey, _node: &TransformNode) -> Walk {
        Walk::Continue
    }

    fn post_visit_transform(&mut self, _key: NodeKey, _node: &TransformNode) -> Walk {
        Walk::Continue
    }

    fn visit_shape(&mut self, _key: NodeKey, _node: &ShapeNode) -> Walk {
        Walk::Continue
    }

    fn post_visit_shape(&mut self, _key: NodeKey, _node: &ShapeNode) -> Walk {
        Walk::Continue
    }
}

/// Walks the subtree rooted at `key`.
///
/// Returns `false` when a callback stopped the traversal.
pub fn walk<V: SceneVisitor + ?Sized>(
    nodes: &SlotMap<NodeKey, SceneNode>,
    key: NodeKey,
    visitor: &mut V,
) -> bool {
    let Some(node) = nodes.get(key) else {
        log::warn!("Traversal reached missing node {key:?}, skipping");
        return true;
    };

    match node {
        SceneNode::Transform(transform) => match visitor.visit_transform(key, transform) {
            Walk::Stop => false,
            Walk::SkipChildren => true,
            Walk::Continue => {
                for &child in &transform.children {
                    if !walk(nodes, child, visitor) {
                        return false;
                    }
                }
                visitor.post_visit_transform(key, transform) != Walk::Stop
            }
        },
        SceneNode::Shape(shape) => match visitor.visit_shape(key, shape) {
            Walk::Stop => false,
            Walk::SkipChildren => true,
            Walk::Continue => visitor.post_visit_shape(key, shape) != Walk::Stop,
        },
    }
}
