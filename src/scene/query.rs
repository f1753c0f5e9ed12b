//! Visitors answering structural questions about the graph.

use smallvec::{SmallVec, smallvec};

use crate::errors::{PoseError, Result};
use crate::math::RigidTransform;
use crate::scene::node::TransformNode;
use crate::scene::visitor::{SceneVisitor, Walk};
use crate::scene::NodeKey;

/// Typical robot hierarchies are a handful of levels deep.
pub(crate) type PoseStack = SmallVec<[RigidTransform; 16]>;

/// Accumulates poses along the path to `target` and stops on the first hit.
///
/// The stack starts with the identity, then holds the running product after
/// each transform node on the current path. Once the target is reached the
/// traversal is aborted, so the stack is left holding the full path.
pub(crate) struct AccumulateVisitor {
    stack: PoseStack,
    target: NodeKey,
    found: bool,
}

impl AccumulateVisitor {
    pub(crate) fn new(target: NodeKey) -> Self {
        Self {
            stack: smallvec![RigidTransform::IDENTITY],
            target,
            found: false,
        }
    }

    /// Product of the path, dropping the last `offset` levels.
    ///
    /// `offset == 0` includes the target's own pose, `offset == 1` yields its
    /// parent frame, and so on up to the identity.
    pub(crate) fn accumulated(&self, offset: usize) -> Result<RigidTransform> {
        if !self.found {
            return Err(PoseError::NodeNotFound(self.target));
        }
        let depth = self.stack.len();
        if offset >= depth {
            return Err(PoseError::OffsetOutOfRange { offset, depth });
        }
        Ok(self.stack[depth - offset - 1])
    }
}

impl SceneVisitor for AccumulateVisitor {
    fn visit_transform(&mut self, key: NodeKey, node: &TransformNode) -> Walk {
        let top = self.stack[self.stack.len() - 1];
        self.stack.push(top * node.pose);
        if key == self.target {
            self.found = true;
            return Walk::Stop;
        }
        Walk::Continue
    }

    fn post_visit_transform(&mut self, _key: NodeKey, _node: &TransformNode) -> Walk {
        self.stack.pop();
        Walk::Continue
    }
}

/// Collects transform nodes in pre-order.
///
/// The traversal root itself is left out: it is the fixed world frame and
/// never part of an animation frame.
pub(crate) struct TransformCollector {
    root: NodeKey,
    pub(crate) keys: Vec<NodeKey>,
}

impl TransformCollector {
    pub(crate) fn new(root: NodeKey) -> Self {
        Self {
            root,
            keys: Vec::new(),
        }
    }
}

impl SceneVisitor for TransformCollector {
    fn visit_transform(&mut self, key: NodeKey, _node: &TransformNode) -> Walk {
        if key != self.root {
            self.keys.push(key);
        }
        Walk::Continue
    }
}
