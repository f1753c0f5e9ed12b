use glam::Vec3;
use smallvec::smallvec;

use crate::math::RigidTransform;
use crate::render::{DrawCall, RenderBackend, normal_matrix};
use crate::scene::query::PoseStack;
use crate::scene::visitor::{SceneVisitor, Walk};
use crate::scene::{MaterialKey, NodeKey, SceneGraph, ShapeNode, TransformNode};

/// Visitor issuing one [`DrawCall`] per shape node.
///
/// The transform stack is seeded with the inverse eye pose, so the top of
/// the stack is always the current node's model-view transform.
pub struct Drawer<'a, B: RenderBackend + ?Sized> {
    scene: &'a SceneGraph,
    backend: &'a mut B,
    stack: PoseStack,
    material_override: Option<MaterialKey>,
    id_color: Option<Vec3>,
}

impl<'a, B: RenderBackend + ?Sized> Drawer<'a, B> {
    pub fn new(scene: &'a SceneGraph, backend: &'a mut B, inverse_eye: RigidTransform) -> Self {
        Self {
            scene,
            backend,
            stack: smallvec![inverse_eye],
            material_override: None,
            id_color: None,
        }
    }

    /// Draws every shape with `material` instead of its own.
    #[must_use]
    pub fn with_material_override(mut self, material: Option<MaterialKey>) -> Self {
        self.material_override = material;
        self
    }

    /// Flat color attached to the following draw calls.
    pub fn set_id_color(&mut self, color: Option<Vec3>) {
        self.id_color = color;
    }

    fn top(&self) -> RigidTransform {
        self.stack[self.stack.len() - 1]
    }
}

impl<B: RenderBackend + ?Sized> SceneVisitor for Drawer<'_, B> {
    fn visit_transform(&mut self, _key: NodeKey, node: &TransformNode) -> Walk {
        let top = self.top();
        self.stack.push(top * node.pose());
        Walk::Continue
    }

    fn post_visit_transform(&mut self, _key: NodeKey, _node: &TransformNode) -> Walk {
        self.stack.pop();
        Walk::Continue
    }

    fn visit_shape(&mut self, key: NodeKey, node: &ShapeNode) -> Walk {
        let material_key = self.material_override.unwrap_or(node.material);
        let (Some(geometry), Some(material)) = (
            self.scene.geometry(node.geometry),
            self.scene.material(material_key),
        ) else {
            log::warn!("Shape '{}' references a missing geometry or material", node.name);
            return Walk::Continue;
        };

        let model_view = self.top().to_mat4() * node.offset().to_mat4();
        self.backend.draw(&DrawCall {
            node: Some(key),
            model_view,
            normal_matrix: normal_matrix(&model_view),
            geometry,
            material,
            id_color: self.id_color,
        });
        Walk::Continue
    }
}
