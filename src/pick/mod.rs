//! Object picking
//!
//! Picking renders every shape with a unique flat color into an off-screen
//! target, reads back the pixel under the cursor and decodes it into the
//! transform node that owns the shape.
//!
//! IDs are handed out in render order starting at 1; ID 0 is the cleared
//! background. Each ID records the innermost transform node enclosing the
//! shape, or `None` when the shape hangs directly below the world root.

pub mod codec;

use smallvec::SmallVec;

use crate::errors::{PoseError, Result};
use crate::math::RigidTransform;
use crate::render::{Drawer, FrameUniforms, PassKind, RenderBackend};
use crate::scene::visitor::{SceneVisitor, Walk};
use crate::scene::{MaterialKey, NodeKey, SceneGraph, ShapeNode, TransformNode};

pub use codec::{MAX_ID, color_to_id, id_to_color};

/// ID table produced by one pick pass.
#[derive(Debug, Clone)]
pub struct PickTable {
    id_to_node: Vec<Option<NodeKey>>,
}

impl PickTable {
    /// Number of slots, the background slot included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_node.len()
    }

    /// Only the background slot is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_node.len() <= 1
    }

    /// Transform node owning `id`.
    pub fn node(&self, id: u32) -> Result<Option<NodeKey>> {
        self.id_to_node
            .get(id as usize)
            .copied()
            .ok_or(PoseError::PickIdOutOfRange {
                id,
                allocated: self.id_to_node.len(),
            })
    }

    /// Decodes a read-back pixel and looks the ID up.
    pub fn resolve(&self, pixel: [u8; 3]) -> Result<Option<NodeKey>> {
        self.node(color_to_id(pixel))
    }
}

/// Visitor wrapping a [`Drawer`] that assigns pick IDs to shapes.
pub struct Picker<'a, B: RenderBackend + ?Sized> {
    drawer: Drawer<'a, B>,
    root: NodeKey,
    srgb: bool,
    node_stack: SmallVec<[NodeKey; 16]>,
    id_to_node: Vec<Option<NodeKey>>,
    error: Option<PoseError>,
}

impl<'a, B: RenderBackend + ?Sized> Picker<'a, B> {
    pub fn new(
        scene: &'a SceneGraph,
        backend: &'a mut B,
        inverse_eye: RigidTransform,
        pick_material: Option<MaterialKey>,
    ) -> Self {
        let srgb = backend.is_srgb();
        Self {
            drawer: Drawer::new(scene, backend, inverse_eye).with_material_override(pick_material),
            root: scene.root(),
            srgb,
            node_stack: SmallVec::new(),
            id_to_node: vec![None],
            error: None,
        }
    }

    /// Ends the pass, handing back the ID table.
    pub fn finish(self) -> Result<PickTable> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(PickTable {
                id_to_node: self.id_to_node,
            }),
        }
    }
}

impl<B: RenderBackend + ?Sized> SceneVisitor for Picker<'_, B> {
    fn visit_transform(&mut self, key: NodeKey, node: &TransformNode) -> Walk {
        if key != self.root {
            self.node_stack.push(key);
        }
        self.drawer.visit_transform(key, node)
    }

    fn post_visit_transform(&mut self, key: NodeKey, node: &TransformNode) -> Walk {
        if key != self.root {
            self.node_stack.pop();
        }
        self.drawer.post_visit_transform(key, node)
    }

    fn visit_shape(&mut self, key: NodeKey, node: &ShapeNode) -> Walk {
        let id = self.id_to_node.len() as u32;
        let color = match id_to_color(id, self.srgb) {
            Ok(color) => color,
            Err(err) => {
                log::error!("Pick pass aborted: {err}");
                self.error = Some(err);
                return Walk::Stop;
            }
        };
        self.id_to_node.push(self.node_stack.last().copied());
        self.drawer.set_id_color(Some(color));
        self.drawer.visit_shape(key, node)
    }

    fn post_visit_shape(&mut self, key: NodeKey, node: &ShapeNode) -> Walk {
        self.drawer.post_visit_shape(key, node)
    }
}

/// Runs a full pick pass and returns the transform node under pixel
/// `(x, y)` (origin bottom-left).
///
/// Returns `Ok(None)` for the background and for shapes without an owning
/// transform node.
pub fn pick<B: RenderBackend + ?Sized>(
    scene: &SceneGraph,
    backend: &mut B,
    uniforms: &FrameUniforms,
    inverse_eye: RigidTransform,
    pick_material: Option<MaterialKey>,
    x: u32,
    y: u32,
) -> Result<Option<NodeKey>> {
    backend.begin_frame(uniforms, PassKind::Pick);
    let table = {
        let mut picker = Picker::new(scene, backend, inverse_eye, pick_material);
        scene.accept(scene.root(), &mut picker);
        picker.finish()?
    };
    let pixel = backend.read_pixel(x, y);
    let node = table.resolve(pixel)?;
    log::debug!("Pick at ({x}, {y}): pixel {pixel:?} -> {node:?}");
    Ok(node)
}
