//! Scene graph module
//!
//! Manages the hierarchy of posable rigid bodies:
//! - [`SceneNode`]: closed variant over transform nodes and shape leaves
//! - [`SceneGraph`]: arena owning every node plus the shared geometry and
//!   material tables
//! - [`SceneVisitor`]: double-dispatch traversal with pre/post callbacks
//! - Queries: accumulated transform from the root to a node, and the
//!   canonical pre-order list of transform nodes used for animation frames
//! - [`robot`]: the default editor scene (ground, sky camera, two robots,
//!   two lights)

pub mod node;
pub mod query;
pub mod resources;
pub mod robot;
pub mod scene;
pub mod visitor;

pub use node::{SceneNode, ShapeNode, ShapeOffset, TransformNode};
pub use resources::{Geometry, Material, Primitive, Shading};
pub use scene::SceneGraph;
pub use visitor::{SceneVisitor, Walk};

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct GeometryKey;
    pub struct MaterialKey;
}
