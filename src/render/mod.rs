//! Rendering boundary
//!
//! The crate never touches a GPU. Drawing is expressed as a stream of
//! [`DrawCall`]s handed to a [`RenderBackend`], which also answers single
//! pixel readbacks for the pick pass:
//!
//! - [`Drawer`]: visitor that turns the scene into draw calls
//! - [`HeadlessBackend`]: CPU backend used by the demo and the tests

pub mod drawer;
pub mod headless;

pub use drawer::Drawer;
pub use headless::HeadlessBackend;

use glam::{Mat3, Mat4, Vec3};

use crate::scene::{Geometry, Material, NodeKey};

/// Which pass a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Regular shaded rendering to the window.
    Display,
    /// Off-screen flat ID colors, cleared to black, read back once.
    Pick,
}

/// Per-frame uniforms shared by every draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    /// Light positions in eye space.
    pub eye_lights: [Vec3; 2],
}

/// One shape to draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Shape node being drawn; `None` for overlays such as the arcball.
    pub node: Option<NodeKey>,
    /// Object to eye space, shape offset included.
    pub model_view: Mat4,
    /// Inverse transpose of the upper 3x3 of `model_view`.
    pub normal_matrix: Mat3,
    pub geometry: &'a Geometry,
    pub material: &'a Material,
    /// Flat color written instead of shading during the pick pass.
    pub id_color: Option<Vec3>,
}

/// Abstraction over the rasterizer.
pub trait RenderBackend {
    /// Clears the target and latches the frame uniforms.
    fn begin_frame(&mut self, uniforms: &FrameUniforms, pass: PassKind);

    fn draw(&mut self, call: &DrawCall<'_>);

    /// Reads back one 8-bit RGB pixel, origin bottom-left.
    fn read_pixel(&self, x: u32, y: u32) -> [u8; 3];

    /// Whether the framebuffer encodes to sRGB on write.
    fn is_srgb(&self) -> bool;

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Inverse transpose of the linear part, for transforming normals.
#[must_use]
pub fn normal_matrix(model_view: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model_view).inverse().transpose()
}
