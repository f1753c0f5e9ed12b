//! CPU stand-in for the rasterizer.
//!
//! Every draw call is reduced to a disc in screen space: the projected
//! object center and the projected bounding-sphere radius. A readback returns
//! the color of the covering disc whose far bound (center depth plus radius)
//! is the smallest, or the clear color when nothing covers the pixel.
//! Wireframe draws only cover a thin ring at their silhouette.
//!
//! This is coarse, but exact enough to exercise the pick protocol: the
//! written colors go through the same 8-bit (optionally sRGB encoded)
//! quantization as a real framebuffer.

use glam::{Mat4, Vec2, Vec3};

use crate::pick::codec::linear_to_srgb;
use crate::render::{DrawCall, FrameUniforms, PassKind, RenderBackend};

const DISPLAY_CLEAR: [u8; 3] = [128, 200, 255];
const PICK_CLEAR: [u8; 3] = [0, 0, 0];
/// Half width of a wireframe silhouette, in pixels.
const WIRE_HALF_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, Copy)]
struct Disc {
    center: Vec2,
    radius: f32,
    far: f32,
    wireframe: bool,
    color: [u8; 3],
}

impl Disc {
    fn covers(&self, p: Vec2) -> bool {
        let d = p.distance(self.center);
        if self.wireframe {
            (d - self.radius).abs() <= WIRE_HALF_WIDTH
        } else {
            d <= self.radius
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    width: u32,
    height: u32,
    srgb: bool,
    projection: Mat4,
    clear: [u8; 3],
    discs: Vec<Disc>,
    draw_count: usize,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new(width: u32, height: u32, srgb: bool) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            srgb,
            projection: Mat4::IDENTITY,
            clear: DISPLAY_CLEAR,
            discs: Vec::new(),
            draw_count: 0,
        }
    }

    /// Number of draw calls since the last `begin_frame`.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    fn quantize(&self, color: Vec3) -> [u8; 3] {
        let encode = |c: f32| {
            let c = c.clamp(0.0, 1.0);
            let c = if self.srgb { linear_to_srgb(c) } else { c };
            // Clamped to [0, 1] above, so the cast cannot truncate.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = (c * 255.0).round() as u8;
            byte
        };
        [encode(color.x), encode(color.y), encode(color.z)]
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, uniforms: &FrameUniforms, pass: PassKind) {
        self.projection = uniforms.projection;
        self.clear = match pass {
            PassKind::Display => DISPLAY_CLEAR,
            PassKind::Pick => PICK_CLEAR,
        };
        self.discs.clear();
        self.draw_count = 0;
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draw_count += 1;

        let center = call.model_view.w_axis.truncate();
        let depth = -center.z;
        if depth <= 0.0 {
            return;
        }
        let scale = call
            .model_view
            .x_axis
            .truncate()
            .length()
            .max(call.model_view.y_axis.truncate().length())
            .max(call.model_view.z_axis.truncate().length());
        let radius = call.geometry.bounding_radius() * scale;

        let ndc = self.projection.project_point3(center);
        let w = self.width as f32;
        let h = self.height as f32;
        let screen = Vec2::new(
            ndc.x * w * 0.5 + (w - 1.0) * 0.5,
            ndc.y * h * 0.5 + (h - 1.0) * 0.5,
        );
        // projection.y_axis.y is cot(fov_y / 2).
        let pixel_radius = radius * self.projection.y_axis.y * h * 0.5 / depth;

        let color = call.id_color.unwrap_or(call.material.color);
        self.discs.push(Disc {
            center: screen,
            radius: pixel_radius,
            far: depth + radius,
            wireframe: call.material.wireframe,
            color: self.quantize(color),
        });
    }

    fn read_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        if x >= self.width || y >= self.height {
            return self.clear;
        }
        let p = Vec2::new(x as f32, y as f32);
        self.discs
            .iter()
            .filter(|disc| disc.covers(p))
            .min_by(|a, b| a.far.total_cmp(&b.far))
            .map_or(self.clear, |disc| disc.color)
    }

    fn is_srgb(&self) -> bool {
        self.srgb
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }
}
