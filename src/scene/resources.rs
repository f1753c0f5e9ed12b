//! Shared, immutable shape resources.
//!
//! Vertex data generation and GPU upload live outside this crate; a
//! [`Geometry`] only describes which primitive a backend should draw and how
//! large it is, a [`Material`] which shading program and color to use.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Axis aligned cube of edge `size`, centered at the origin.
    Cube,
    /// Sphere of radius `size`, centered at the origin.
    Sphere,
    /// Square in the XZ plane of edge `size`, centered at the origin.
    Plane,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub name: String,
    pub primitive: Primitive,
    pub size: f32,
}

impl Geometry {
    #[must_use]
    pub fn cube(size: f32) -> Self {
        Self {
            name: "Cube".to_string(),
            primitive: Primitive::Cube,
            size,
        }
    }

    #[must_use]
    pub fn sphere(radius: f32) -> Self {
        Self {
            name: "Sphere".to_string(),
            primitive: Primitive::Sphere,
            size: radius,
        }
    }

    #[must_use]
    pub fn plane(size: f32) -> Self {
        Self {
            name: "Plane".to_string(),
            primitive: Primitive::Plane,
            size,
        }
    }

    /// Radius of the smallest origin-centered sphere enclosing the primitive.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match self.primitive {
            Primitive::Cube => self.size * 3.0_f32.sqrt() * 0.5,
            Primitive::Sphere => self.size,
            Primitive::Plane => self.size * std::f32::consts::FRAC_1_SQRT_2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Lambert shading against the two scene lights.
    Diffuse,
    /// Flat color, no lighting.
    Solid,
    /// Diffuse with color and normal textures.
    NormalMapped,
    /// Flat ID color written by the pick pass.
    Pick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shading: Shading,
    /// Linear RGB in `[0, 1]`.
    pub color: Vec3,
    pub wireframe: bool,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>, shading: Shading, color: Vec3) -> Self {
        Self {
            name: name.into(),
            shading,
            color,
            wireframe: false,
        }
    }

    #[must_use]
    pub fn diffuse(name: impl Into<String>, color: Vec3) -> Self {
        Self::new(name, Shading::Diffuse, color)
    }

    #[must_use]
    pub fn solid(name: impl Into<String>, color: Vec3) -> Self {
        Self::new(name, Shading::Solid, color)
    }

    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }
}
