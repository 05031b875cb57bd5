//! Polygon corner attributes: position, normal and texture coordinates.

use crate::Vec3d;

/// Texture coordinates of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvCoords {
    pub u: f64,
    pub v: f64,
}

impl UvCoords {
    pub const ZERO: UvCoords = UvCoords { u: 0.0, v: 0.0 };

    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// `lambda * a + (1 - lambda) * b`, componentwise.
    pub fn interpolate(a: UvCoords, b: UvCoords, lambda: f64) -> UvCoords {
        UvCoords {
            u: lambda * a.u + (1.0 - lambda) * b.u,
            v: lambda * a.v + (1.0 - lambda) * b.v,
        }
    }
}

/// A polygon corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3d,
    pub normal: Vec3d,
    pub uv: UvCoords,
}

impl Vertex {
    pub fn new(position: Vec3d, normal: Vec3d, uv: UvCoords) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// `lambda * a + (1 - lambda) * b` for position, normal and UV alike.
    ///
    /// `lambda` is expected in `[0, 1]`; the interpolated normal is not
    /// renormalized.
    pub fn interpolate(a: &Vertex, b: &Vertex, lambda: f64) -> Vertex {
        Vertex {
            position: a.position.scale(lambda) + b.position.scale(1.0 - lambda),
            normal: a.normal.scale(lambda) + b.normal.scale(1.0 - lambda),
            uv: UvCoords::interpolate(a.uv, b.uv, lambda),
        }
    }

    /// Moves the position by `offset`. Normal and UV are unchanged.
    pub fn translate(&self, offset: Vec3d) -> Vertex {
        Vertex {
            position: self.position + offset,
            ..*self
        }
    }

    pub fn with_normal(&self, normal: Vec3d) -> Vertex {
        Vertex { normal, ..*self }
    }
}
