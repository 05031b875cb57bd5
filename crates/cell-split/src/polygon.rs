//! Polygons with an opaque per-face payload.

use tracing::trace;

use crate::{Cuttable, Cyclic, EpsilonMath, Plane, Sided, Sign, SplitError, SplitResult, Vec3d, Vertex};

/// A planar polygon in 3D space: a cyclic sequence of at least three
/// vertices plus an opaque payload.
///
/// The payload (a texture handle, a material name, `()` …) is never
/// inspected; every operation that produces new polygons copies it onto
/// each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P = ()> {
    vertices: Vec<Vertex>,
    payload: P,
}

impl<P> Polygon<P> {
    /// Creates a polygon from its vertices in winding order.
    ///
    /// Fails with [`SplitError::TooFewVertices`] if fewer than three
    /// vertices are given.
    pub fn new(vertices: Vec<Vertex>, payload: P) -> SplitResult<Self> {
        if vertices.len() < 3 {
            return Err(SplitError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices, payload })
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        self.vertices.len() == 4
    }

    pub fn into_parts(self) -> (Vec<Vertex>, P) {
        (self.vertices, self.payload)
    }

    /// Replaces the payload, keeping the geometry.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Polygon<Q> {
        Polygon {
            vertices: self.vertices,
            payload: f(self.payload),
        }
    }

    /// Computes the unit face normal from the first two edges,
    /// `(v1 - v0) × (v2 - v0)`.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    /// Degenerate (collinear) corners yield a near-zero vector.
    pub fn face_normal(&self) -> Vec3d {
        let a = self.vertices[0].position;
        let b = self.vertices[1].position;
        let c = self.vertices[2].position;
        (b - a).cross(&(c - a)).normalize()
    }
}

impl<P: Clone> Polygon<P> {
    /// Splits the polygon along `plane`.
    ///
    /// Uses a tolerant Sutherland-Hodgman walk over the cyclic vertex list:
    /// - a vertex goes to the bucket of its own sign; vertices on the plane go
    ///   to both the negative and the positive bucket
    /// - an edge running strictly from one side to the other contributes the
    ///   interpolated crossing vertex to both buckets
    ///
    /// A polygon with every vertex on the plane is returned in `zero`; a
    /// polygon touching but not crossing the plane is returned unchanged on
    /// its side. Buckets left with fewer than three distinct points are
    /// dropped.
    pub fn split_along(&self, plane: &Plane, eps: &EpsilonMath) -> Sided<Self> {
        let distances: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| plane.evaluate(&v.position))
            .collect();
        let signs: Vec<Sign> = distances.iter().map(|d| eps.sign(*d)).collect();

        let any_negative = signs.contains(&Sign::Negative);
        let any_positive = signs.contains(&Sign::Positive);
        match (any_negative, any_positive) {
            (false, false) => return Sided::only(Sign::Zero, self.clone()),
            (true, false) => return Sided::only(Sign::Negative, self.clone()),
            (false, true) => return Sided::only(Sign::Positive, self.clone()),
            (true, true) => {}
        }

        let n = self.vertices.len();
        let mut negative = Vec::with_capacity(n + 1);
        let mut positive = Vec::with_capacity(n + 1);

        let vertices = Cyclic::new(&self.vertices);
        let distances = Cyclic::new(&distances);
        let signs = Cyclic::new(&signs);

        for i in 0..n as isize {
            let current = vertices.get(i);
            match signs.get(i) {
                Sign::Negative => negative.push(*current),
                Sign::Positive => positive.push(*current),
                Sign::Zero => {
                    negative.push(*current);
                    positive.push(*current);
                }
            }

            let crosses = matches!(
                (signs.get(i), signs.get(i + 1)),
                (Sign::Negative, Sign::Positive) | (Sign::Positive, Sign::Negative)
            );
            if crosses {
                let (d_current, d_next) = (*distances.get(i), *distances.get(i + 1));
                // lambda * d_current + (1 - lambda) * d_next == 0
                let lambda = d_next / (d_next - d_current);
                let crossing = Vertex::interpolate(current, vertices.get(i + 1), lambda);
                negative.push(crossing);
                positive.push(crossing);
            }
        }

        Sided {
            negative: self.fragment(negative, eps),
            zero: None,
            positive: self.fragment(positive, eps),
        }
    }

    /// Builds an output polygon from a clip bucket, collapsing repeated points.
    fn fragment(&self, mut vertices: Vec<Vertex>, eps: &EpsilonMath) -> Option<Self> {
        vertices.dedup_by(|a, b| eps.are_same(&a.position, &b.position));
        while vertices.len() > 1
            && eps.are_same(&vertices[0].position, &vertices[vertices.len() - 1].position)
        {
            vertices.pop();
        }

        if vertices.len() < 3 {
            trace!(vertices = vertices.len(), "Dropping degenerate clip fragment");
            return None;
        }
        Some(Self {
            vertices,
            payload: self.payload.clone(),
        })
    }

    /// Converts the polygon into `ceil((n - 2) / 2)` quads.
    ///
    /// Fans from the first vertex, taking the remaining vertices two edges
    /// at a time: `(v0, v1, v2, v3)`, `(v0, v3, v4, v5)`, … A trailing
    /// triangle becomes a quad whose last vertex repeats. A quad is returned
    /// as is.
    pub fn quadify(&self) -> Vec<Self> {
        let n = self.vertices.len();
        if n == 4 {
            return vec![self.clone()];
        }

        let anchor = self.vertices[0];
        let vertices = Cyclic::new(&self.vertices);
        (1..n - 1)
            .step_by(2)
            .map(|start| {
                let mut quad = Vec::with_capacity(4);
                quad.push(anchor);
                quad.extend(
                    vertices
                        .sublist(start as isize, (start + 3).min(n) as isize)
                        .copied(),
                );
                if quad.len() == 3 {
                    quad.push(quad[2]);
                }
                Self {
                    vertices: quad,
                    payload: self.payload.clone(),
                }
            })
            .collect()
    }

    /// Replaces zero-length vertex normals with the face normal.
    /// Non-zero normals are kept as they are.
    pub fn recompute_zero_normals(&self, eps: &EpsilonMath) -> Self {
        let face = self.face_normal();
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| {
                    if eps.are_same(&v.normal, &Vec3d::ZERO) {
                        v.with_normal(face)
                    } else {
                        *v
                    }
                })
                .collect(),
            payload: self.payload.clone(),
        }
    }

    /// Moves every vertex position by `offset`.
    pub fn translate(&self, offset: Vec3d) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.translate(offset)).collect(),
            payload: self.payload.clone(),
        }
    }
}

impl<P: Clone> Cuttable for Polygon<P> {
    fn split(&self, plane: &Plane, eps: &EpsilonMath) -> Sided<Self> {
        self.split_along(plane, eps)
    }
}
