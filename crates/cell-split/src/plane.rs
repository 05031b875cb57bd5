//! Cutting planes.

use crate::{Axis, EpsilonMath, Sign, SplitError, SplitResult, Vec3d};

/// A plane in 3D space, the point set `normal · p = distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3d,
    distance: f64,
}

impl Plane {
    /// Creates a plane from a normal vector and distance.
    /// The normal (and distance with it) is normalized.
    ///
    /// Fails with [`SplitError::DegeneratePlane`] if the normal has zero
    /// length or the distance is not finite.
    pub fn new(normal: Vec3d, distance: f64) -> SplitResult<Self> {
        let norm = normal.length();
        if norm <= f64::EPSILON || !distance.is_finite() {
            return Err(SplitError::DegeneratePlane);
        }
        Ok(Self {
            normal: normal.scale(1.0 / norm),
            distance: distance / norm,
        })
    }

    /// The plane `axis = position`, with its normal along the positive axis.
    ///
    /// Points with a larger coordinate along `axis` are on the positive side.
    pub fn grid_boundary(axis: Axis, position: i32) -> Self {
        Self {
            normal: Vec3d::unit(axis),
            distance: f64::from(position),
        }
    }

    /// Returns the unit normal.
    #[inline]
    pub fn normal(&self) -> Vec3d {
        self.normal
    }

    /// Returns the signed distance of the plane from the origin along the normal.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Signed distance from `point` to the plane, `normal · point - distance`.
    #[inline]
    pub fn evaluate(&self, point: &Vec3d) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Classifies which side of the plane `point` lies on.
    #[inline]
    pub fn classify_point(&self, point: &Vec3d, eps: &EpsilonMath) -> Sign {
        eps.sign(self.evaluate(point))
    }

    /// Returns the same plane with the normal flipped, which swaps the
    /// positive and negative sides.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(x: f64, y: f64, z: f64) -> Vec3d {
        Vec3d::new(x, y, z).unwrap()
    }

    #[test]
    fn new_normalizes() {
        let plane = Plane::new(point(0.0, 2.0, 0.0), 4.0).unwrap();
        assert_relative_eq!(plane.normal().y(), 1.0);
        assert_relative_eq!(plane.distance(), 2.0);
        assert_relative_eq!(plane.evaluate(&point(7.0, 3.0, -1.0)), 1.0);
    }

    #[test]
    fn degenerate_planes_rejected() {
        assert_eq!(Plane::new(Vec3d::ZERO, 1.0), Err(SplitError::DegeneratePlane));
        assert!(Plane::new(point(1.0, 0.0, 0.0), f64::NAN).is_err());
    }

    #[test]
    fn grid_boundary_classification() {
        let eps = EpsilonMath::default();
        let plane = Plane::grid_boundary(Axis::Z, 3);

        assert_eq!(plane.classify_point(&point(9.0, 9.0, 2.5), &eps), Sign::Negative);
        assert_eq!(plane.classify_point(&point(9.0, 9.0, 3.0), &eps), Sign::Zero);
        assert_eq!(
            plane.classify_point(&point(0.0, 0.0, 3.000_000_1), &eps),
            Sign::Zero
        );
        assert_eq!(plane.classify_point(&point(0.0, 0.0, 3.5), &eps), Sign::Positive);
    }

    #[test]
    fn flipped_swaps_sides() {
        let eps = EpsilonMath::default();
        let plane = Plane::grid_boundary(Axis::X, 1).flipped();
        assert_eq!(plane.classify_point(&point(2.0, 0.0, 0.0), &eps), Sign::Negative);
        assert_eq!(plane.classify_point(&point(0.0, 0.0, 0.0), &eps), Sign::Positive);
    }
}
