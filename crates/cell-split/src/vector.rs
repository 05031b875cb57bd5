//! Finite 3D vectors and coordinate axes.

use std::ops::{Add, Neg, Sub};

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GridCell, SplitError, SplitResult};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (`X = 0`, `Y = 1`, `Z = 2`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Largest coordinate magnitude accepted by the checked constructors.
///
/// Sums, differences, cross products and interpolations of vectors within
/// this bound stay finite, as do translations by any grid cell offset.
pub const MAX_COORDINATE: f64 = 1e15;

/// A 3D vector whose components are always finite.
///
/// The checked constructors reject NaN, infinities and components beyond
/// [`MAX_COORDINATE`], so the arithmetic in this crate cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3d(Vector3<f64>);

impl Vec3d {
    /// The origin.
    pub const ZERO: Vec3d = Vec3d(Vector3::new(0.0, 0.0, 0.0));

    /// Creates a vector, failing if any component is not finite or its
    /// magnitude exceeds [`MAX_COORDINATE`].
    pub fn new(x: f64, y: f64, z: f64) -> SplitResult<Self> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(SplitError::NonFiniteCoordinate { x, y, z });
        }
        match [x, y, z].into_iter().find(|c| c.abs() > MAX_COORDINATE) {
            Some(c) => Err(SplitError::CoordinateOutOfRange(c)),
            None => Ok(Self(Vector3::new(x, y, z))),
        }
    }

    /// Wraps a vector computed from already-valid operands.
    #[inline]
    pub(crate) fn from_finite(v: Vector3<f64>) -> Self {
        debug_assert!(
            v.iter().all(|c| c.is_finite()),
            "vector arithmetic produced a non-finite component"
        );
        Self(v)
    }

    /// The unit vector along `axis`.
    pub fn unit(axis: Axis) -> Self {
        let mut v = Vector3::zeros();
        v[axis.index()] = 1.0;
        Self(v)
    }

    /// A vector of length `amount` along `axis`.
    pub fn along(axis: Axis, amount: i32) -> Self {
        let mut v = Vector3::zeros();
        v[axis.index()] = f64::from(amount);
        Self(v)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Component along `axis`.
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    /// Borrows the underlying nalgebra vector.
    #[inline]
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    #[inline]
    pub fn dot(&self, other: &Vec3d) -> f64 {
        self.0.dot(&other.0)
    }

    #[inline]
    pub fn cross(&self, other: &Vec3d) -> Vec3d {
        Self::from_finite(self.0.cross(&other.0))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Vectors shorter than `1e-4` are returned unchanged.
    pub fn normalize(&self) -> Vec3d {
        let length = self.length();
        if length < 1e-4 { *self } else { self.scale(1.0 / length) }
    }

    #[inline]
    pub(crate) fn scale(&self, factor: f64) -> Vec3d {
        Self::from_finite(self.0 * factor)
    }
}

impl Add for Vec3d {
    type Output = Vec3d;

    fn add(self, rhs: Vec3d) -> Vec3d {
        Vec3d::from_finite(self.0 + rhs.0)
    }
}

impl Sub for Vec3d {
    type Output = Vec3d;

    fn sub(self, rhs: Vec3d) -> Vec3d {
        Vec3d::from_finite(self.0 - rhs.0)
    }
}

impl Neg for Vec3d {
    type Output = Vec3d;

    fn neg(self) -> Vec3d {
        Vec3d(-self.0)
    }
}

impl TryFrom<[f64; 3]> for Vec3d {
    type Error = SplitError;

    fn try_from([x, y, z]: [f64; 3]) -> SplitResult<Self> {
        Self::new(x, y, z)
    }
}

impl TryFrom<Vector3<f64>> for Vec3d {
    type Error = SplitError;

    fn try_from(v: Vector3<f64>) -> SplitResult<Self> {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<GridCell> for Vec3d {
    fn from(cell: GridCell) -> Self {
        Self(Vector3::new(
            f64::from(cell.x),
            f64::from(cell.y),
            f64::from(cell.z),
        ))
    }
}

impl From<Vec3d> for Vector3<f64> {
    fn from(v: Vec3d) -> Self {
        v.0
    }
}
