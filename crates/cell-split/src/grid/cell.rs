//! Integer lattice cells.

use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Axis;

/// A unit cell of the integer lattice. Cell `(x, y, z)` covers
/// `[x, x + 1) × [y, y + 1) × [z, z + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCell {
    pub const ORIGIN: GridCell = GridCell::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns a copy with the coordinate along `axis` replaced.
    pub fn with(mut self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// Squared length, computed in `i64`.
    pub fn length_sq(&self) -> i64 {
        let (x, y, z) = (i64::from(self.x), i64::from(self.y), i64::from(self.z));
        x * x + y * y + z * z
    }

    /// Squared Euclidean distance between two cells, computed in `i64`.
    /// Exact while each per-axis difference stays below `2^30`.
    pub fn distance_sq(&self, other: &GridCell) -> i64 {
        let d = |a: i32, b: i32| i64::from(a) - i64::from(b);
        let (dx, dy, dz) = (d(self.x, other.x), d(self.y, other.y), d(self.z, other.z));
        dx * dx + dy * dy + dz * dz
    }
}

impl Add for GridCell {
    type Output = GridCell;

    fn add(self, rhs: GridCell) -> GridCell {
        GridCell::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for GridCell {
    type Output = GridCell;

    fn sub(self, rhs: GridCell) -> GridCell {
        GridCell::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Formats as `x_y_z`, suitable for file names.
impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for GridCell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}
