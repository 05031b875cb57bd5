//! Tolerant sign classification and integer snapping.
//!
//! All plane-incidence, point-sameness and floor/ceil decisions in the crate
//! go through one [`EpsilonMath`] so that they agree with each other.

use crate::{SplitError, SplitResult, Vec3d};

/// Default tolerance shared by every classification.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Which side of a plane a value lies on, with a tolerance band around zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Below `-epsilon`.
    Negative,
    /// Within `[-epsilon, epsilon]`.
    Zero,
    /// Above `epsilon`.
    Positive,
}

impl Sign {
    /// All signs in ascending order.
    pub const ALL: [Sign; 3] = [Sign::Negative, Sign::Zero, Sign::Positive];

    /// Returns the opposite sign. `Zero` maps to itself.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Arithmetic helpers parameterized by a single tolerance `epsilon > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonMath {
    epsilon: f64,
}

impl EpsilonMath {
    /// Creates helpers for the given tolerance.
    ///
    /// Fails with [`SplitError::InvalidEpsilon`] unless `epsilon` is finite
    /// and strictly positive.
    pub fn new(epsilon: f64) -> SplitResult<Self> {
        if epsilon.is_finite() && epsilon > 0.0 {
            Ok(Self { epsilon })
        } else {
            Err(SplitError::InvalidEpsilon(epsilon))
        }
    }

    /// Returns the tolerance.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Classifies `value` as negative, zero or positive.
    #[inline]
    pub fn sign(&self, value: f64) -> Sign {
        if value < -self.epsilon {
            Sign::Negative
        } else if value > self.epsilon {
            Sign::Positive
        } else {
            Sign::Zero
        }
    }

    /// Two points are the same when their squared distance is below `epsilon²`.
    #[inline]
    pub fn are_same(&self, a: &Vec3d, b: &Vec3d) -> bool {
        (*a - *b).length_squared() < self.epsilon * self.epsilon
    }

    /// `floor(value + epsilon)`: values just below an integer snap up to it.
    ///
    /// Fails with [`SplitError::CoordinateOutOfRange`] if the result is not a
    /// valid cell index.
    #[inline]
    pub fn floor(&self, value: f64) -> SplitResult<i32> {
        cell_index((value + self.epsilon).floor(), value)
    }

    /// `ceil(value - epsilon)`: values just above an integer snap down to it.
    ///
    /// Fails with [`SplitError::CoordinateOutOfRange`] if the result is not a
    /// valid cell index.
    #[inline]
    pub fn ceil(&self, value: f64) -> SplitResult<i32> {
        cell_index((value - self.epsilon).ceil(), value)
    }
}

/// Converts an already snapped value to a cell index.
///
/// Indices are kept within `±(i32::MAX - 1)` so that the slab below any
/// boundary and its negated offset are still `i32`s.
fn cell_index(snapped: f64, value: f64) -> SplitResult<i32> {
    if snapped.abs() < f64::from(i32::MAX) {
        Ok(snapped as i32)
    } else {
        Err(SplitError::CoordinateOutOfRange(value))
    }
}

impl Default for EpsilonMath {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}
