//! Error types for mesh construction, splitting and clumping.

use thiserror::Error;

use crate::Axis;

/// Errors raised by the checked constructors and operations of this crate.
///
/// Every error is a local precondition checked at the entry of an operation;
/// no operation returns a partial result alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// A vector component was NaN or infinite.
    #[error("non-finite coordinate in vector ({x}, {y}, {z})")]
    NonFiniteCoordinate {
        /// X component as supplied.
        x: f64,
        /// Y component as supplied.
        y: f64,
        /// Z component as supplied.
        z: f64,
    },

    /// A coordinate is finite but too large to be used: either beyond
    /// [`MAX_COORDINATE`](crate::MAX_COORDINATE) when building a vector, or
    /// outside the representable cell index range when decomposing.
    #[error("coordinate {0} is outside the supported range")]
    CoordinateOutOfRange(f64),

    /// A polygon was built from fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A group was built without any polygons.
    #[error("group `{0}` has no polygons")]
    EmptyGroup(String),

    /// Clumping was asked to place fragments but no cell is usable.
    #[error("no usable cells to clump into")]
    NoUsableCells,

    /// The shared tolerance is not a finite positive number.
    #[error("invalid epsilon {0} (must be finite and > 0)")]
    InvalidEpsilon(f64),

    /// A plane was built from a zero normal or a non-finite distance.
    #[error("plane normal must be non-zero and distance finite")]
    DegeneratePlane,

    /// The per-axis decomposition order does not name every axis exactly once.
    #[error("axis order {0:?} is not a permutation of X, Y, Z")]
    InvalidAxisOrder([Axis; 3]),
}

/// Result type for this crate.
pub type SplitResult<T> = std::result::Result<T, SplitError>;
