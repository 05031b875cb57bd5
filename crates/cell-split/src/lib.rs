//! Splits polygon meshes into unit grid cells.
//!
//! A [`Mesh`] is cut by axis-aligned planes at every integer coordinate it
//! spans, producing one fragment per occupied cell of the integer lattice.
//! Fragments in cells that cannot be used can then be [`clump`]ed into the
//! nearest usable cell.
//!
//! - [`Polygon::split_along`] clips a polygon against a plane, interpolating
//!   position, normal and UV at every crossing
//! - [`GridDecomposer`] repeats that per axis to decompose a whole mesh
//! - [`clump`] moves fragments out of unusable cells and merges them
//!
//! Polygons carry an opaque payload `P` (a texture, a material name, `()` …)
//! that is copied onto every fragment and never inspected.
//!
//! All values are immutable; every operation returns a new value. One
//! [`EpsilonMath`] tolerance governs every classification so that plane
//! incidence and integer snapping agree.

mod config;
mod cuttable;
mod cyclic;
mod epsilon;
mod error;
mod group;
mod mesh;
mod plane;
mod polygon;
mod vector;
mod vertex;

pub mod grid;

pub use config::SplitConfig;
pub use cuttable::{Cuttable, Sided};
pub use cyclic::Cyclic;
pub use epsilon::{DEFAULT_EPSILON, EpsilonMath, Sign};
pub use error::{SplitError, SplitResult};
pub use grid::{CellMap, GridCell, GridDecomposer, Payload, clump, nearest_usable, split_into_cells};
pub use group::Group;
pub use mesh::{DEFAULT_GROUP, Mesh};
pub use plane::Plane;
pub use polygon::Polygon;
pub use vector::{Axis, MAX_COORDINATE, Vec3d};
pub use vertex::{UvCoords, Vertex};
