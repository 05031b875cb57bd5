//! Decomposition of meshes into unit grid cells, and reassignment of cells.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use cell_split::{clump, GridCell, GridDecomposer, Mesh, Polygon, SplitConfig, UvCoords, Vec3d, Vertex};
//!
//! # fn main() -> Result<(), cell_split::SplitError> {
//! // A quad lying across the boundary x = 1
//! let corner = |x: f64, z: f64| -> Result<Vertex, cell_split::SplitError> {
//!     Ok(Vertex::new(Vec3d::new(x, 0.5, z)?, Vec3d::new(0.0, 1.0, 0.0)?, UvCoords::ZERO))
//! };
//! let quad = Polygon::new(
//!     vec![corner(0.5, 0.25)?, corner(1.5, 0.25)?, corner(1.5, 0.75)?, corner(0.5, 0.75)?],
//!     (),
//! )?;
//! let mesh = Mesh::from_polygons(vec![quad])?;
//!
//! let cells = GridDecomposer::new(SplitConfig::default())?.decompose(&mesh)?;
//! assert_eq!(cells.len(), 2);
//!
//! let usable = BTreeSet::from([GridCell::ORIGIN]);
//! let clumped = clump(cells, &usable)?;
//! assert_eq!(clumped.len(), 1);
//! # Ok(())
//! # }
//! ```

mod cell;
mod clump;
mod decompose;

use std::collections::BTreeMap;

pub use cell::GridCell;
pub use clump::{clump, nearest_usable};
pub use decompose::{GridDecomposer, Payload, split_into_cells};

use crate::Mesh;

/// Mesh fragments keyed by the cell they belong to, in cell order.
pub type CellMap<P> = BTreeMap<GridCell, Mesh<P>>;

/// Inserts `mesh` at `cell`, merging with whatever is already there.
fn insert_merged<P>(cells: &mut CellMap<P>, cell: GridCell, mesh: Mesh<P>) {
    let merged = match cells.remove(&cell) {
        Some(existing) => existing.union(mesh),
        None => mesh,
    };
    cells.insert(cell, merged);
}
