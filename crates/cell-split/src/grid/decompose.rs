//! Recursive per-axis decomposition of a mesh into unit cells.

use tracing::{debug, info};

use super::{CellMap, GridCell, insert_merged};
use crate::{Axis, Cuttable, EpsilonMath, Mesh, Plane, Sided, SplitConfig, SplitResult};

/// Bound on the polygon payload for decomposition.
///
/// Only `Clone` is required; with the `parallel` feature the payload must
/// also be shareable across threads.
#[cfg(not(feature = "parallel"))]
pub trait Payload: Clone {}

#[cfg(not(feature = "parallel"))]
impl<T: Clone> Payload for T {}

/// Bound on the polygon payload for decomposition.
///
/// Only `Clone` is required; with the `parallel` feature the payload must
/// also be shareable across threads.
#[cfg(feature = "parallel")]
pub trait Payload: Clone + Send + Sync {}

#[cfg(feature = "parallel")]
impl<T: Clone + Send + Sync> Payload for T {}

/// Splits meshes into fragments, one per unit cell of the integer lattice.
///
/// For each axis in the configured order the mesh is cut at every integer
/// boundary it spans, lowest first. The part below boundary `b` (including
/// anything lying exactly on `b`) becomes slab `b - 1`; the part above the
/// last boundary becomes the final slab. Each slab is moved into local
/// coordinates (its lower face at 0) and split along the next axis.
///
/// Every fragment in the result therefore lies within `[0, 1]³` up to the
/// tolerance, and translating it back by its cell reconstructs its part of
/// the input.
#[derive(Debug, Clone)]
pub struct GridDecomposer {
    config: SplitConfig,
    eps: EpsilonMath,
}

impl GridDecomposer {
    /// Creates a decomposer, validating `config`.
    pub fn new(config: SplitConfig) -> SplitResult<Self> {
        let eps = config.validate()?;
        Ok(Self { config, eps })
    }

    #[inline]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// The tolerance helpers built from the validated config.
    #[inline]
    pub fn epsilon(&self) -> &EpsilonMath {
        &self.eps
    }

    /// Splits `mesh` into cell-local fragments keyed by cell.
    ///
    /// The empty mesh yields an empty map; fragments without polygons are
    /// never emitted. Fails with [`SplitError::CoordinateOutOfRange`] if the
    /// mesh reaches past the cells an `i32` index can name.
    ///
    /// [`SplitError::CoordinateOutOfRange`]: crate::SplitError::CoordinateOutOfRange
    pub fn decompose<P: Payload>(&self, mesh: &Mesh<P>) -> SplitResult<CellMap<P>> {
        let fragments = self.decompose_axes(mesh.clone(), &self.config.axis_order, GridCell::ORIGIN)?;

        let mut cells = CellMap::new();
        for (cell, fragment) in fragments {
            insert_merged(&mut cells, cell, fragment);
        }

        info!(
            polygons = mesh.polygon_count(),
            cells = cells.len(),
            "Decomposed mesh into grid cells"
        );
        Ok(cells)
    }

    fn decompose_axes<P: Payload>(
        &self,
        mesh: Mesh<P>,
        axes: &[Axis],
        cell: GridCell,
    ) -> SplitResult<Vec<(GridCell, Mesh<P>)>> {
        let Some((&axis, rest)) = axes.split_first() else {
            let fragment = if self.config.quadify { mesh.quadify() } else { mesh };
            return Ok(vec![(cell, fragment)]);
        };

        let slabs = self.split_in_planes(mesh, axis)?;

        #[cfg(feature = "parallel")]
        let nested = {
            use rayon::iter::{IntoParallelIterator, ParallelIterator};
            slabs
                .into_par_iter()
                .map(|(index, slab)| self.decompose_axes(slab, rest, cell.with(axis, index)))
                .collect::<SplitResult<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let nested = slabs
            .into_iter()
            .map(|(index, slab)| self.decompose_axes(slab, rest, cell.with(axis, index)))
            .collect::<SplitResult<Vec<_>>>()?;

        Ok(nested.into_iter().flatten().collect())
    }

    /// Cuts `mesh` at every integer boundary along `axis` and returns the
    /// non-empty slabs, each translated so that its lower boundary is at 0.
    fn split_in_planes<P: Payload>(&self, mesh: Mesh<P>, axis: Axis) -> SplitResult<Vec<(i32, Mesh<P>)>> {
        let Some((min, max)) = mesh.extent(axis) else {
            return Ok(Vec::new());
        };
        let first = self.eps.ceil(min)?;
        let last = self.eps.floor(max)?;
        debug!(?axis, first, last, polygons = mesh.polygon_count(), "Splitting along axis");

        let (mut slabs, above) =
            (first..=last).fold((Vec::new(), mesh), |(mut slabs, remaining), boundary| {
                let Sided {
                    negative,
                    zero,
                    positive,
                } = remaining.split(&Plane::grid_boundary(axis, boundary), &self.eps);
                // geometry lying on the boundary itself goes to the slab below
                let below = negative.unwrap_or_default().union(zero.unwrap_or_default());
                push_slab(&mut slabs, axis, boundary - 1, below);
                (slabs, positive.unwrap_or_default())
            });
        push_slab(&mut slabs, axis, last, above);
        Ok(slabs)
    }
}

fn push_slab<P: Clone>(slabs: &mut Vec<(i32, Mesh<P>)>, axis: Axis, index: i32, slab: Mesh<P>) {
    if !slab.is_empty() {
        slabs.push((index, slab.translate_along(axis, -index)));
    }
}

/// Decomposes `mesh` with a one-off [`GridDecomposer`].
pub fn split_into_cells<P: Payload>(mesh: &Mesh<P>, config: &SplitConfig) -> SplitResult<CellMap<P>> {
    GridDecomposer::new(config.clone())?.decompose(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Polygon, SplitError, UvCoords, Vec3d, Vertex};
    use approx::assert_relative_eq;

    /// A quad in the plane `z = z`, spanning `[x0, x1] × [y0, y1]`.
    fn make_quad(x: [f64; 2], y: [f64; 2], z: f64) -> Polygon {
        let corners = [[x[0], y[0]], [x[1], y[0]], [x[1], y[1]], [x[0], y[1]]];
        let vertices = corners
            .iter()
            .map(|[px, py]| {
                Vertex::new(
                    Vec3d::new(*px, *py, z).unwrap(),
                    Vec3d::unit(Axis::Z),
                    UvCoords::new(*px, *py),
                )
            })
            .collect();
        Polygon::new(vertices, ()).unwrap()
    }

    fn decompose(polygons: Vec<Polygon>) -> CellMap<()> {
        let mesh = Mesh::from_polygons(polygons).unwrap();
        GridDecomposer::new(SplitConfig::default()).unwrap().decompose(&mesh).unwrap()
    }

    fn assert_within_unit_cube(cells: &CellMap<()>) {
        let eps = 1e-5;
        for fragment in cells.values() {
            for axis in Axis::ALL {
                let (min, max) = fragment.extent(axis).unwrap();
                assert!(min >= -eps && max <= 1.0 + eps, "{axis:?}: [{min}, {max}]");
            }
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let err = GridDecomposer::new(SplitConfig::default().with_epsilon(0.0));
        assert!(matches!(err, Err(SplitError::InvalidEpsilon(_))));
    }

    #[test]
    fn epsilon_follows_config() {
        let decomposer = GridDecomposer::new(SplitConfig::default().with_epsilon(1e-3)).unwrap();
        assert_eq!(decomposer.epsilon().epsilon(), 1e-3);
        assert_eq!(decomposer.config().epsilon, 1e-3);
    }

    #[test]
    fn coordinates_beyond_cell_range_rejected() {
        let far = make_quad([1e10, 1e10 + 0.5], [0.0, 0.5], 0.5);
        let mesh = Mesh::from_polygons(vec![far]).unwrap();
        let err = split_into_cells(&mesh, &SplitConfig::default());
        assert_eq!(err, Err(SplitError::CoordinateOutOfRange(1e10)));

        let below = make_quad([0.25, 0.75], [0.0, 0.5], -3e9);
        let mesh = Mesh::from_polygons(vec![below]).unwrap();
        assert!(matches!(
            split_into_cells(&mesh, &SplitConfig::default()),
            Err(SplitError::CoordinateOutOfRange(_))
        ));
    }

    #[test]
    fn empty_mesh_has_no_cells() {
        assert!(decompose(Vec::new()).is_empty());
    }

    #[test]
    fn polygon_inside_one_cell_is_untouched() {
        let quad = make_quad([0.2, 0.8], [0.1, 0.9], 0.5);
        let cells = decompose(vec![quad.clone()]);

        assert_eq!(cells.len(), 1);
        let fragment = &cells[&GridCell::ORIGIN];
        assert_eq!(fragment.polygons().collect::<Vec<_>>(), vec![&quad]);
    }

    #[test]
    fn spanning_polygon_is_cut_per_cell() {
        let cells = decompose(vec![make_quad([0.5, 2.5], [0.25, 0.75], 0.5)]);

        let keys: Vec<_> = cells.keys().copied().collect();
        assert_eq!(
            keys,
            vec![GridCell::new(0, 0, 0), GridCell::new(1, 0, 0), GridCell::new(2, 0, 0)]
        );
        assert_within_unit_cube(&cells);

        // middle cell covers the whole unit width
        let (min, max) = cells[&GridCell::new(1, 0, 0)].extent(Axis::X).unwrap();
        assert_relative_eq!(min, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max, 1.0, epsilon = 1e-12);
        let (min, max) = cells[&GridCell::new(2, 0, 0)].extent(Axis::X).unwrap();
        assert_relative_eq!(min, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn negative_coordinates() {
        let cells = decompose(vec![make_quad([-1.5, -0.5], [-0.75, -0.25], -2.5)]);
        let keys: Vec<_> = cells.keys().copied().collect();
        assert_eq!(keys, vec![GridCell::new(-2, -1, -3), GridCell::new(-1, -1, -3)]);
        assert_within_unit_cube(&cells);
    }

    #[test]
    fn geometry_on_boundary_goes_to_lower_cell() {
        // quad lying in the plane y = 1
        let vertices = [[0.25, 0.25], [0.75, 0.25], [0.75, 0.75], [0.25, 0.75]]
            .iter()
            .map(|[x, z]| {
                Vertex::new(
                    Vec3d::new(*x, 1.0, *z).unwrap(),
                    Vec3d::unit(Axis::Y),
                    UvCoords::ZERO,
                )
            })
            .collect();
        let cells = decompose(vec![Polygon::new(vertices, ()).unwrap()]);

        assert_eq!(cells.keys().copied().collect::<Vec<_>>(), vec![GridCell::ORIGIN]);
        assert_eq!(cells[&GridCell::ORIGIN].extent(Axis::Y), Some((1.0, 1.0)));
    }

    #[test]
    fn near_integer_coordinates_snap() {
        let cells = decompose(vec![make_quad([1e-7, 1.0 - 1e-7], [0.0, 1.0], 0.5)]);
        assert_eq!(cells.len(), 1);
        assert!(cells.contains_key(&GridCell::ORIGIN));
    }

    #[test]
    fn output_is_quadified() {
        let triangle = Polygon::new(
            make_quad([0.5, 1.5], [0.5, 1.5], 0.5).into_parts().0[..3].to_vec(),
            (),
        )
        .unwrap();
        let cells = decompose(vec![triangle]);
        assert!(cells.values().flat_map(Mesh::polygons).all(Polygon::is_quad));

        let mesh = Mesh::from_polygons(vec![make_quad([0.5, 1.5], [0.5, 1.5], 0.5)]).unwrap();
        let config = SplitConfig::default().with_quadify(false);
        let raw = split_into_cells(&mesh, &config).unwrap();
        assert_eq!(raw.len(), 4);
    }

    #[test]
    fn axis_order_does_not_change_cells() {
        let mesh = Mesh::from_polygons(vec![
            make_quad([0.5, 2.5], [0.5, 1.5], 0.5),
            make_quad([-0.5, 0.5], [0.0, 3.0], 1.5),
        ])
        .unwrap();

        let xzy = split_into_cells(&mesh, &SplitConfig::default()).unwrap();
        let yxz = split_into_cells(
            &mesh,
            &SplitConfig::default().with_axis_order([Axis::Y, Axis::X, Axis::Z]),
        )
        .unwrap();

        assert_eq!(xzy.keys().collect::<Vec<_>>(), yxz.keys().collect::<Vec<_>>());
        for (cell, fragment) in &xzy {
            assert_eq!(fragment.polygon_count(), yxz[cell].polygon_count());
        }
    }
}
