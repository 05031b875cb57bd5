//! Reassignment of fragments from unusable cells to the nearest usable cell.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::{CellMap, GridCell, insert_merged};
use crate::{SplitError, SplitResult, Vec3d};

/// Returns the usable cell closest to `cell` by squared distance.
///
/// Ties go to the smallest candidate in cell order. Returns `None` only if
/// `usable` is empty.
pub fn nearest_usable(cell: GridCell, usable: &BTreeSet<GridCell>) -> Option<GridCell> {
    usable
        .iter()
        .copied()
        .min_by_key(|candidate| candidate.distance_sq(&cell))
}

/// Assigns every fragment to a usable cell.
///
/// Fragments already in a usable cell stay where they are. Any other
/// fragment moves to its [`nearest_usable`] cell and is translated by
/// `source - target`, so that it keeps its position relative to the target
/// cell's origin. Fragments landing in the same cell are merged.
///
/// # Errors
/// [`SplitError::NoUsableCells`] if `usable` is empty.
pub fn clump<P: Clone>(cells: CellMap<P>, usable: &BTreeSet<GridCell>) -> SplitResult<CellMap<P>> {
    if usable.is_empty() {
        return Err(SplitError::NoUsableCells);
    }

    let sources = cells.len();
    let mut relocated = 0usize;
    let mut clumped = CellMap::new();
    for (source, fragment) in cells {
        if usable.contains(&source) {
            insert_merged(&mut clumped, source, fragment);
            continue;
        }

        let target = nearest_usable(source, usable).ok_or(SplitError::NoUsableCells)?;
        debug!(
            %source,
            %target,
            distance_sq = source.distance_sq(&target),
            "Relocating fragment to nearest usable cell"
        );
        relocated += 1;
        insert_merged(
            &mut clumped,
            target,
            fragment.translate(Vec3d::from(source) - Vec3d::from(target)),
        );
    }

    info!(
        sources,
        relocated,
        targets = clumped.len(),
        "Clumped fragments into usable cells"
    );
    Ok(clumped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Mesh, Polygon, UvCoords, Vertex};

    fn make_fragment(name: &str) -> Mesh<&'static str> {
        let vertices = [[0.25, 0.25], [0.75, 0.25], [0.75, 0.75], [0.25, 0.75]]
            .iter()
            .map(|[x, y]| {
                Vertex::new(
                    Vec3d::new(*x, *y, 0.5).unwrap(),
                    Vec3d::unit(Axis::Z),
                    UvCoords::ZERO,
                )
            })
            .collect();
        let polygon = Polygon::new(vertices, "tex").unwrap();
        Mesh::from_groups([crate::Group::new(name, vec![polygon]).unwrap()])
    }

    fn cells(entries: &[([i32; 3], &str)]) -> CellMap<&'static str> {
        entries
            .iter()
            .map(|(cell, name)| (GridCell::from(*cell), make_fragment(name)))
            .collect()
    }

    #[test]
    fn empty_usable_set_rejected() {
        let result = clump(cells(&[([0, 0, 0], "a")]), &BTreeSet::new());
        assert_eq!(result, Err(SplitError::NoUsableCells));
    }

    #[test]
    fn nearest_prefers_smaller_distance_then_cell_order() {
        let usable = BTreeSet::from([
            GridCell::new(3, 0, 0),
            GridCell::new(0, 0, 2),
            GridCell::new(0, 0, -2),
        ]);
        assert_eq!(
            nearest_usable(GridCell::new(2, 0, 0), &usable),
            Some(GridCell::new(3, 0, 0))
        );
        // (0,0,2) and (0,0,-2) are equally far from the origin
        assert_eq!(
            nearest_usable(GridCell::ORIGIN, &usable),
            Some(GridCell::new(0, 0, -2))
        );
        assert_eq!(nearest_usable(GridCell::ORIGIN, &BTreeSet::new()), None);
    }

    #[test]
    fn usable_cells_keep_fragments_in_place() {
        let input = cells(&[([0, 0, 0], "a"), ([1, 0, 0], "b")]);
        let usable = BTreeSet::from([GridCell::new(0, 0, 0), GridCell::new(1, 0, 0)]);

        let clumped = clump(input.clone(), &usable).unwrap();
        assert_eq!(clumped, input);
    }

    #[test]
    fn unusable_fragment_moves_and_merges() {
        let input = cells(&[([0, 0, 0], "a"), ([1, 0, 0], "b")]);
        let usable = BTreeSet::from([GridCell::ORIGIN]);

        let clumped = clump(input, &usable).unwrap();
        assert_eq!(clumped.len(), 1);

        let target = &clumped[&GridCell::ORIGIN];
        assert_eq!(target.polygon_count(), 2);
        assert_eq!(target.group("a").unwrap().polygons()[0].vertices()[0].position.x(), 0.25);
        // translated by (1, 0, 0) relative to the target cell
        assert_eq!(target.group("b").unwrap().polygons()[0].vertices()[0].position.x(), 1.25);
        assert!(target.polygons().all(|p| *p.payload() == "tex"));
    }

    #[test]
    fn same_named_groups_from_different_cells_are_kept() {
        let input = cells(&[([0, 0, 5], "hull"), ([0, 0, 6], "hull"), ([0, 0, 7], "hull")]);
        let usable = BTreeSet::from([GridCell::new(0, 0, 6)]);

        let clumped = clump(input, &usable).unwrap();
        assert_eq!(clumped.len(), 1);
        let hull = clumped[&GridCell::new(0, 0, 6)].group("hull").unwrap();
        assert_eq!(hull.len(), 3);

        let mut zs: Vec<f64> = hull
            .polygons()
            .iter()
            .map(|p| p.vertices()[0].position.z())
            .collect();
        zs.sort_by(f64::total_cmp);
        assert_eq!(zs, vec![-0.5, 0.5, 1.5]);
    }
}
