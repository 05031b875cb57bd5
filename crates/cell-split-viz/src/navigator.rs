//! Stepping through the cells of a decomposition one at a time.

use cell_split::{CellMap, GridCell, Mesh};
use macroquad::prelude::*;

use crate::{cell_color, cell_offset, draw_cell_outline, draw_cells, draw_fragment};

/// Selects either all cells or a single one, by position in cell order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellNavigator {
    selected: Option<usize>,
}

impl CellNavigator {
    /// Creates a navigator showing all cells.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects the next cell, wrapping around. From "all", selects the first.
    pub fn next(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % count,
            None => 0,
        });
        true
    }

    /// Selects the previous cell, wrapping around. From "all", selects the last.
    pub fn previous(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        });
        true
    }

    /// Shows all cells. Returns `true` if a single cell was selected.
    pub fn show_all(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Drops a selection that is out of range for `count` cells, e.g. after
    /// switching to a view with fewer cells.
    pub fn clamp(&mut self, count: usize) {
        if self.selected.is_some_and(|i| i >= count) {
            self.selected = None;
        }
    }

    /// Handles `N` (next), `P` (previous) and `A` (all).
    /// Returns `true` if the selection changed.
    pub fn update(&mut self, count: usize) -> bool {
        let mut changed = false;
        if is_key_pressed(KeyCode::N) {
            changed |= self.next(count);
        }
        if is_key_pressed(KeyCode::P) {
            changed |= self.previous(count);
        }
        if is_key_pressed(KeyCode::A) {
            changed |= self.show_all();
        }
        changed
    }

    /// The selected cell and its fragment.
    pub fn selected_cell<'a, P>(&self, cells: &'a CellMap<P>) -> Option<(GridCell, &'a Mesh<P>)> {
        self.selected
            .and_then(|i| cells.iter().nth(i))
            .map(|(cell, fragment)| (*cell, fragment))
    }

    /// Point for the camera to look at: the selected cell's center, or the
    /// center of the occupied cells' bounding box.
    pub fn focus_point<P>(&self, cells: &CellMap<P>, gap: f32) -> Vec3 {
        let half = vec3(0.5, 0.5, 0.5);
        if let Some((cell, _)) = self.selected_cell(cells) {
            return cell_offset(cell, gap) + half;
        }

        let offsets = cells.keys().map(|cell| cell_offset(*cell, gap));
        let (min, max) = offsets.fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), offset| (min.min(offset), max.max(offset + Vec3::ONE)),
        );
        if cells.is_empty() {
            Vec3::ZERO
        } else {
            (min + max) / 2.0
        }
    }

    /// Draws the selected cell with its outline, or every cell.
    pub fn render<P>(&self, cells: &CellMap<P>, gap: f32) {
        match self.selected_cell(cells) {
            Some((cell, fragment)) => {
                let color = cell_color(cell);
                draw_fragment(fragment, cell_offset(cell, gap), color);
                draw_cell_outline(cell, gap, color);
            }
            None => draw_cells(cells, gap),
        }
    }

    /// Draws the selection overlay starting at `y_offset`.
    pub fn draw_ui<P>(&self, cells: &CellMap<P>, y_offset: f32) {
        let (label, polygons, groups, color) = match self.selected_cell(cells) {
            Some((cell, fragment)) => (
                format!(
                    "Cell {} ({} of {})",
                    cell,
                    self.selected.map_or(0, |i| i + 1),
                    cells.len()
                ),
                fragment.polygon_count(),
                fragment.group_count(),
                cell_color(cell),
            ),
            None => (
                format!("All {} cells", cells.len()),
                cells.values().map(Mesh::polygon_count).sum(),
                cells.values().map(Mesh::group_count).sum(),
                WHITE,
            ),
        };

        draw_text(&label, 10.0, y_offset, 18.0, color);
        draw_text(
            &format!("{polygons} polygons in {groups} groups"),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            "[N]ext | [P]revious | [A]ll",
            10.0,
            y_offset + 40.0,
            16.0,
            DARKGRAY,
        );
    }
}
