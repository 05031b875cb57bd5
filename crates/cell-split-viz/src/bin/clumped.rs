use std::collections::BTreeSet;

use cell_split::{CellMap, GridCell, GridDecomposer, SplitConfig, SplitError, clump};
use cell_split_viz::{CellNavigator, OrbitCamera, draw_axes, draw_cell_outline, random_rotated_cubes};
use macroquad::prelude::*;

const SEED: u64 = 42;
const NUM_CUBES: usize = 6;
const WORLD_SIZE: f64 = 5.0;
const GAP: f32 = 0.3;

/// The 3×3 floor of cells around the origin.
fn usable_cells() -> BTreeSet<GridCell> {
    (-1..=1)
        .flat_map(|x| (-1..=1).map(move |z| GridCell::new(x, 0, z)))
        .collect()
}

fn build_views(usable: &BTreeSet<GridCell>) -> Result<(CellMap<()>, CellMap<()>), SplitError> {
    let mesh = random_rotated_cubes(SEED, NUM_CUBES, WORLD_SIZE)?;
    let cells = GridDecomposer::new(SplitConfig::default())?.decompose(&mesh)?;
    let clumped = clump(cells.clone(), usable)?;
    Ok((cells, clumped))
}

#[macroquad::main("Clumped Cells")]
async fn main() {
    let usable = usable_cells();
    let (cells, clumped) = match build_views(&usable) {
        Ok(views) => views,
        Err(err) => {
            eprintln!("Failed to build scene: {err}");
            return;
        }
    };
    println!(
        "{} cells clumped into {} of {} usable cells",
        cells.len(),
        clumped.len(),
        usable.len()
    );

    let mut show_clumped = true;
    let mut navigator = CellNavigator::new();
    let mut camera = OrbitCamera::looking_at(navigator.focus_point(&clumped, GAP), 14.0);

    loop {
        camera.update();
        let mut refocus = false;
        if is_key_pressed(KeyCode::C) {
            show_clumped = !show_clumped;
            refocus = true;
        }
        let view = if show_clumped { &clumped } else { &cells };
        navigator.clamp(view.len());
        refocus |= navigator.update(view.len());
        if refocus {
            camera.focus(navigator.focus_point(view, GAP));
        }

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        navigator.render(view, GAP);
        if show_clumped {
            for cell in &usable {
                draw_cell_outline(*cell, GAP, Color::from_rgba(80, 80, 100, 255));
            }
        }
        draw_axes(2.0);

        set_default_camera();

        let title = if show_clumped { "Clumped" } else { "Decomposed" };
        draw_text(
            &format!("{title} view - {} cells", view.len()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text("[C] toggles decomposed / clumped", 10.0, 45.0, 18.0, GRAY);

        navigator.draw_ui(view, 70.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 135.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
