use cell_split::{CellMap, GridDecomposer, SplitConfig};
use cell_split_viz::{CellNavigator, OrbitCamera, draw_axes, random_rotated_cubes};
use macroquad::prelude::*;

const SEED: u64 = 42;
const NUM_CUBES: usize = 6;
const WORLD_SIZE: f64 = 5.0;
const EXPLODED_GAP: f32 = 0.3;

fn build_cells() -> Result<CellMap<()>, cell_split::SplitError> {
    let mesh = random_rotated_cubes(SEED, NUM_CUBES, WORLD_SIZE)?;
    println!("Created {} polygons", mesh.polygon_count());
    GridDecomposer::new(SplitConfig::default())?.decompose(&mesh)
}

#[macroquad::main("Grid Decomposition")]
async fn main() {
    let cells = match build_cells() {
        Ok(cells) => cells,
        Err(err) => {
            eprintln!("Failed to build scene: {err}");
            return;
        }
    };
    let polygon_count: usize = cells.values().map(|m| m.polygon_count()).sum();
    println!("Decomposed into {} cells, {} polygons", cells.len(), polygon_count);

    let mut gap = EXPLODED_GAP;
    let mut navigator = CellNavigator::new();
    let mut camera = OrbitCamera::looking_at(navigator.focus_point(&cells, gap), 14.0);

    loop {
        camera.update();
        let mut refocus = navigator.update(cells.len());
        if is_key_pressed(KeyCode::G) {
            gap = if gap > 0.0 { 0.0 } else { EXPLODED_GAP };
            refocus = true;
        }
        if refocus {
            camera.focus(navigator.focus_point(&cells, gap));
        }

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        navigator.render(&cells, gap);
        draw_axes(2.0);

        set_default_camera();

        draw_text(
            &format!("Grid Decomposition - {} cells, {} polygons", cells.len(), polygon_count),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("Gap: {gap:.1} ([G] toggles exploded view)"),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(&cells, 70.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 135.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 155.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
