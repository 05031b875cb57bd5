//! Rendering helpers for viewing grid decompositions with macroquad.
//!
//! Fragments are stored in cell-local coordinates, so every fragment is
//! drawn at its cell's offset. A gap between cells gives an exploded view.

use std::hash::{DefaultHasher, Hash, Hasher};

use cell_split::{CellMap, GridCell, Mesh, Polygon, Vec3d};
use macroquad::models::{Mesh as DrawMesh, Vertex as DrawVertex, draw_mesh};
use macroquad::prelude::*;

pub mod navigator;
pub mod scene;

pub use navigator::CellNavigator;
pub use scene::{generate_cube, generate_rotated_cube, random_rotated_cubes};

/// Deterministic colour for a cell, so a cell keeps its colour across views.
pub fn cell_color(cell: GridCell) -> Color {
    let mut hasher = DefaultHasher::new();
    cell.hash(&mut hasher);
    let hash = hasher.finish();

    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;
    Color::from_rgba(r.max(60), g.max(60), b.max(60), 255)
}

/// World-space position of a cell's origin, spread apart by `gap`.
pub fn cell_offset(cell: GridCell, gap: f32) -> Vec3 {
    vec3(cell.x as f32, cell.y as f32, cell.z as f32) * (1.0 + gap)
}

fn to_vec3(v: Vec3d) -> Vec3 {
    vec3(v.x() as f32, v.y() as f32, v.z() as f32)
}

/// Brightness factor from the vertex normal against a fixed light.
fn shade(normal: Vec3d, color: Color) -> Color {
    let light = vec3(0.3, 0.8, 0.5).normalize();
    let factor = 0.55 + 0.45 * to_vec3(normal).dot(light).abs().min(1.0);
    Color::new(color.r * factor, color.g * factor, color.b * factor, color.a)
}

/// Draws one polygon, fan-triangulated, moved by `offset`.
pub fn draw_polygon<P>(polygon: &Polygon<P>, offset: Vec3, color: Color) {
    let vertices: Vec<DrawVertex> = polygon
        .vertices()
        .iter()
        .map(|v| {
            DrawVertex::new2(
                offset + to_vec3(v.position),
                vec2(v.uv.u as f32, v.uv.v as f32),
                shade(v.normal, color),
            )
        })
        .collect();
    let indices = (1..vertices.len() as u16 - 1)
        .flat_map(|i| [0, i, i + 1])
        .collect();

    draw_mesh(&DrawMesh {
        vertices,
        indices,
        texture: None,
    });
}

/// Draws every polygon of a cell-local fragment at `offset`.
pub fn draw_fragment<P>(fragment: &Mesh<P>, offset: Vec3, color: Color) {
    for polygon in fragment.polygons() {
        draw_polygon(polygon, offset, color);
    }
}

/// Draws the wireframe of a cell.
pub fn draw_cell_outline(cell: GridCell, gap: f32, color: Color) {
    draw_cube_wires(cell_offset(cell, gap) + vec3(0.5, 0.5, 0.5), Vec3::ONE, color);
}

/// Draws all cells of a decomposition, each in its own colour.
pub fn draw_cells<P>(cells: &CellMap<P>, gap: f32) {
    for (cell, fragment) in cells {
        draw_fragment(fragment, cell_offset(*cell, gap), cell_color(*cell));
    }
}

/// Orbit camera circling a focus point.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    const ROTATE_STEP: f32 = 0.02;
    const DRAG_SPEED: f32 = 2.0;
    const ZOOM_STEP: f32 = 0.5;

    /// Looks at `target` from `distance`, slightly from above.
    pub fn looking_at(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            yaw: 0.6,
            pitch: 0.4,
            min_distance: 2.0,
            max_distance: distance * 4.0,
        }
    }

    /// Moves the focus point, keeping the viewing angle.
    pub fn focus(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Applies mouse drag, scroll wheel and arrow keys.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * Self::DRAG_SPEED;
            self.pitch -= delta.y * Self::DRAG_SPEED;
        }
        if is_key_down(KeyCode::Left) {
            self.yaw += Self::ROTATE_STEP;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= Self::ROTATE_STEP;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += Self::ROTATE_STEP;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= Self::ROTATE_STEP;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            self.distance = (self.distance - scroll.signum() * Self::ZOOM_STEP)
                .clamp(self.min_distance, self.max_distance);
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: Vec3::Y,
            target: self.target,
            ..Default::default()
        }
    }
}

/// Draws the world axes from the origin: X red, Y green, Z blue.
pub fn draw_axes(length: f32) {
    draw_line_3d(Vec3::ZERO, vec3(length, 0.0, 0.0), RED);
    draw_line_3d(Vec3::ZERO, vec3(0.0, length, 0.0), GREEN);
    draw_line_3d(Vec3::ZERO, vec3(0.0, 0.0, length), BLUE);
}
