//! Demo geometry: cubes, rotated cubes and seeded random arrangements.

use cell_split::{Group, Mesh, Plane, Polygon, SplitResult, UvCoords, Vec3d, Vertex};
use nalgebra::{Point3, Rotation3, Unit, Vector3};

const MIN_CUBE_SIZE: f64 = 0.8;
const MAX_CUBE_SIZE: f64 = 2.5;

/// Cube corners as signs of the half extent.
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Faces wound counter-clockwise seen from outside, one group per face.
const FACES: [(&str, [usize; 4]); 6] = [
    ("front", [4, 5, 6, 7]),
    ("back", [1, 0, 3, 2]),
    ("left", [0, 4, 7, 3]),
    ("right", [5, 1, 2, 6]),
    ("top", [7, 6, 2, 3]),
    ("bottom", [0, 1, 5, 4]),
];

const FACE_UVS: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// An axis-aligned cube with edge length `size`.
pub fn generate_cube(center: Point3<f64>, size: f64) -> SplitResult<Mesh> {
    generate_rotated_cube(center, size, &Rotation3::identity())
}

/// A cube rotated about its center. Each face carries its outward normal
/// and a full `[0, 1]²` UV square.
pub fn generate_rotated_cube(
    center: Point3<f64>,
    size: f64,
    rotation: &Rotation3<f64>,
) -> SplitResult<Mesh> {
    let half = size / 2.0;
    let corners: Vec<Point3<f64>> = CORNERS
        .iter()
        .map(|c| center + rotation * (Vector3::from(*c) * half))
        .collect();

    let groups = FACES
        .iter()
        .map(|(name, indices)| {
            let quad = coplanar_quad(indices.map(|i| corners[i]))?;
            Group::new(*name, vec![quad])
        })
        .collect::<SplitResult<Vec<_>>>()?;
    Ok(Mesh::from_groups(groups))
}

/// Builds a quad in the plane of its first three corners; the fourth is
/// projected onto that plane.
fn coplanar_quad(corners: [Point3<f64>; 4]) -> SplitResult<Polygon> {
    let mut positions = corners
        .iter()
        .map(|p| Vec3d::try_from(p.coords))
        .collect::<SplitResult<Vec<_>>>()?;

    let normal = (positions[1] - positions[0]).cross(&(positions[2] - positions[0]));
    let plane = Plane::new(normal, normal.dot(&positions[0]))?;
    let offset = plane.evaluate(&positions[3]);
    positions[3] = Vec3d::try_from(positions[3].as_vector() - plane.normal().as_vector() * offset)?;

    let vertices = positions
        .into_iter()
        .zip(FACE_UVS)
        .map(|(position, [u, v])| Vertex::new(position, plane.normal(), UvCoords::new(u, v)))
        .collect();
    Polygon::new(vertices, ())
}

/// Seeded linear congruential generator for reproducible scenes.
pub struct SceneRng {
    state: u64,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// `count` randomly rotated cubes centred within `[-world_size / 2, world_size / 2]³`.
pub fn random_rotated_cubes(seed: u64, count: usize, world_size: f64) -> SplitResult<Mesh> {
    let mut rng = SceneRng::new(seed);
    let mut mesh = Mesh::new();

    for _ in 0..count {
        let center = Point3::new(
            (rng.next_f64() - 0.5) * world_size,
            (rng.next_f64() - 0.5) * world_size,
            (rng.next_f64() - 0.5) * world_size,
        );
        let size = rng.range(MIN_CUBE_SIZE, MAX_CUBE_SIZE);

        let axis = Vector3::new(
            rng.next_f64() - 0.5,
            rng.next_f64() - 0.5,
            rng.next_f64() - 0.5,
        );
        let axis = Unit::try_new(axis, 1e-2).unwrap_or_else(Vector3::x_axis);
        let rotation = Rotation3::from_axis_angle(&axis, rng.next_f64() * std::f64::consts::TAU);

        mesh = mesh.union(generate_rotated_cube(center, size, &rotation)?);
    }
    Ok(mesh)
}
