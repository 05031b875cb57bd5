//! Wavefront OBJ parsing.

use std::io::BufRead;

use cell_split::{Axis, DEFAULT_GROUP, Group, Mesh, Polygon, SplitError, UvCoords, Vec3d, Vertex};
use hashbrown::HashMap;
use tracing::debug;

use crate::{ObjError, ObjResult};

/// Polygon payload of meshes read from OBJ: the material selected by the
/// last `usemtl` statement, if any.
pub type ObjMaterial = Option<String>;

/// A parsed OBJ file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjModel {
    pub mesh: Mesh<ObjMaterial>,
    /// File names from `mtllib` statements, in order of appearance.
    pub material_libraries: Vec<String>,
}

/// Reads a mesh from OBJ text, dropping `mtllib` references.
///
/// See [`read_obj_model`] for the accepted syntax.
pub fn read_obj<R: BufRead>(reader: R) -> ObjResult<Mesh<ObjMaterial>> {
    read_obj_model(reader).map(|model| model.mesh)
}

/// Reads a mesh and its material library references from OBJ text.
///
/// Supported statements are `v`, `vn`, `vt`, `f`, `o`/`g` (switch the
/// current group), `usemtl` and `mtllib`. A bare `usemtl` clears the
/// material. Face vertices may be written `v`, `v/vt`, `v//vn` or
/// `v/vt/vn`, with 1-based or negative (relative) indices. Missing UVs
/// default to `(0, 0)` and missing normals to `(0, 1, 0)`. Comments and
/// blank lines are skipped; any other statement is ignored.
///
/// # Errors
/// Fails on I/O errors, malformed numbers, dangling indices, faces with
/// fewer than three vertices and coordinates that are not finite or too
/// large.
pub fn read_obj_model<R: BufRead>(reader: R) -> ObjResult<ObjModel> {
    let mut parser = ObjParser::new();
    for (index, line) in reader.lines().enumerate() {
        parser.read_line(index + 1, &line?)?;
    }
    parser.finish()
}

struct ObjParser {
    positions: Vec<Vec3d>,
    normals: Vec<Vec3d>,
    uvs: Vec<UvCoords>,
    group: String,
    material: ObjMaterial,
    faces: HashMap<String, Vec<Polygon<ObjMaterial>>>,
    libraries: Vec<String>,
    line: usize,
}

impl ObjParser {
    fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            group: DEFAULT_GROUP.to_owned(),
            material: None,
            faces: HashMap::new(),
            libraries: Vec::new(),
            line: 0,
        }
    }

    fn read_line(&mut self, line: usize, text: &str) -> ObjResult<()> {
        self.line = line;
        let data = text.split_once('#').map_or(text, |(data, _)| data);
        let mut tokens = data.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats(line, &mut tokens)?;
                self.positions.push(geometry(line, Vec3d::new(x, y, z))?);
            }
            "vn" => {
                let [x, y, z] = parse_floats(line, &mut tokens)?;
                self.normals.push(geometry(line, Vec3d::new(x, y, z))?);
            }
            "vt" => {
                let [u, v] = parse_floats(line, &mut tokens)?;
                self.uvs.push(UvCoords::new(u, v));
            }
            "f" => self.read_face(line, tokens)?,
            "o" | "g" => {
                let name = tokens
                    .next()
                    .ok_or_else(|| ObjError::parse(line, format!("`{keyword}` without a name")))?;
                self.group = name.to_owned();
            }
            "usemtl" => self.material = tokens.next().map(str::to_owned),
            "mtllib" => {
                let before = self.libraries.len();
                self.libraries.extend(tokens.map(str::to_owned));
                if self.libraries.len() == before {
                    return Err(ObjError::parse(line, "`mtllib` without a file name"));
                }
            }
            _ => debug!(line, keyword, "Ignoring unsupported OBJ statement"),
        }
        Ok(())
    }

    fn read_face<'a>(&mut self, line: usize, tokens: impl Iterator<Item = &'a str>) -> ObjResult<()> {
        let vertices = tokens
            .map(|token| self.face_vertex(line, token))
            .collect::<ObjResult<Vec<_>>>()?;
        if vertices.len() < 3 {
            return Err(ObjError::parse(
                line,
                format!("face needs at least 3 vertices, got {}", vertices.len()),
            ));
        }

        let polygon = geometry(line, Polygon::new(vertices, self.material.clone()))?;
        self.faces
            .entry_ref(self.group.as_str())
            .or_default()
            .push(polygon);
        Ok(())
    }

    fn face_vertex(&self, line: usize, token: &str) -> ObjResult<Vertex> {
        let mut parts = token.split('/');
        let position = parts.next().filter(|p| !p.is_empty());
        let uv = parts.next().filter(|p| !p.is_empty());
        let normal = parts.next().filter(|p| !p.is_empty());
        if parts.next().is_some() {
            return Err(ObjError::parse(line, format!("malformed face vertex `{token}`")));
        }

        let position = position
            .ok_or_else(|| ObjError::parse(line, format!("face vertex `{token}` has no position")))?;
        let position = *lookup(&self.positions, line, "vertex", position)?;
        let uv = match uv {
            Some(index) => *lookup(&self.uvs, line, "texture", index)?,
            None => UvCoords::ZERO,
        };
        let normal = match normal {
            Some(index) => *lookup(&self.normals, line, "normal", index)?,
            None => Vec3d::unit(Axis::Y),
        };
        Ok(Vertex::new(position, normal, uv))
    }

    fn finish(self) -> ObjResult<ObjModel> {
        let line = self.line;
        let groups = self
            .faces
            .into_iter()
            .map(|(name, polygons)| geometry(line, Group::new(name, polygons)))
            .collect::<ObjResult<Vec<_>>>()?;
        Ok(ObjModel {
            mesh: Mesh::from_groups(groups),
            material_libraries: self.libraries,
        })
    }
}

fn geometry<T>(line: usize, result: Result<T, SplitError>) -> ObjResult<T> {
    result.map_err(|source| ObjError::Geometry { line, source })
}

fn parse_floats<'a, const N: usize>(
    line: usize,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> ObjResult<[f64; N]> {
    let mut values = [0.0; N];
    for value in &mut values {
        let token = tokens
            .next()
            .ok_or_else(|| ObjError::parse(line, format!("expected {N} numbers")))?;
        *value = token
            .parse()
            .map_err(|_| ObjError::parse(line, format!("invalid number `{token}`")))?;
    }
    Ok(values)
}

/// Resolves a 1-based or negative (counted from the end) OBJ index.
fn lookup<'a, T>(items: &'a [T], line: usize, kind: &'static str, token: &str) -> ObjResult<&'a T> {
    let index: i64 = token
        .parse()
        .map_err(|_| ObjError::parse(line, format!("invalid {kind} index `{token}`")))?;
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => items.len() as i64 + i,
        _ => -1,
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or(ObjError::IndexOutOfRange { line, kind, index })
}
