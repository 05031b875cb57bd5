//! Wavefront OBJ output.

use std::io::Write;

use cell_split::Mesh;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::ObjResult;

/// Payloads that may name a material for `usemtl`.
pub trait MaterialName {
    fn material_name(&self) -> Option<&str>;
}

impl MaterialName for () {
    fn material_name(&self) -> Option<&str> {
        None
    }
}

impl MaterialName for Option<String> {
    fn material_name(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// 1-based OBJ indices of exact attribute values.
#[derive(Default)]
struct IndexTable<const N: usize> {
    indices: HashMap<[u64; N], usize>,
}

impl<const N: usize> IndexTable<N> {
    /// Returns the index of `values` and whether it was just assigned.
    fn index(&mut self, values: [f64; N]) -> (usize, bool) {
        let next = self.indices.len() + 1;
        match self.indices.entry(values.map(f64::to_bits)) {
            Entry::Occupied(entry) => (*entry.get(), false),
            Entry::Vacant(entry) => (*entry.insert(next), true),
        }
    }
}

/// Writes `mesh` as OBJ text.
///
/// Each group becomes an `o` object. Positions, UVs and normals are shared
/// between faces and written just before the first face using them. Faces
/// are written as `f v/vt/vn`, preceded by `usemtl` whenever the material
/// changes. A change back to no material is written as a bare `usemtl`,
/// which [`read_obj`](crate::read_obj) reads as `None`.
pub fn write_obj<P: MaterialName, W: Write>(mesh: &Mesh<P>, writer: W) -> ObjResult<()> {
    write_obj_with_libraries(mesh, &[], writer)
}

/// Like [`write_obj`], starting with one `mtllib` statement per entry of
/// `libraries`.
pub fn write_obj_with_libraries<P: MaterialName, W: Write>(
    mesh: &Mesh<P>,
    libraries: &[String],
    mut writer: W,
) -> ObjResult<()> {
    let mut positions = IndexTable::<3>::default();
    let mut uvs = IndexTable::<2>::default();
    let mut normals = IndexTable::<3>::default();
    let mut material: Option<&str> = None;

    for library in libraries {
        writeln!(writer, "mtllib {library}")?;
    }
    for group in mesh.groups() {
        writeln!(writer, "o {}", group.name())?;
        for polygon in group.polygons() {
            let name = polygon.payload().material_name();
            if name != material {
                match name {
                    Some(name) => writeln!(writer, "usemtl {name}")?,
                    None => writeln!(writer, "usemtl")?,
                }
                material = name;
            }

            let mut face = String::from("f");
            for vertex in polygon.vertices() {
                let p = vertex.position;
                let (v, new) = positions.index([p.x(), p.y(), p.z()]);
                if new {
                    writeln!(writer, "v {:.4} {:.4} {:.4}", p.x(), p.y(), p.z())?;
                }

                let uv = vertex.uv;
                let (vt, new) = uvs.index([uv.u, uv.v]);
                if new {
                    writeln!(writer, "vt {:.6} {:.6}", uv.u, uv.v)?;
                }

                let n = vertex.normal;
                let (vn, new) = normals.index([n.x(), n.y(), n.z()]);
                if new {
                    writeln!(writer, "vn {:.4} {:.4} {:.4}", n.x(), n.y(), n.z())?;
                }

                face.push_str(&format!(" {v}/{vt}/{vn}"));
            }
            writeln!(writer, "{face}")?;
        }
    }
    writer.flush()?;
    Ok(())
}
