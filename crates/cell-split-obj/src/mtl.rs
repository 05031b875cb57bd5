//! Wavefront MTL material libraries.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use cell_split::Mesh;
use tracing::debug;

use crate::{MaterialName, ObjError, ObjResult};

/// A named material and the texture it maps onto diffuse color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtlMaterial {
    pub name: String,
    /// Path from the `map_Kd` statement, as written in the library.
    pub diffuse_map: String,
}

/// Materials by name, as read from one or more MTL files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialLibrary {
    materials: BTreeMap<String, MtlMaterial>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MtlMaterial> {
        self.materials.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MtlMaterial> {
        self.materials.values()
    }

    /// Adds a material, replacing any earlier one of the same name.
    pub fn insert(&mut self, material: MtlMaterial) {
        if let Some(old) = self.materials.insert(material.name.clone(), material) {
            debug!(name = %old.name, "Replacing material definition");
        }
    }

    /// Adds every material of `other`; its definitions win on name clashes.
    pub fn merge(&mut self, other: MaterialLibrary) {
        for material in other.materials.into_values() {
            self.insert(material);
        }
    }

    /// Material names used by `mesh` that this library does not define.
    pub fn missing_from<'a, P: MaterialName>(&self, mesh: &'a Mesh<P>) -> BTreeSet<&'a str> {
        mesh.polygons()
            .filter_map(|polygon| polygon.payload().material_name())
            .filter(|name| !self.contains(name))
            .collect()
    }
}

/// Reads a material library from MTL text.
///
/// Each `newmtl <name>` starts a material, which must be given a diffuse
/// texture with `map_Kd` before the next `newmtl` or the end of input.
/// Options in front of the `map_Kd` path are skipped. Comments, blank lines
/// and all other statements are ignored.
///
/// # Errors
/// Fails on I/O errors, `newmtl` or `map_Kd` without an argument, `map_Kd`
/// outside a material and materials without `map_Kd`.
pub fn read_mtl<R: BufRead>(reader: R) -> ObjResult<MaterialLibrary> {
    let mut library = MaterialLibrary::new();
    // (line, name, diffuse map) of the material being read
    let mut current: Option<(usize, String, Option<String>)> = None;

    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text?;
        let data = text.split_once('#').map_or(text.as_str(), |(data, _)| data);
        let mut tokens = data.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "newmtl" => {
                let name = tokens
                    .next()
                    .ok_or_else(|| ObjError::parse(line, "`newmtl` without a name"))?;
                if let Some(finished) = current.take() {
                    library.insert(complete(finished)?);
                }
                current = Some((line, name.to_owned(), None));
            }
            "map_Kd" => {
                let path = tokens
                    .last()
                    .ok_or_else(|| ObjError::parse(line, "`map_Kd` without a path"))?;
                let (_, _, diffuse_map) = current
                    .as_mut()
                    .ok_or_else(|| ObjError::parse(line, "`map_Kd` before any `newmtl`"))?;
                *diffuse_map = Some(path.to_owned());
            }
            _ => debug!(line, keyword, "Ignoring unsupported MTL statement"),
        }
    }

    if let Some(finished) = current {
        library.insert(complete(finished)?);
    }
    Ok(library)
}

fn complete((line, name, diffuse_map): (usize, String, Option<String>)) -> ObjResult<MtlMaterial> {
    match diffuse_map {
        Some(diffuse_map) => Ok(MtlMaterial { name, diffuse_map }),
        None => Err(ObjError::parse(line, format!("material `{name}` has no `map_Kd`"))),
    }
}

#[cfg(test)]
mod tests {
    use cell_split::{Axis, Group, Polygon, UvCoords, Vec3d, Vertex};

    use super::*;

    fn read(text: &str) -> ObjResult<MaterialLibrary> {
        read_mtl(text.as_bytes())
    }

    #[test]
    fn reads_materials_with_diffuse_maps() {
        let library = read(
            "\
# exported
newmtl steel
Kd 0.8 0.8 0.8
map_Kd textures/steel.png

newmtl wood
illum 2
map_Kd -s 2 2 1 wood.png # tiled
",
        )
        .unwrap();

        assert_eq!(library.len(), 2);
        assert_eq!(library.get("steel").unwrap().diffuse_map, "textures/steel.png");
        assert_eq!(library.get("wood").unwrap().diffuse_map, "wood.png");
        let names: Vec<_> = library.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["steel", "wood"]);
    }

    #[test]
    fn empty_input_gives_empty_library() {
        assert!(read("").unwrap().is_empty());
        assert!(read("# only a comment\nKd 1 1 1\n").unwrap().is_empty());
    }

    #[test]
    fn material_without_map_rejected() {
        let err = read("newmtl steel\nmap_Kd steel.png\nnewmtl bare\nKd 1 0 0\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 3, .. }));
        assert!(err.to_string().contains("`bare`"));

        assert!(matches!(read("newmtl\n"), Err(ObjError::Parse { line: 1, .. })));
        assert!(matches!(read("newmtl a\nmap_Kd\n"), Err(ObjError::Parse { line: 2, .. })));
        assert!(matches!(read("map_Kd a.png\n"), Err(ObjError::Parse { line: 1, .. })));
    }

    #[test]
    fn later_definitions_win() {
        let mut library = read("newmtl steel\nmap_Kd old.png\nnewmtl steel\nmap_Kd new.png\n").unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("steel").unwrap().diffuse_map, "new.png");

        library.merge(read("newmtl steel\nmap_Kd other.png\nnewmtl wood\nmap_Kd wood.png\n").unwrap());
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("steel").unwrap().diffuse_map, "other.png");
    }

    #[test]
    fn reports_materials_missing_from_library() {
        let library = read("newmtl steel\nmap_Kd steel.png\n").unwrap();
        let triangle = |material: Option<&str>| {
            let vertices = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
                .iter()
                .map(|[x, y]| {
                    Vertex::new(Vec3d::new(*x, *y, 0.0).unwrap(), Vec3d::unit(Axis::Z), UvCoords::ZERO)
                })
                .collect();
            Polygon::new(vertices, material.map(str::to_owned)).unwrap()
        };
        let mesh = Mesh::from_groups([Group::new(
            "hull",
            vec![
                triangle(Some("steel")),
                triangle(Some("wood")),
                triangle(None),
                triangle(Some("wood")),
                triangle(Some("glass")),
            ],
        )
        .unwrap()]);

        let missing: Vec<_> = library.missing_from(&mesh).into_iter().collect();
        assert_eq!(missing, vec!["glass", "wood"]);
    }
}
