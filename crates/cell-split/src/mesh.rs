//! Meshes: polygon groups keyed by name.

use std::collections::BTreeMap;

use crate::{Axis, Cuttable, EpsilonMath, Group, Plane, Polygon, Sided, SplitResult, Vec3d};

/// Group name used when polygons are supplied without one.
pub const DEFAULT_GROUP: &str = "default";

/// A collection of named polygon groups.
///
/// Every group holds at least one polygon, so a mesh is empty exactly when
/// it has no groups. Groups are kept ordered by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<P = ()> {
    groups: BTreeMap<String, Group<P>>,
}

impl<P> Mesh<P> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Builds a mesh from groups. Groups sharing a name are merged.
    pub fn from_groups(groups: impl IntoIterator<Item = Group<P>>) -> Self {
        let mut mesh = Self::new();
        for group in groups {
            mesh.insert_group(group);
        }
        mesh
    }

    /// Builds a mesh with all polygons in [`DEFAULT_GROUP`].
    ///
    /// An empty polygon list gives an empty mesh.
    pub fn from_polygons(polygons: Vec<Polygon<P>>) -> SplitResult<Self> {
        if polygons.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self::from_groups([Group::new(DEFAULT_GROUP, polygons)?]))
    }

    fn insert_group(&mut self, group: Group<P>) {
        let merged = match self.groups.remove(group.name()) {
            Some(existing) => existing.merge(group),
            None => group,
        };
        self.groups.insert(merged.name().to_owned(), merged);
    }

    /// Returns `true` if the mesh has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &Group<P>> {
        self.groups.values()
    }

    pub fn group(&self, name: &str) -> Option<&Group<P>> {
        self.groups.get(name)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterates over the polygons of all groups, group by group.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<P>> {
        self.groups.values().flat_map(|g| g.polygons())
    }

    /// Returns the total number of polygons.
    pub fn polygon_count(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }

    /// Smallest and largest vertex coordinate along `axis`, or `None` for
    /// the empty mesh.
    pub fn extent(&self, axis: Axis) -> Option<(f64, f64)> {
        self.polygons()
            .flat_map(|p| p.vertices())
            .map(|v| v.position.get(axis))
            .fold(None, |acc, c| match acc {
                None => Some((c, c)),
                Some((min, max)) => Some((f64::min(min, c), f64::max(max, c))),
            })
    }

    /// Merges two meshes group by group; same-named groups are concatenated.
    pub fn union(mut self, other: Mesh<P>) -> Self {
        for group in other.groups.into_values() {
            self.insert_group(group);
        }
        self
    }

    pub fn into_groups(self) -> impl Iterator<Item = Group<P>> {
        self.groups.into_values()
    }
}

impl<P: Clone> Mesh<P> {
    fn map_groups(&self, f: impl Fn(&Group<P>) -> Group<P>) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .map(|(name, group)| (name.clone(), f(group)))
                .collect(),
        }
    }

    /// Moves every vertex position by `offset`.
    pub fn translate(&self, offset: Vec3d) -> Self {
        self.map_groups(|g| g.translate(offset))
    }

    /// Moves every vertex position by `amount` along `axis`.
    pub fn translate_along(&self, axis: Axis, amount: i32) -> Self {
        self.translate(Vec3d::along(axis, amount))
    }

    /// Replaces every polygon with quads.
    pub fn quadify(&self) -> Self {
        self.map_groups(Group::quadify)
    }

    pub fn recompute_zero_normals(&self, eps: &EpsilonMath) -> Self {
        self.map_groups(|g| g.recompute_zero_normals(eps))
    }
}

impl<P> Default for Mesh<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FromIterator<Group<P>> for Mesh<P> {
    fn from_iter<I: IntoIterator<Item = Group<P>>>(iter: I) -> Self {
        Self::from_groups(iter)
    }
}

impl<P: Clone> Cuttable for Mesh<P> {
    /// Splits each group and reassembles one mesh per side.
    fn split(&self, plane: &Plane, eps: &EpsilonMath) -> Sided<Self> {
        let mut sides: Sided<Mesh<P>> = Sided::empty();
        for group in self.groups.values() {
            for (sign, part) in group.split(plane, eps) {
                sides
                    .slot_mut(sign)
                    .get_or_insert_with(Mesh::new)
                    .insert_group(part);
            }
        }
        sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sign, UvCoords, Vertex};
    use approx::assert_relative_eq;

    fn make_quad(origin: [f64; 3], size: f64) -> Polygon<u32> {
        let [x, y, z] = origin;
        let corners = [[x, y], [x + size, y], [x + size, y + size], [x, y + size]];
        let vertices = corners
            .iter()
            .map(|[px, py]| {
                Vertex::new(
                    Vec3d::new(*px, *py, z).unwrap(),
                    Vec3d::unit(Axis::Z),
                    UvCoords::ZERO,
                )
            })
            .collect();
        Polygon::new(vertices, 7).unwrap()
    }

    fn group(name: &str, polygons: Vec<Polygon<u32>>) -> Group<u32> {
        Group::new(name, polygons).unwrap()
    }

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::<()>::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.polygon_count(), 0);
        assert_eq!(mesh.extent(Axis::X), None);
        assert!(Mesh::<()>::from_polygons(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn from_polygons_uses_default_group() {
        let mesh = Mesh::from_polygons(vec![make_quad([0.0; 3], 1.0)]).unwrap();
        assert_eq!(mesh.group_count(), 1);
        assert_eq!(mesh.group(DEFAULT_GROUP).unwrap().len(), 1);
    }

    #[test]
    fn union_merges_same_named_groups() {
        let a = Mesh::from_groups([
            group("hull", vec![make_quad([0.0; 3], 1.0)]),
            group("mast", vec![make_quad([0.0, 0.0, 1.0], 1.0)]),
        ]);
        let b = Mesh::from_groups([group("hull", vec![make_quad([2.0, 0.0, 0.0], 1.0)])]);

        let union = a.union(b);
        assert_eq!(union.group_count(), 2);
        assert_eq!(union.group("hull").unwrap().len(), 2);
        assert_eq!(union.polygon_count(), 3);

        let with_empty = union.clone().union(Mesh::new());
        assert_eq!(with_empty, union);
    }

    #[test]
    fn extent_along_axis() {
        let mesh = Mesh::from_polygons(vec![
            make_quad([-1.5, 0.0, 0.0], 1.0),
            make_quad([2.0, 3.0, 0.25], 0.5),
        ])
        .unwrap();
        assert_eq!(mesh.extent(Axis::X), Some((-1.5, 2.5)));
        assert_eq!(mesh.extent(Axis::Y), Some((0.0, 3.5)));
        assert_eq!(mesh.extent(Axis::Z), Some((0.0, 0.25)));
    }

    #[test]
    fn split_keeps_group_names_per_side() {
        let eps = EpsilonMath::default();
        let mesh = Mesh::from_groups([
            group("left", vec![make_quad([0.0; 3], 1.0)]),
            group("both", vec![make_quad([0.5, 0.0, 0.0], 1.0)]),
            group("right", vec![make_quad([3.0, 0.0, 0.0], 1.0)]),
        ]);

        let sides = mesh.split(&Plane::grid_boundary(Axis::X, 1), &eps);
        let negative = sides.get(Sign::Negative).unwrap();
        let positive = sides.get(Sign::Positive).unwrap();

        assert_eq!(
            negative.groups().map(Group::name).collect::<Vec<_>>(),
            vec!["both", "left"]
        );
        assert_eq!(
            positive.groups().map(Group::name).collect::<Vec<_>>(),
            vec!["both", "right"]
        );
        assert!(sides.zero.is_none());
        assert!(negative.polygons().all(|p| *p.payload() == 7));
    }

    #[test]
    fn split_on_plane_goes_to_zero() {
        let eps = EpsilonMath::default();
        let mesh = Mesh::from_polygons(vec![make_quad([0.0, 0.0, 2.0], 1.0)]).unwrap();
        let sides = mesh.split(&Plane::grid_boundary(Axis::Z, 2), &eps);
        assert_eq!(sides.zero.as_ref(), Some(&mesh));
        assert_eq!(sides.count(), 1);
    }

    #[test]
    fn translate_and_quadify_keep_groups() {
        let mesh = Mesh::from_groups([group("a", vec![make_quad([0.0; 3], 1.0)])]);
        let moved = mesh.translate(Vec3d::new(0.5, -1.0, 2.0).unwrap());
        let (min, max) = moved.extent(Axis::Y).unwrap();
        assert_relative_eq!(min, -1.0);
        assert_relative_eq!(max, 0.0);
        assert_eq!(moved.quadify().group_count(), 1);
        assert_eq!(mesh.translate_along(Axis::Z, 3).extent(Axis::Z), Some((3.0, 3.0)));
    }
}
