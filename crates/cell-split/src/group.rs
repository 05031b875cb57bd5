//! Named polygon groups.

use crate::{Axis, Cuttable, EpsilonMath, Plane, Polygon, Sided, SplitError, SplitResult, Vec3d};

/// A named, non-empty list of polygons.
///
/// The name records where the polygons came from (an OBJ object, a model
/// part …); it has no geometric meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<P = ()> {
    name: String,
    polygons: Vec<Polygon<P>>,
}

impl<P> Group<P> {
    /// Creates a group.
    ///
    /// Fails with [`SplitError::EmptyGroup`] if `polygons` is empty.
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon<P>>) -> SplitResult<Self> {
        let name = name.into();
        if polygons.is_empty() {
            return Err(SplitError::EmptyGroup(name));
        }
        Ok(Self { name, polygons })
    }

    /// Builds a group from polygons already known to be non-empty.
    fn from_nonempty(name: String, polygons: Vec<Polygon<P>>) -> Self {
        debug_assert!(!polygons.is_empty(), "group `{name}` built without polygons");
        Self { name, polygons }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon<P>] {
        &self.polygons
    }

    /// Returns the number of polygons (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Always false for a constructed group.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn into_polygons(self) -> Vec<Polygon<P>> {
        self.polygons
    }

    /// Appends the polygons of `other`. The result keeps this group's name.
    pub fn merge(mut self, other: Group<P>) -> Self {
        self.polygons.extend(other.polygons);
        self
    }
}

impl<P: Clone> Group<P> {
    fn map_polygons(&self, f: impl Fn(&Polygon<P>) -> Polygon<P>) -> Self {
        Self::from_nonempty(self.name.clone(), self.polygons.iter().map(f).collect())
    }

    pub fn translate(&self, offset: Vec3d) -> Self {
        self.map_polygons(|p| p.translate(offset))
    }

    pub fn translate_along(&self, axis: Axis, amount: i32) -> Self {
        self.translate(Vec3d::along(axis, amount))
    }

    /// Replaces every polygon by its quads.
    pub fn quadify(&self) -> Self {
        Self::from_nonempty(
            self.name.clone(),
            self.polygons.iter().flat_map(Polygon::quadify).collect(),
        )
    }

    pub fn recompute_zero_normals(&self, eps: &EpsilonMath) -> Self {
        self.map_polygons(|p| p.recompute_zero_normals(eps))
    }
}

impl<P: Clone> Cuttable for Group<P> {
    /// Splits every polygon and regroups the fragments by side. Each
    /// resulting group keeps this group's name.
    fn split(&self, plane: &Plane, eps: &EpsilonMath) -> Sided<Self> {
        let mut sides: Sided<Vec<Polygon<P>>> = Sided::empty();
        for polygon in &self.polygons {
            for (sign, fragment) in polygon.split_along(plane, eps) {
                sides.slot_mut(sign).get_or_insert_with(Vec::new).push(fragment);
            }
        }
        sides.map(|polygons| Self::from_nonempty(self.name.clone(), polygons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sign, UvCoords, Vertex};

    fn make_square(x: f64, size: f64) -> Polygon {
        let corners = [[x, 0.0], [x + size, 0.0], [x + size, size], [x, size]];
        let vertices = corners
            .iter()
            .map(|[px, py]| {
                Vertex::new(
                    Vec3d::new(*px, *py, 0.0).unwrap(),
                    Vec3d::unit(Axis::Z),
                    UvCoords::ZERO,
                )
            })
            .collect();
        Polygon::new(vertices, ()).unwrap()
    }

    #[test]
    fn empty_group_rejected() {
        let err = Group::<()>::new("hull", Vec::new());
        assert_eq!(err, Err(SplitError::EmptyGroup("hull".to_string())));
    }

    #[test]
    fn merge_concatenates() {
        let a = Group::new("a", vec![make_square(0.0, 1.0)]).unwrap();
        let b = Group::new("b", vec![make_square(2.0, 1.0), make_square(4.0, 1.0)]).unwrap();

        let merged = a.merge(b);
        assert_eq!(merged.name(), "a");
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn split_regroups_by_side() {
        let eps = EpsilonMath::default();
        let group = Group::new(
            "parts",
            vec![make_square(0.0, 1.0), make_square(0.5, 1.0), make_square(3.0, 1.0)],
        )
        .unwrap();

        let sides = group.split(&Plane::grid_boundary(Axis::X, 1), &eps);
        let negative = sides.get(Sign::Negative).unwrap();
        let positive = sides.get(Sign::Positive).unwrap();

        // first square touches x = 1 from below, second spans it, third is above
        assert_eq!(negative.len(), 2);
        assert_eq!(positive.len(), 2);
        assert_eq!(negative.name(), "parts");
        assert_eq!(positive.name(), "parts");
        assert!(sides.zero.is_none());
    }

    #[test]
    fn quadify_flattens() {
        let triangle = Polygon::new(make_square(0.0, 1.0).into_parts().0[..3].to_vec(), ()).unwrap();
        let group = Group::new("g", vec![triangle, make_square(0.0, 1.0)]).unwrap();
        let quads = group.quadify();
        assert_eq!(quads.len(), 2);
        assert!(quads.polygons().iter().all(Polygon::is_quad));
    }

    #[test]
    fn translate_along_axis() {
        let group = Group::new("g", vec![make_square(0.0, 1.0)]).unwrap();
        let moved = group.translate_along(Axis::X, -2);
        assert_eq!(moved.polygons()[0].vertices()[0].position.x(), -2.0);
        assert_eq!(moved.name(), "g");
    }
}
