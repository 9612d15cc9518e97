use crate::coords::Vec3;

/// Planar convex polygon, vertices in counter-clockwise order seen from
/// outside the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgPolygon {
    pub vertices: Vec<Vec3>,
    /// Outward plane normal. Derived from the vertex winding when absent.
    pub normal: Option<Vec3>,
}

impl CsgPolygon {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self { vertices, normal: None }
    }

    pub fn with_normal(vertices: Vec<Vec3>, normal: Vec3) -> Self {
        Self {
            vertices,
            normal: Some(normal),
        }
    }

    /// Fan triangulation around the first vertex.
    ///
    /// Empty for polygons with fewer than three vertices.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let n = self.vertices.len();
        (1..n.saturating_sub(1)).map(move |i| {
            [self.vertices[0], self.vertices[i], self.vertices[i + 1]]
        })
    }

    /// Unit normal of the polygon plane.
    pub fn plane_normal(&self) -> Vec3 {
        if let Some(n) = self.normal {
            return n.normalize_or_zero();
        }
        // Newell's method.
        let mut acc = Vec3::zero();
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            acc = acc
                + Vec3::new(
                    (a.y - b.y) * (a.z + b.z),
                    (a.z - b.z) * (a.x + b.x),
                    (a.x - b.x) * (a.y + b.y),
                );
        }
        acc.normalize_or_zero()
    }
}

/// Boundary representation produced by a variant's CSG mesh builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsgMesh {
    pub polygons: Vec<CsgPolygon>,
}

impl CsgMesh {
    pub fn new(polygons: Vec<CsgPolygon>) -> Self {
        Self { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Triangles the mesh will occupy in an STL file.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::unit_cube;

    #[test]
    fn quad_fans_into_two_triangles() {
        let cube = unit_cube();
        assert_eq!(cube.polygons[0].triangles().count(), 2);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn degenerate_polygons_produce_no_triangles() {
        let line = CsgPolygon::new(vec![Vec3::zero(), Vec3::new(1.0, 0.0, 0.0)]);
        assert_eq!(line.triangles().count(), 0);
        assert_eq!(CsgPolygon::new(vec![]).triangles().count(), 0);
    }

    #[test]
    fn newell_normal_points_outward() {
        let cube = unit_cube();
        assert_eq!(cube.polygons[0].plane_normal(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cube.polygons[1].plane_normal(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn explicit_normal_wins() {
        let tri = CsgPolygon::with_normal(
            vec![Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            Vec3::new(0.0, 0.0, -2.0),
        );
        assert_eq!(tri.plane_normal(), Vec3::new(0.0, 0.0, -1.0));
    }
}
