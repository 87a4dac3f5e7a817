//! Tetrahedron primitive with volume and containment queries.

use nalgebra::Point3;

/// A tetrahedron given by its four vertex positions.
///
/// This is a value type materialized from an indexed mesh; placement keeps
/// one per domain cell so containment tests run without index indirection.
///
/// # Example
///
/// ```
/// use meso_types::{Point3, Tetrahedron};
///
/// let tet = Tetrahedron::new([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ]);
///
/// assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-12);
/// assert!(tet.contains(&Point3::new(0.1, 0.1, 0.1)));
/// assert!(!tet.contains(&Point3::new(1.0, 1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    /// The four vertices.
    pub vertices: [Point3<f64>; 4],
}

impl Tetrahedron {
    /// Create a tetrahedron from its four vertices.
    #[inline]
    #[must_use]
    pub const fn new(vertices: [Point3<f64>; 4]) -> Self {
        Self { vertices }
    }

    /// Signed volume: one sixth of the scalar triple product of the edge
    /// vectors from the first vertex.
    ///
    /// Positive when the vertices are ordered right-handed.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c, d] = self.vertices;
        let ab = b - a;
        let ac = c - a;
        let ad = d - a;
        ab.cross(&ac).dot(&ad) / 6.0
    }

    /// Absolute volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Centroid (mean of the four vertices).
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c, d] = self.vertices;
        Point3::new(
            (a.x + b.x + c.x + d.x) * 0.25,
            (a.y + b.y + c.y + d.y) * 0.25,
            (a.z + b.z + c.z + d.z) * 0.25,
        )
    }

    /// Check whether a point lies inside the tetrahedron.
    ///
    /// Uses the barycentric sign test: the point is inside when replacing
    /// each vertex in turn with the point preserves the sign of the signed
    /// volume. Points on a face are considered inside. Degenerate
    /// tetrahedra (zero volume) contain nothing.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let [a, b, c, d] = self.vertices;
        let reference = self.signed_volume();
        if reference == 0.0 {
            return false;
        }

        let replaced = [
            Self::new([*point, b, c, d]),
            Self::new([a, *point, c, d]),
            Self::new([a, b, *point, d]),
            Self::new([a, b, c, *point]),
        ];
        replaced
            .iter()
            .all(|tet| tet.signed_volume() * reference >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_tet() -> Tetrahedron {
        Tetrahedron::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ])
    }

    #[test]
    fn signed_volume_flips_with_orientation() {
        let tet = reference_tet();
        let flipped = Tetrahedron::new([
            tet.vertices[1],
            tet.vertices[0],
            tet.vertices[2],
            tet.vertices[3],
        ]);
        assert_relative_eq!(
            tet.signed_volume(),
            -flipped.signed_volume(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn centroid_is_mean_of_vertices() {
        let centroid = reference_tet().centroid();
        assert_relative_eq!(centroid.x, 0.25, epsilon = 1e-15);
        assert_relative_eq!(centroid.y, 0.25, epsilon = 1e-15);
        assert_relative_eq!(centroid.z, 0.25, epsilon = 1e-15);
    }

    #[test]
    fn contains_centroid_and_vertices() {
        let tet = reference_tet();
        assert!(tet.contains(&tet.centroid()));
        for v in &tet.vertices {
            assert!(tet.contains(v));
        }
    }

    #[test]
    fn contains_rejects_outside_points() {
        let tet = reference_tet();
        assert!(!tet.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!tet.contains(&Point3::new(-0.1, 0.1, 0.1)));
    }

    #[test]
    fn contains_works_for_negative_orientation() {
        let tet = reference_tet();
        let flipped = Tetrahedron::new([
            tet.vertices[1],
            tet.vertices[0],
            tet.vertices[2],
            tet.vertices[3],
        ]);
        assert!(flipped.contains(&Point3::new(0.1, 0.1, 0.1)));
        assert!(!flipped.contains(&Point3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn degenerate_contains_nothing() {
        let flat = Tetrahedron::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        assert!(!flat.contains(&Point3::new(0.5, 0.5, 0.0)));
    }
}
