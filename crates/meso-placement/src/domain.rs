//! Domain adapter: per-domain constants precomputed for placement.

use meso_gradation::uniform_unit;
use meso_types::{Aabb, DomainMesh, Point3, Tetrahedron};
use rand::RngCore;

use crate::error::{PlacementError, PlacementResult};

/// A domain mesh prepared for placement queries.
///
/// Derived once per run: the bounding box candidates are drawn from, every
/// tetrahedron materialized as vertex coordinates (containment tests run
/// without index indirection), the boundary surface point cloud used for
/// cheap near-boundary rejection, and the maximum surface edge length that
/// sizes the boundary search window.
///
/// # Example
///
/// ```
/// use meso_placement::DomainAdapter;
/// use meso_types::{DomainMesh, Point3};
///
/// let domain = DomainAdapter::new(DomainMesh::unit_cube()).unwrap();
/// assert!(domain.contains(&Point3::new(0.5, 0.5, 0.5)));
/// assert!(!domain.contains(&Point3::new(1.5, 0.5, 0.5)));
/// assert!(!domain.contains(&domain.sentinel()));
/// ```
#[derive(Debug, Clone)]
pub struct DomainAdapter {
    mesh: DomainMesh,
    aabb: Aabb,
    volume: f64,
    tetrahedra: Vec<Tetrahedron>,
    boundary_points: Vec<Point3<f64>>,
    boundary_triangles: Vec<[usize; 3]>,
    max_edge_length: f64,
    sentinel: Point3<f64>,
}

impl DomainAdapter {
    /// Prepare a domain mesh for placement.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::EmptyDomain`] when the mesh holds no
    /// tetrahedra or no surface triangles.
    pub fn new(mesh: DomainMesh) -> PlacementResult<Self> {
        if mesh.tet_count() == 0 || mesh.surface_count() == 0 {
            return Err(PlacementError::EmptyDomain);
        }

        let aabb = mesh.aabb();
        let volume = mesh.volume();
        let tetrahedra: Vec<Tetrahedron> =
            (0..mesh.tet_count()).map(|i| mesh.tetrahedron(i)).collect();

        // Unique surface vertices, re-indexed so the triangles reference the
        // compacted point cloud.
        let mut vertex_slot = vec![usize::MAX; mesh.vertex_count()];
        let mut boundary_points = Vec::new();
        let mut boundary_triangles = Vec::with_capacity(mesh.surface_count());
        for tri in &mesh.surface {
            let mapped = tri.map(|v| {
                if vertex_slot[v] == usize::MAX {
                    vertex_slot[v] = boundary_points.len();
                    boundary_points.push(mesh.vertices[v]);
                }
                vertex_slot[v]
            });
            boundary_triangles.push(mapped);
        }

        let max_edge_length = mesh
            .surface
            .iter()
            .flat_map(|tri| {
                let [a, b, c] = tri.map(|i| mesh.vertices[i]);
                [(b - a).norm(), (c - b).norm(), (a - c).norm()]
            })
            .fold(0.0_f64, f64::max);

        // Strictly outside any domain AABB, including ones spanning negative
        // coordinates.
        let offset = aabb.diagonal() + 1.0;
        let sentinel = Point3::new(
            aabb.max.x + offset,
            aabb.max.y + offset,
            aabb.max.z + offset,
        );

        Ok(Self {
            mesh,
            aabb,
            volume,
            tetrahedra,
            boundary_points,
            boundary_triangles,
            max_edge_length,
            sentinel,
        })
    }

    /// The underlying domain mesh.
    #[must_use]
    pub const fn mesh(&self) -> &DomainMesh {
        &self.mesh
    }

    /// Bounding box of the domain.
    #[must_use]
    pub const fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Total domain volume.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// The materialized tetrahedra.
    #[must_use]
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// The boundary surface point cloud (unique surface vertices).
    #[must_use]
    pub fn boundary_points(&self) -> &[Point3<f64>] {
        &self.boundary_points
    }

    /// Boundary surface triangles, indexed into
    /// [`boundary_points`](Self::boundary_points).
    #[must_use]
    pub fn boundary_triangles(&self) -> &[[usize; 3]] {
        &self.boundary_triangles
    }

    /// Maximum boundary surface edge length.
    #[inline]
    #[must_use]
    pub const fn max_edge_length(&self) -> f64 {
        self.max_edge_length
    }

    /// The sentinel position unplaced particle slots hold, guaranteed
    /// outside the domain.
    #[inline]
    #[must_use]
    pub const fn sentinel(&self) -> Point3<f64> {
        self.sentinel
    }

    /// Check whether a point lies inside the domain (in any tetrahedron).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        if !self.aabb.contains(point) {
            return false;
        }
        self.tetrahedra.iter().any(|tet| tet.contains(point))
    }

    /// Check that a sphere of radius `radius` centered at `center` keeps at
    /// least `clearance` from every boundary surface point.
    ///
    /// Only boundary points inside the local window can violate the gap; the
    /// window pads the required distance by the maximum surface edge length
    /// so every triangle with all vertices outside it is provably clear.
    #[must_use]
    pub fn clear_of_boundary(&self, center: &Point3<f64>, radius: f64, clearance: f64) -> bool {
        let required = radius + clearance;
        let window = required + self.max_edge_length;
        self.boundary_points.iter().all(|p| {
            let d = p - center;
            if d.x.abs() > window || d.y.abs() > window || d.z.abs() > window {
                return true;
            }
            d.norm() >= required
        })
    }

    /// Draw a candidate center uniformly inside the bounding box.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Point3<f64> {
        let size = self.aabb.size();
        Point3::new(
            self.aabb.min.x + uniform_unit(rng) * size.x,
            self.aabb.min.y + uniform_unit(rng) * size.y,
            self.aabb.min.z + uniform_unit(rng) * size.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cube() -> DomainAdapter {
        DomainAdapter::new(DomainMesh::unit_cube()).unwrap()
    }

    #[test]
    fn test_rejects_empty_mesh() {
        let empty = DomainMesh::new(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(
            DomainAdapter::new(empty).unwrap_err(),
            PlacementError::EmptyDomain
        );
    }

    #[test]
    fn test_cube_constants() {
        let domain = cube();
        assert_relative_eq!(domain.volume(), 1.0, epsilon = 1e-12);
        // All eight cube corners are on the surface.
        assert_eq!(domain.boundary_points().len(), 8);
        assert_eq!(domain.boundary_triangles().len(), 12);
        // Longest surface edge is a face diagonal.
        assert_relative_eq!(domain.max_edge_length(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sentinel_is_outside() {
        let domain = cube();
        let sentinel = domain.sentinel();
        assert!(!domain.aabb().contains(&sentinel));
        assert!(!domain.contains(&sentinel));
    }

    #[test]
    fn test_boundary_triangles_reference_cloud() {
        let domain = cube();
        for tri in domain.boundary_triangles() {
            for &v in tri {
                assert!(v < domain.boundary_points().len());
            }
        }
    }

    #[test]
    fn test_boundary_clearance() {
        let domain = cube();
        let center = Point3::new(0.5, 0.5, 0.5);
        // Center of the cube is sqrt(3)/2 from every corner.
        assert!(domain.clear_of_boundary(&center, 0.5, 0.3));
        assert!(!domain.clear_of_boundary(&center, 0.8, 0.1));

        let near_corner = Point3::new(0.05, 0.05, 0.05);
        assert!(!domain.clear_of_boundary(&near_corner, 0.05, 0.05));
    }

    #[test]
    fn test_sampled_points_stay_in_box() {
        let domain = cube();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..256 {
            let p = domain.sample_point(&mut rng);
            assert!(domain.aabb().contains(&p));
        }
    }
}
