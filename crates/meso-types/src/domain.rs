//! Tetrahedral domain mesh with a triangulated boundary surface.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::tetrahedron::Tetrahedron;

/// An immutable tetrahedral domain: vertices, tetrahedron connectivity, and
/// the triangulated boundary surface.
///
/// The domain is produced by an external surface mesher and consumed
/// read-only by the whole generation run. Indices are 0-based; sources that
/// number vertices from 1 go through [`DomainMesh::from_one_based`].
///
/// # Example
///
/// ```
/// use meso_types::DomainMesh;
///
/// let cube = DomainMesh::unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.tet_count(), 6);
/// assert_eq!(cube.surface_count(), 12);
/// assert!((cube.volume() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Tetrahedra as four vertex indices each.
    pub tetrahedra: Vec<[usize; 4]>,
    /// Boundary surface triangles as three vertex indices each.
    pub surface: Vec<[usize; 3]>,
}

impl DomainMesh {
    /// Create a domain mesh from 0-based connectivity.
    #[must_use]
    pub const fn new(
        vertices: Vec<Point3<f64>>,
        tetrahedra: Vec<[usize; 4]>,
        surface: Vec<[usize; 3]>,
    ) -> Self {
        Self {
            vertices,
            tetrahedra,
            surface,
        }
    }

    /// Create a domain mesh from 1-based connectivity, normalizing all
    /// indices to 0-based.
    ///
    /// Mesh exchange formats commonly number vertices from 1. All indices
    /// must be at least 1.
    #[must_use]
    pub fn from_one_based(
        vertices: Vec<Point3<f64>>,
        tetrahedra: Vec<[usize; 4]>,
        surface: Vec<[usize; 3]>,
    ) -> Self {
        let tetrahedra = tetrahedra
            .into_iter()
            .map(|t| t.map(|i| i.saturating_sub(1)))
            .collect();
        let surface = surface
            .into_iter()
            .map(|t| t.map(|i| i.saturating_sub(1)))
            .collect();
        Self {
            vertices,
            tetrahedra,
            surface,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of tetrahedra.
    #[inline]
    #[must_use]
    pub fn tet_count(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Number of boundary surface triangles.
    #[inline]
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surface.len()
    }

    /// Materialize the `index`-th tetrahedron.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the tetrahedron references a
    /// missing vertex.
    #[must_use]
    pub fn tetrahedron(&self, index: usize) -> Tetrahedron {
        Tetrahedron::new(self.tetrahedra[index].map(|i| self.vertices[i]))
    }

    /// Total domain volume: sum of absolute tetrahedron volumes.
    #[must_use]
    pub fn volume(&self) -> f64 {
        (0..self.tet_count())
            .map(|i| self.tetrahedron(i).volume())
            .sum()
    }

    /// Axis-aligned bounding box of all vertices.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// A unit cube spanning `[0, 1]` on each axis, decomposed into six
    /// tetrahedra around the main diagonal, with an outward-oriented
    /// 12-triangle surface.
    ///
    /// Useful for tests and examples.
    #[must_use]
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];

        // One tetrahedron per monotone path from vertex 0 to vertex 7.
        let tetrahedra = vec![
            [0, 1, 3, 7],
            [0, 1, 5, 7],
            [0, 2, 3, 7],
            [0, 2, 6, 7],
            [0, 4, 5, 7],
            [0, 4, 6, 7],
        ];

        let surface = vec![
            // Bottom (-Z)
            [0, 2, 3],
            [0, 3, 1],
            // Top (+Z)
            [4, 5, 7],
            [4, 7, 6],
            // Front (-Y)
            [0, 1, 5],
            [0, 5, 4],
            // Back (+Y)
            [2, 7, 3],
            [2, 6, 7],
            // Left (-X)
            [0, 4, 6],
            [0, 6, 2],
            // Right (+X)
            [1, 7, 5],
            [1, 3, 7],
        ];

        Self::new(vertices, tetrahedra, surface)
    }
}
