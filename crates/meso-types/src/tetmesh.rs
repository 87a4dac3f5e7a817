//! Node/tetrahedron arrays produced by the tetrahedralization engine.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tetrahedron::Tetrahedron;

/// The tetrahedralization of particle centers and boundary points.
///
/// Nodes keep the order they were handed to the engine: particle centers
/// first (index-aligned with the diameter list), then boundary points.
/// Indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetMesh {
    /// Node positions.
    pub nodes: Vec<Point3<f64>>,
    /// Tetrahedra as four node indices each.
    pub tets: Vec<[usize; 4]>,
}

impl TetMesh {
    /// Create a tetrahedral mesh from 0-based connectivity.
    #[must_use]
    pub const fn new(nodes: Vec<Point3<f64>>, tets: Vec<[usize; 4]>) -> Self {
        Self { nodes, tets }
    }

    /// Number of nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of tetrahedra.
    #[inline]
    #[must_use]
    pub fn tet_count(&self) -> usize {
        self.tets.len()
    }

    /// Materialize the `index`-th tetrahedron.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the tetrahedron references a
    /// missing node.
    #[must_use]
    pub fn tetrahedron(&self, index: usize) -> Tetrahedron {
        Tetrahedron::new(self.tets[index].map(|i| self.nodes[i]))
    }

    /// Total volume: sum of absolute tetrahedron volumes.
    #[must_use]
    pub fn volume(&self) -> f64 {
        (0..self.tet_count())
            .map(|i| self.tetrahedron(i).volume())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn volume_sums_over_tets() {
        // Two tetrahedra sharing the face (0, 1, 2).
        let mesh = TetMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, -1.0),
            ],
            vec![[0, 1, 2, 3], [0, 1, 2, 4]],
        );
        assert_eq!(mesh.tet_count(), 2);
        assert_relative_eq!(mesh.volume(), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_preserves_the_mesh() {
        let mesh = TetMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2, 3]],
        );

        let json = serde_json::to_string(&mesh).unwrap();
        let back: TetMesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
