//! Summary statistics for an extracted lattice.

use meso_types::{LatticeFacet, TetMesh};

/// Aggregate figures from one lattice extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeStats {
    /// Number of tetrahedra in the source mesh.
    pub tet_count: usize,
    /// Number of nodes in the source mesh.
    pub node_count: usize,
    /// Facets shared by two tetrahedra.
    pub interior_facets: usize,
    /// Facets on the domain boundary.
    pub boundary_facets: usize,
    /// Summed area of all facets.
    pub total_facet_area: f64,
    /// Summed tetrahedron volume.
    pub mesh_volume: f64,
}

impl LatticeStats {
    pub(crate) fn summarize(mesh: &TetMesh, facets: &[LatticeFacet], mesh_volume: f64) -> Self {
        let interior_facets = facets.iter().filter(|f| f.is_interior()).count();
        Self {
            tet_count: mesh.tet_count(),
            node_count: mesh.node_count(),
            interior_facets,
            boundary_facets: facets.len() - interior_facets,
            total_facet_area: facets.iter().map(|f| f.area).sum(),
            mesh_volume,
        }
    }

    /// Total number of facets.
    #[inline]
    #[must_use]
    pub const fn facet_count(&self) -> usize {
        self.interior_facets + self.boundary_facets
    }
}

impl std::fmt::Display for LatticeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lattice: {} facets ({} interior, {} boundary) from {} tets, \
             volume {:.6}, facet area {:.6}",
            self.facet_count(),
            self.interior_facets,
            self.boundary_facets,
            self.tet_count,
            self.mesh_volume,
            self.total_facet_area
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_reports_counts() {
        let stats = LatticeStats {
            tet_count: 2,
            node_count: 5,
            interior_facets: 1,
            boundary_facets: 6,
            total_facet_area: 4.5,
            mesh_volume: 1.0 / 3.0,
        };
        assert_eq!(stats.facet_count(), 7);

        let text = stats.to_string();
        assert!(text.contains("7 facets"));
        assert!(text.contains("1 interior"));
        assert!(text.contains("6 boundary"));
    }
}
