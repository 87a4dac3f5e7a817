//! Tetrahedron-to-particle association.

use meso_types::TetMesh;

/// For each tetrahedron, which of its four vertices are particle centers.
///
/// The tessellation point set is particle centers first, boundary points
/// after, so a node index below `particle_count` *is* the particle index.
/// Slot `k` of an entry holds `Some(particle)` when vertex `k` of the
/// tetrahedron is that particle's center, `None` when it is a boundary
/// point.
#[must_use]
pub fn associate_particles(mesh: &TetMesh, particle_count: usize) -> Vec<[Option<usize>; 4]> {
    mesh.tets
        .iter()
        .map(|tet| tet.map(|node| (node < particle_count).then_some(node)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meso_types::Point3;

    #[test]
    fn test_low_indices_are_particles() {
        let mesh = TetMesh::new(
            vec![
                Point3::new(0.2, 0.2, 0.2), // particle 0
                Point3::new(0.8, 0.8, 0.8), // particle 1
                Point3::new(0.0, 0.0, 0.0), // boundary
                Point3::new(1.0, 0.0, 0.0), // boundary
                Point3::new(0.0, 1.0, 0.0), // boundary
            ],
            vec![[0, 2, 3, 4], [1, 0, 3, 4]],
        );

        let assoc = associate_particles(&mesh, 2);
        assert_eq!(assoc[0], [Some(0), None, None, None]);
        assert_eq!(assoc[1], [Some(1), Some(0), None, None]);
    }

    #[test]
    fn test_zero_particles_means_all_boundary() {
        let mesh = TetMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2, 3]],
        );

        let assoc = associate_particles(&mesh, 0);
        assert_eq!(assoc[0], [None; 4]);
    }
}
