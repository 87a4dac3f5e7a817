//! Shared-face facet extraction and sub-volume computation.

use hashbrown::HashMap;
use meso_types::{LatticeFacet, Point3, TetMesh, Tetrahedron};
use tracing::info;

use crate::associate::associate_particles;
use crate::error::{LatticeError, LatticeResult};
use crate::stats::LatticeStats;

/// Volume ratio (relative to the whole mesh) below which a tetrahedron
/// counts as degenerate. An absolute epsilon would not survive unit
/// changes.
const DEGENERACY_RATIO: f64 = 1e-12;

/// Local vertex triples of the four faces of a tetrahedron; face `k` omits
/// vertex `k`.
const TET_FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// The lattice discretization derived from a tetrahedralization.
#[derive(Debug, Clone)]
pub struct Lattice {
    /// All facets: interior (two adjacent tetrahedra) and boundary (one).
    pub facets: Vec<LatticeFacet>,
    /// Per-tetrahedron particle association (see
    /// [`associate_particles`]).
    pub associations: Vec<[Option<usize>; 4]>,
    /// Summary statistics.
    pub stats: LatticeStats,
}

impl Lattice {
    /// Facets adjacent to tetrahedron `tet`, in facet order.
    pub fn facets_of(&self, tet: usize) -> impl Iterator<Item = &LatticeFacet> {
        self.facets
            .iter()
            .filter(move |f| f.tet_a == tet || f.tet_b == Some(tet))
    }
}

/// Derive lattice facets from a tetrahedralization.
///
/// Every face shared by two tetrahedra becomes an interior facet carrying
/// its centroid, area, unit normal (oriented from the lower-indexed
/// tetrahedron to the higher), the adjacent pair, and the sub-volume it
/// subtends on each side (the tetrahedron formed by the face and the
/// owner's centroid; the four sub-volumes of a tetrahedron sum to its
/// volume). Unshared faces become boundary facets with outward normals.
///
/// # Errors
///
/// Returns [`LatticeError::EmptyMesh`] for a mesh without elements,
/// [`LatticeError::DegenerateTetrahedron`] when any element's volume falls
/// below `mesh volume x 1e-12`, and [`LatticeError::NonManifoldFace`] when
/// a face is shared by more than two elements.
pub fn extract_lattice(mesh: &TetMesh, particle_count: usize) -> LatticeResult<Lattice> {
    if mesh.tet_count() == 0 {
        return Err(LatticeError::EmptyMesh);
    }

    let tets: Vec<Tetrahedron> = (0..mesh.tet_count()).map(|i| mesh.tetrahedron(i)).collect();
    let volumes: Vec<f64> = tets.iter().map(Tetrahedron::volume).collect();
    let mesh_volume: f64 = volumes.iter().sum();
    let threshold = mesh_volume * DEGENERACY_RATIO;

    for (index, &volume) in volumes.iter().enumerate() {
        if volume <= threshold {
            return Err(LatticeError::DegenerateTetrahedron { index, volume });
        }
    }

    let centroids: Vec<Point3<f64>> = tets.iter().map(Tetrahedron::centroid).collect();

    // First pass: face key -> owning tetrahedra (at most two).
    let mut owners: HashMap<[usize; 3], (usize, Option<usize>)> =
        HashMap::with_capacity(mesh.tet_count() * 2);
    for (t, tet) in mesh.tets.iter().enumerate() {
        for local in TET_FACES {
            let key = face_key(tet, local);
            match owners.get_mut(&key) {
                None => {
                    owners.insert(key, (t, None));
                }
                Some((_, second @ None)) => *second = Some(t),
                Some(_) => return Err(LatticeError::NonManifoldFace { face: key }),
            }
        }
    }

    // Second pass in tetrahedron order, emitting each facet once from its
    // lower-indexed owner, so the facet order is deterministic.
    let mut facets = Vec::with_capacity(owners.len());
    for (t, tet) in mesh.tets.iter().enumerate() {
        for local in TET_FACES {
            let key = face_key(tet, local);
            let &(tet_a, tet_b) = owners.get(&key).unwrap_or(&(t, None));
            if tet_a != t {
                continue;
            }

            let [a, b, c] = key.map(|i| mesh.nodes[i]);
            let centroid = Point3::new(
                (a.x + b.x + c.x) / 3.0,
                (a.y + b.y + c.y) / 3.0,
                (a.z + b.z + c.z) / 3.0,
            );
            let cross = (b - a).cross(&(c - a));
            let area = cross.norm() / 2.0;
            let mut normal = cross / (2.0 * area);

            // Interior normals point from tet_a toward tet_b; boundary
            // normals point out of the domain (away from the sole owner).
            let toward = match tet_b {
                Some(other) => centroids[other] - centroid,
                None => centroid - centroids[tet_a],
            };
            if normal.dot(&toward) < 0.0 {
                normal = -normal;
            }

            let sub_volume_a = Tetrahedron::new([a, b, c, centroids[tet_a]]).volume();
            let sub_volume_b = tet_b.map(|other| {
                Tetrahedron::new([a, b, c, centroids[other]]).volume()
            });

            facets.push(LatticeFacet {
                centroid,
                area,
                normal,
                tet_a,
                tet_b,
                sub_volume_a,
                sub_volume_b,
            });
        }
    }

    let stats = LatticeStats::summarize(mesh, &facets, mesh_volume);
    info!(
        tets = mesh.tet_count(),
        interior = stats.interior_facets,
        boundary = stats.boundary_facets,
        "Lattice extracted"
    );

    Ok(Lattice {
        facets,
        associations: associate_particles(mesh, particle_count),
        stats,
    })
}

/// Sorted global node indices of one tetrahedron face.
fn face_key(tet: &[usize; 4], local: [usize; 3]) -> [usize; 3] {
    let mut key = local.map(|k| tet[k]);
    key.sort_unstable();
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two tetrahedra sharing the face (0, 1, 2), apexes above and below.
    fn two_tet_mesh() -> TetMesh {
        TetMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, -1.0),
            ],
            vec![[0, 1, 2, 3], [0, 1, 2, 4]],
        )
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        let mesh = TetMesh::new(Vec::new(), Vec::new());
        assert_eq!(
            extract_lattice(&mesh, 0).unwrap_err(),
            LatticeError::EmptyMesh
        );
    }

    #[test]
    fn test_interior_and_boundary_counts() {
        let lattice = extract_lattice(&two_tet_mesh(), 0).unwrap();
        let interior: Vec<_> = lattice.facets.iter().filter(|f| f.is_interior()).collect();
        let boundary: Vec<_> = lattice.facets.iter().filter(|f| f.is_boundary()).collect();

        assert_eq!(interior.len(), 1);
        assert_eq!(boundary.len(), 6);
        assert_eq!(lattice.facets.len(), 7);

        let shared = interior[0];
        assert_eq!((shared.tet_a, shared.tet_b), (0, Some(1)));
        assert_relative_eq!(shared.area, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_interior_normal_points_a_to_b() {
        let lattice = extract_lattice(&two_tet_mesh(), 0).unwrap();
        let shared = lattice
            .facets
            .iter()
            .find(|f| f.is_interior())
            .unwrap();
        // Tet 1's apex is below the z = 0 plane.
        assert!(shared.normal.z < 0.0);
        assert_relative_eq!(shared.normal.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_normals_point_outward() {
        let lattice = extract_lattice(&two_tet_mesh(), 0).unwrap();
        for facet in lattice.facets.iter().filter(|f| f.is_boundary()) {
            let centroid_a = TetMesh::tetrahedron(&two_tet_mesh(), facet.tet_a).centroid();
            assert!(facet.normal.dot(&(facet.centroid - centroid_a)) > 0.0);
        }
    }

    #[test]
    fn test_sub_volumes_partition_each_tet() {
        let mesh = two_tet_mesh();
        let lattice = extract_lattice(&mesh, 0).unwrap();

        for t in 0..mesh.tet_count() {
            let total: f64 = lattice
                .facets_of(t)
                .map(|f| {
                    if f.tet_a == t {
                        f.sub_volume_a
                    } else {
                        f.sub_volume_b.unwrap_or(0.0)
                    }
                })
                .sum();
            assert_relative_eq!(total, mesh.tetrahedron(t).volume(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_tet_is_an_error() {
        let mesh = TetMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.5, 0.5, 0.0), // coplanar with face (0, 1, 2)
            ],
            vec![[0, 1, 2, 3], [0, 1, 2, 4]],
        );

        assert!(matches!(
            extract_lattice(&mesh, 0),
            Err(LatticeError::DegenerateTetrahedron { index: 1, .. })
        ));
    }

    #[test]
    fn test_associations_are_recorded() {
        let lattice = extract_lattice(&two_tet_mesh(), 2).unwrap();
        assert_eq!(lattice.associations.len(), 2);
        assert_eq!(lattice.associations[0], [Some(0), Some(1), None, None]);
    }
}
