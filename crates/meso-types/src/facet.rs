//! Lattice cell facet derived from the tetrahedralization.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangular face shared by two tetrahedra (or one tetrahedron and the
/// domain boundary), used as a lattice discretization element.
///
/// Interior facets carry both adjacent tetrahedra and the sub-volume each
/// subtends (the tetrahedron formed by the face and the owner's centroid).
/// Boundary facets have `tet_b == None`; their normal points out of the
/// domain, while interior normals point from `tet_a` toward `tet_b`
/// (`tet_a < tet_b`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeFacet {
    /// Centroid of the triangular face.
    pub centroid: Point3<f64>,
    /// Face area.
    pub area: f64,
    /// Unit normal, oriented from `tet_a` toward `tet_b` (or outward for
    /// boundary facets).
    pub normal: Vector3<f64>,
    /// Lower-indexed adjacent tetrahedron.
    pub tet_a: usize,
    /// Higher-indexed adjacent tetrahedron, absent for boundary facets.
    pub tet_b: Option<usize>,
    /// Sub-volume the facet subtends inside `tet_a`.
    pub sub_volume_a: f64,
    /// Sub-volume the facet subtends inside `tet_b`, absent for boundary
    /// facets.
    pub sub_volume_b: Option<f64>,
}

impl LatticeFacet {
    /// True when the facet lies on the domain boundary.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.tet_b.is_none()
    }

    /// True when the facet separates two tetrahedra.
    #[inline]
    #[must_use]
    pub const fn is_interior(&self) -> bool {
        self.tet_b.is_some()
    }
}
