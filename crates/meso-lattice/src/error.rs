//! Error types for lattice extraction.

use thiserror::Error;

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors detected while deriving lattice facets from a tetrahedralization.
/// All are fatal: facet data derived from a degenerate element must never
/// reach the solver.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// The tetrahedralization holds no elements.
    #[error("tetrahedralization holds no elements")]
    EmptyMesh,

    /// An element has near-zero volume, typically from near-coincident
    /// points; its facets would be NaN or zero-area.
    #[error("tetrahedron {index} is degenerate (volume {volume:e})")]
    DegenerateTetrahedron {
        /// Index of the offending tetrahedron.
        index: usize,
        /// Its absolute volume.
        volume: f64,
    },

    /// A face shared by more than two tetrahedra; the mesh is not a valid
    /// tetrahedralization.
    #[error("face {face:?} is shared by more than two tetrahedra")]
    NonManifoldFace {
        /// Sorted node indices of the offending face.
        face: [usize; 3],
    },
}
