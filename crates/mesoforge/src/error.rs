//! Pipeline error type: one variant per stage.

use thiserror::Error;

/// Result type for generation runs.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors from a generation run, tagged by the stage that produced them.
/// Every stage error is fatal; the pipeline never emits partial output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// Mix design, diameter window, or sieve curve rejected.
    #[error("gradation: {0}")]
    Gradation(#[from] meso_gradation::GradationError),

    /// Domain preparation or particle placement failed.
    #[error("placement: {0}")]
    Placement(#[from] meso_placement::PlacementError),

    /// The external tetrahedralization engine failed or produced
    /// unreadable output.
    #[error("tessellation: {0}")]
    Tessellation(#[from] meso_tetgen::TetgenError),

    /// Facet extraction rejected the tetrahedralization.
    #[error("lattice: {0}")]
    Lattice(#[from] meso_lattice::LatticeError),
}
