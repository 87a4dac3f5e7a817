//! Run-level statistics aggregated across the stages.

use meso_lattice::LatticeStats;
use meso_placement::PlacementStats;

/// Figures from one complete generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Volume of the input domain.
    pub domain_volume: f64,
    /// Placement-stage figures (particle count, volumes, iterations).
    pub placement: PlacementStats,
    /// Lattice-stage figures (facet counts, mesh volume).
    pub lattice: LatticeStats,
}

impl GenerationStats {
    /// Placed particle volume as a fraction of the domain volume.
    #[must_use]
    pub fn achieved_fraction(&self) -> f64 {
        if self.domain_volume > 0.0 {
            self.placement.placed_volume / self.domain_volume
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation: {} particles filling {:.2}% of the domain; {}; {}",
            self.placement.particle_count,
            self.achieved_fraction() * 100.0,
            self.placement,
            self.lattice
        )
    }
}
