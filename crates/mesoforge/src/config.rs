//! Top-level generation configuration.

use meso_gradation::{GradationConfig, MixDesign};
use meso_placement::PlacementConfig;
use meso_tetgen::TetgenConfig;

use crate::error::GenerationResult;

/// Configuration for one generation run: one section per pipeline stage.
///
/// Only the gradation section has no sensible default (the diameter window
/// is problem-specific), so construction starts from one.
///
/// # Example
///
/// ```
/// use meso_gradation::{GradationConfig, MixDesign};
/// use mesoforge::GenerationConfig;
///
/// let config = GenerationConfig::new(GradationConfig::fuller(0.004, 0.016, 0.5))
///     .with_mix(MixDesign::typical_structural())
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Mix-design recipe the particle volume fraction is derived from.
    pub mix: MixDesign,
    /// Diameter window and distribution source.
    pub gradation: GradationConfig,
    /// Placement engine and orchestrator tunables.
    pub placement: PlacementConfig,
    /// External tetrahedralization engine invocation.
    pub tetgen: TetgenConfig,
}

impl GenerationConfig {
    /// Create a configuration with default mix, placement, and engine
    /// sections.
    #[must_use]
    pub fn new(gradation: GradationConfig) -> Self {
        Self {
            mix: MixDesign::default(),
            gradation,
            placement: PlacementConfig::default(),
            tetgen: TetgenConfig::default(),
        }
    }

    /// Set the mix design.
    #[must_use]
    pub fn with_mix(mut self, mix: MixDesign) -> Self {
        self.mix = mix;
        self
    }

    /// Set the placement section.
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Set the engine section.
    #[must_use]
    pub fn with_tetgen(mut self, tetgen: TetgenConfig) -> Self {
        self.tetgen = tetgen;
        self
    }

    /// Seed both diameter sampling and placement.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.placement = self.placement.with_seed(seed);
        self
    }

    /// Validate every section before the run starts.
    ///
    /// # Errors
    ///
    /// Returns the first stage error encountered, in pipeline order.
    pub fn validate(&self) -> GenerationResult<()> {
        self.mix.validate()?;
        self.gradation.validate()?;
        self.placement.validate()?;
        self.tetgen.validate()?;
        Ok(())
    }
}
