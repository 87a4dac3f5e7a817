//! Placement configuration.

use crate::error::{PlacementError, PlacementResult};

/// Configuration for the placement engine and batch orchestrator.
///
/// The iteration budget is adaptive: each placement may use up to the
/// current soft cap, which is the running maximum of iterations any earlier
/// placement needed (it never shrinks and never decays). When a placement
/// exhausts the soft cap, the cap doubles, up to `iteration_ceiling`; only
/// ceiling exhaustion is fatal. Both caps are plain fields, so the no-decay
/// policy is a tunable rather than a fixed contract.
///
/// # Example
///
/// ```
/// use meso_placement::PlacementConfig;
///
/// let config = PlacementConfig::default()
///     .with_workers(4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Minimum particle clearance as a multiple of the smallest window
    /// diameter: the required surface gap is
    /// `offset_coefficient x window_min`.
    pub offset_coefficient: f64,
    /// Soft iteration cap before any placement has succeeded.
    pub initial_iteration_cap: usize,
    /// Hard per-particle iteration ceiling; exhausting it fails the run.
    pub iteration_ceiling: usize,
    /// Number of batches the diameter list is partitioned into when placing
    /// in parallel.
    pub batch_count: usize,
    /// Worker count for the parallel search phase. `1` keeps placement
    /// fully serial.
    pub workers: usize,
    /// Minimum batch length worth dispatching in parallel; shorter batches
    /// run serially to avoid pool overhead.
    pub parallel_threshold: usize,
    /// Optional seed for reproducible runs. `None` draws from the thread
    /// RNG.
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            offset_coefficient: 0.2,
            initial_iteration_cap: 2,
            iteration_ceiling: 100_000,
            batch_count: 8,
            workers: 1,
            parallel_threshold: 32,
            seed: None,
        }
    }
}

impl PlacementConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clearance offset coefficient.
    #[must_use]
    pub const fn with_offset_coefficient(mut self, coefficient: f64) -> Self {
        self.offset_coefficient = coefficient;
        self
    }

    /// Set the hard iteration ceiling.
    #[must_use]
    pub const fn with_iteration_ceiling(mut self, ceiling: usize) -> Self {
        self.iteration_ceiling = ceiling;
        self
    }

    /// Set the number of batches.
    #[must_use]
    pub const fn with_batch_count(mut self, batches: usize) -> Self {
        self.batch_count = batches;
        self
    }

    /// Set the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidConfig`] for a negative or
    /// non-finite offset coefficient, a zero iteration cap, a ceiling below
    /// the initial cap, a zero batch count, or a zero worker count.
    #[allow(clippy::cast_precision_loss)] // counts reported in error values only
    pub fn validate(&self) -> PlacementResult<()> {
        if !self.offset_coefficient.is_finite() || self.offset_coefficient < 0.0 {
            return Err(PlacementError::InvalidConfig {
                field: "offset_coefficient",
                value: self.offset_coefficient,
            });
        }
        if self.initial_iteration_cap == 0 {
            return Err(PlacementError::InvalidConfig {
                field: "initial_iteration_cap",
                value: 0.0,
            });
        }
        if self.iteration_ceiling < self.initial_iteration_cap {
            return Err(PlacementError::InvalidConfig {
                field: "iteration_ceiling",
                value: self.iteration_ceiling as f64,
            });
        }
        if self.batch_count == 0 {
            return Err(PlacementError::InvalidConfig {
                field: "batch_count",
                value: 0.0,
            });
        }
        if self.workers == 0 {
            return Err(PlacementError::InvalidConfig {
                field: "workers",
                value: 0.0,
            });
        }
        Ok(())
    }
}
