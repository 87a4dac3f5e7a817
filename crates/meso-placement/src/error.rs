//! Error types for particle placement.

use thiserror::Error;

/// Result type for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Errors that can occur while placing particles.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PlacementError {
    /// A configuration field holds an unusable value. Detected before any
    /// particle is placed.
    #[error("invalid placement config: {field} = {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The domain mesh holds no tetrahedra, so nothing can be placed.
    #[error("domain mesh has no tetrahedra")]
    EmptyDomain,

    /// The iteration ceiling was exhausted for one particle.
    ///
    /// Fatal to the run: an unplaced particle would corrupt the point set
    /// handed to tessellation, so partial output is never returned.
    #[error(
        "placement of particle {index} (diameter {diameter}) exhausted \
         {iterations} iterations"
    )]
    Exhausted {
        /// Index of the particle in the diameter list.
        index: usize,
        /// Diameter of the particle that could not be placed.
        diameter: f64,
        /// Iterations spent before giving up.
        iterations: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_the_particle() {
        let err = PlacementError::Exhausted {
            index: 17,
            diameter: 0.08,
            iterations: 100_000,
        };
        let message = err.to_string();
        assert!(message.contains("17"));
        assert!(message.contains("0.08"));
    }
}
