//! Error types for gradation and distribution construction.

use thiserror::Error;

/// Result type for gradation operations.
pub type GradationResult<T> = Result<T, GradationError>;

/// Errors detected while building distributions or validating mix inputs.
///
/// All of these are configuration errors: they are surfaced before any
/// particle is generated and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GradationError {
    /// The particle diameter window is empty or non-positive.
    #[error("invalid diameter window: min {min} must be positive and below max {max}")]
    InvalidDiameterWindow {
        /// Requested minimum particle diameter.
        min: f64,
        /// Requested maximum particle diameter.
        max: f64,
    },

    /// The Fuller exponent is outside the usable range.
    #[error("Fuller exponent {exponent} must lie in (0, 3)")]
    InvalidFullerExponent {
        /// Offending exponent.
        exponent: f64,
    },

    /// A mix component has an invalid value (negative content, non-positive
    /// density, fraction outside [0, 1]).
    #[error("invalid mix component {component}: {value}")]
    InvalidMixComponent {
        /// Name of the offending component field.
        component: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The mix volume fractions leave no valid particle fraction.
    #[error("mix volume fractions leave particle fraction {fraction}, outside [0, 1]")]
    ParticleFractionOutOfRange {
        /// Computed particle volume fraction.
        fraction: f64,
    },

    /// Sieve diameter and passing arrays differ in length.
    #[error("sieve curve arrays differ in length: {diameters} diameters, {passing} passing values")]
    SieveLengthMismatch {
        /// Number of diameter entries.
        diameters: usize,
        /// Number of passing entries.
        passing: usize,
    },

    /// A sieve curve needs at least two points.
    #[error("sieve curve needs at least two points, got {points}")]
    SieveTooShort {
        /// Number of points supplied.
        points: usize,
    },

    /// Sieve diameters must strictly increase.
    #[error("sieve diameters must strictly increase (violated at index {index})")]
    SieveDiametersNotIncreasing {
        /// Index of the first out-of-order entry.
        index: usize,
    },

    /// A sieve passing fraction is outside [0, 1] or decreases.
    #[error("sieve passing fraction {value} at index {index} is out of range or decreasing")]
    SievePassingInvalid {
        /// Index of the offending entry.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// The sieve curve does not bracket a diameter window endpoint.
    #[error("sieve curve does not bracket diameter {diameter}")]
    CurveDoesNotBracket {
        /// Window endpoint that falls outside the curve support.
        diameter: f64,
    },

    /// The domain volume must be positive to size a particle population.
    #[error("domain volume {volume} must be positive")]
    NonPositiveDomainVolume {
        /// Offending volume.
        volume: f64,
    },
}
