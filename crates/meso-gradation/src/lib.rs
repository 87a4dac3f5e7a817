//! Mix design and particle size distribution sampling.
//!
//! This crate turns a mix-design recipe and a gradation source into the
//! ordered list of particle diameters a generation run will place:
//!
//! 1. [`MixDesign`] derives the particle volume fraction left over by the
//!    binder phases, water, and entrained air.
//! 2. [`ParticleCdf`] builds the cumulative volume distribution over
//!    diameter, from either Fuller's power law or an empirical
//!    [`SieveCurve`] re-based to the simulated window.
//! 3. [`DiameterList`] samples the distribution until the cumulative sphere
//!    volume reaches the target, then fixes the largest-first placement
//!    order.
//!
//! # Example
//!
//! ```
//! use meso_gradation::{
//!     compute_target, DiameterList, GradationConfig, MixDesign, ParticleCdf,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = GradationConfig::fuller(0.05, 0.2, 0.5);
//! let cdf = ParticleCdf::build(&config).unwrap();
//!
//! // A unit-volume domain that is all particles: target = window share.
//! let target = compute_target(&MixDesign::default(), &cdf, 1.0).unwrap();
//! assert!((target.target_volume - 0.5).abs() < 1e-12);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let list = DiameterList::generate(target.target_volume, &cdf, &mut rng);
//! assert!(list.total_volume() <= target.target_volume);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod diameters;
mod distribution;
mod error;
mod mix;
mod report;
mod sieve;

pub use diameters::DiameterList;
pub use distribution::{
    compute_target, uniform_unit, Gradation, GradationConfig, ParticleCdf, ParticleTarget,
};
pub use error::{GradationError, GradationResult};
pub use mix::MixDesign;
pub use report::{gradation_report, GradationReport};
pub use sieve::{RebasedSieve, SieveCurve};
