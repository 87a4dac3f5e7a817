//! Particle mesostructure generation for lattice discrete models.
//!
//! Given a mix design, a particle size distribution, and a tetrahedral
//! domain mesh, [`generate`] produces a [`Mesostructure`]: a maximal
//! non-overlapping set of spherical particles matching the target gradation,
//! the constrained tetrahedralization of their centers and the domain
//! boundary, and the lattice facets derived from it.
//!
//! The stages are separate crates, re-exported here:
//!
//! - [`gradation`] - mix design, sieve curves, diameter list generation
//! - [`placement`] - rejection-sampling placement with a parallel batch
//!   orchestrator
//! - [`tetgen`] - external tetrahedralization engine driver
//! - [`lattice`] - facet extraction and particle association
//!
//! # Example
//!
//! ```no_run
//! use meso_gradation::{GradationConfig, MixDesign};
//! use meso_types::DomainMesh;
//! use mesoforge::{generate, GenerationConfig};
//!
//! let config = GenerationConfig::new(GradationConfig::fuller(0.004, 0.016, 0.5))
//!     .with_mix(MixDesign::typical_structural())
//!     .with_seed(42);
//!
//! let structure = generate(DomainMesh::unit_cube(), &config)?;
//! println!("{}", structure.stats);
//! # Ok::<(), mesoforge::GenerationError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod pipeline;
mod stats;

pub use config::GenerationConfig;
pub use error::{GenerationError, GenerationResult};
pub use pipeline::{generate, generate_particles, Mesostructure, ParticleAssembly};
pub use stats::GenerationStats;

pub use meso_gradation as gradation;
pub use meso_lattice as lattice;
pub use meso_placement as placement;
pub use meso_tetgen as tetgen;
pub use meso_types as types;
