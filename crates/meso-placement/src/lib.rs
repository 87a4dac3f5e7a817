//! Particle placement by rejection sampling, with a parallel batch
//! orchestrator.
//!
//! Given a prepared domain ([`DomainAdapter`]) and a diameter list, this
//! crate finds a center for every particle such that the sphere lies inside
//! the domain and keeps a minimum clearance from the boundary and from every
//! other particle. Placement is monotonic: once confirmed, a particle never
//! moves.
//!
//! # Design Decisions
//!
//! ## Serial by Default
//!
//! `PlacementConfig::default()` keeps placement fully serial (`workers = 1`).
//! Parallel dispatch pays off only for long diameter lists; short batches
//! always fall back to the serial path.
//!
//! ## Optimistic Parallel Search, Serial Repair
//!
//! Within a batch every worker searches against an immutable snapshot of
//! the arena taken at batch start, so the parallel phase needs no locks.
//! The batch is then replayed serially in list order: candidates that
//! conflict with a peer accepted earlier in the replay are discarded and
//! re-placed synchronously. Batch size and worker count affect performance,
//! never the clearance invariant.
//!
//! ## Adaptive Iteration Cap
//!
//! The per-particle retry budget is the running maximum of iterations any
//! earlier placement needed; it doubles when exhausted, up to a hard
//! ceiling, and never decays. Only ceiling exhaustion is fatal - an
//! unplaced particle would corrupt the point set handed to tessellation, so
//! the run fails rather than skipping it.
//!
//! # Example
//!
//! ```
//! use meso_gradation::{DiameterList, GradationConfig, ParticleCdf};
//! use meso_placement::{place_all, DomainAdapter, PlacementConfig};
//! use meso_types::DomainMesh;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let domain = DomainAdapter::new(DomainMesh::unit_cube()).unwrap();
//! let cdf = ParticleCdf::build(&GradationConfig::fuller(0.05, 0.2, 0.5)).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let list = DiameterList::generate(0.1, &cdf, &mut rng);
//!
//! let config = PlacementConfig::default().with_seed(7);
//! let (arena, stats) = place_all(&domain, &list, &config).unwrap();
//! assert_eq!(stats.particle_count, list.len());
//! assert!(arena.is_complete());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arena;
mod config;
mod domain;
mod engine;
mod error;
mod orchestrator;

pub use arena::ParticleArena;
pub use config::PlacementConfig;
pub use domain::DomainAdapter;
pub use engine::{conflicts, place_particle, PlacementSample};
pub use error::{PlacementError, PlacementResult};
pub use orchestrator::{place_all, PlacementStats};
