//! Lattice facet extraction from a particle tetrahedralization.
//!
//! Discrete lattice models replace the continuum with a network of
//! one-dimensional interactions: each face shared by two tetrahedra of the
//! particle tessellation becomes a [`LatticeFacet`](meso_types::LatticeFacet)
//! carrying its geometry (centroid, area, oriented unit normal) and the
//! sub-volume it subtends inside each adjacent element. Faces on the domain
//! surface become boundary facets with outward normals.
//!
//! The tessellation node order is load-bearing: particle centers come
//! first, so a node index below the particle count identifies the particle
//! directly. [`associate_particles`] exposes that mapping per tetrahedron
//! vertex.
//!
//! # Design Decisions
//!
//! **Relative degeneracy threshold.** A tetrahedron is rejected when its
//! volume falls below the total mesh volume times `1e-12`, so the check is
//! invariant under uniform scaling of the domain. Degeneracy is fatal
//! rather than skipped: a lattice with silently missing facets would
//! produce a solver model that looks valid and is not.
//!
//! **Deterministic facet order.** Facets are emitted by scanning tetrahedra
//! in index order and letting the lower-indexed owner emit each shared
//! face, so the output does not depend on hash map iteration order.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod associate;
mod error;
mod facets;
mod stats;

pub use associate::associate_particles;
pub use error::{LatticeError, LatticeResult};
pub use facets::{extract_lattice, Lattice};
pub use stats::LatticeStats;
