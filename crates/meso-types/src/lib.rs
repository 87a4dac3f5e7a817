//! Core geometry and data types for particle mesostructure generation.
//!
//! This crate provides the shared vocabulary used across the mesoforge
//! pipeline:
//!
//! - [`Particle`] - A spherical particle (center + diameter)
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Tetrahedron`] - Four-vertex cell with volume and containment queries
//! - [`DomainMesh`] - Tetrahedral domain with a triangulated surface
//! - [`TetMesh`] - Node/tetrahedron arrays produced by tetrahedralization
//! - [`LatticeFacet`] - A lattice cell face between adjacent tetrahedra
//!
//! # Conventions
//!
//! All coordinates are `f64` in a right-handed coordinate system. Vertex
//! indices are 0-based everywhere inside the pipeline; mesh sources that
//! number from 1 are normalized at construction
//! (see [`DomainMesh::from_one_based`]).
//!
//! # Example
//!
//! ```
//! use meso_types::{DomainMesh, Particle, Point3};
//!
//! let domain = DomainMesh::unit_cube();
//! assert!((domain.volume() - 1.0).abs() < 1e-12);
//!
//! let particle = Particle::new(Point3::new(0.5, 0.5, 0.5), 0.1);
//! assert!(domain.aabb().contains(&particle.center));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod domain;
mod facet;
mod particle;
mod tetmesh;
mod tetrahedron;

pub use bounds::Aabb;
pub use domain::DomainMesh;
pub use facet::LatticeFacet;
pub use particle::{sphere_volume, Particle};
pub use tetmesh::TetMesh;
pub use tetrahedron::Tetrahedron;

// Re-export the nalgebra types that appear in public signatures.
pub use nalgebra::{Point3, Vector3};
