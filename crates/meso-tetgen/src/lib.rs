//! Driver for the external constrained tetrahedralization engine.
//!
//! The tessellation stage hands the engine a point set (particle centers
//! first, then domain boundary points) plus the boundary triangles, invokes
//! it as a child process, and reads back the node/element files it writes.
//! The engine itself is an external collaborator; this crate owns the file
//! formats and the process boundary:
//!
//! - [`write_medit_mesh`] - MEDIT `.mesh` input writer
//! - [`tetrahedralize`] - process invocation and output verification
//! - [`read_node_file`] / [`read_ele_file`] / [`read_tet_mesh`] - output
//!   parsers with comment skipping and index-base normalization
//!
//! The default switches forbid Steiner point insertion, so the output node
//! order matches the input point order exactly; the driver verifies the
//! node count and rejects runs where the engine changed the point set.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod driver;
mod error;
mod input;
mod output;

pub use config::TetgenConfig;
pub use driver::tetrahedralize;
pub use error::{TetgenError, TetgenResult};
pub use input::write_medit_mesh;
pub use output::{read_ele_file, read_node_file, read_tet_mesh};
