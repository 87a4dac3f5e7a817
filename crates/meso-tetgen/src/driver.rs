//! External engine invocation.

use std::path::PathBuf;
use std::process::Command;

use meso_types::{Point3, TetMesh};
use tracing::{debug, info};

use crate::config::TetgenConfig;
use crate::error::{TetgenError, TetgenResult};
use crate::input::write_medit_mesh;
use crate::output::read_tet_mesh;

/// File stem for the engine input; output files get the engine's `.1`
/// infix.
const INPUT_STEM: &str = "domain";

/// Tetrahedralize particle centers plus domain boundary points by invoking
/// the external engine as a child process.
///
/// Writes the MEDIT input file into the configured working directory (or a
/// scratch directory removed afterwards), runs the engine, and parses the
/// `.node`/`.ele` output pair. The output node order is verified to match
/// the input point set, so node index `i < particle_centers.len()` is
/// particle `i`.
///
/// # Errors
///
/// Returns [`TetgenError::EngineFailure`] for a non-zero exit status,
/// [`TetgenError::NodeCountMismatch`] when the engine inserted or dropped
/// points, and the file errors of the input writer and output parsers.
pub fn tetrahedralize(
    particle_centers: &[Point3<f64>],
    boundary_points: &[Point3<f64>],
    boundary_triangles: &[[usize; 3]],
    config: &TetgenConfig,
) -> TetgenResult<TetMesh> {
    config.validate()?;

    // Scratch directory lives until parsing is done.
    let scratch;
    let work_dir: PathBuf = match &config.work_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => {
            scratch = tempfile::tempdir()?;
            scratch.path().to_path_buf()
        }
    };

    let input_path = work_dir.join(format!("{INPUT_STEM}.mesh"));
    write_medit_mesh(
        &input_path,
        particle_centers,
        boundary_points,
        boundary_triangles,
    )?;

    info!(
        particles = particle_centers.len(),
        boundary_points = boundary_points.len(),
        binary = %config.binary.display(),
        switches = %config.switches,
        "Invoking tetrahedralization engine"
    );

    let output = Command::new(&config.binary)
        .arg(&config.switches)
        .arg(&input_path)
        .current_dir(&work_dir)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TetgenError::FileNotFound {
                    path: config.binary.clone(),
                }
            } else {
                TetgenError::Io(e)
            }
        })?;

    if !output.status.success() {
        return Err(TetgenError::EngineFailure {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let node_path = work_dir.join(format!("{INPUT_STEM}.1.node"));
    let ele_path = work_dir.join(format!("{INPUT_STEM}.1.ele"));
    let mesh = read_tet_mesh(&node_path, &ele_path)?;

    let expected = particle_centers.len() + boundary_points.len();
    if mesh.node_count() != expected {
        return Err(TetgenError::NodeCountMismatch {
            expected,
            actual: mesh.node_count(),
        });
    }

    debug!(
        nodes = mesh.node_count(),
        tets = mesh.tet_count(),
        "Engine output parsed"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_surfaced() {
        let config = TetgenConfig::default().with_binary("/nonexistent/tetgen-binary");
        let particles = [Point3::new(0.5, 0.5, 0.5)];
        let boundary = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let triangles = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

        let err = tetrahedralize(&particles, &boundary, &triangles, &config).unwrap_err();
        assert!(matches!(err, TetgenError::FileNotFound { .. }));
    }

    /// Requires a `tetgen` binary on PATH; run with `cargo test -- --ignored`.
    #[test]
    #[ignore = "requires the external tetgen binary"]
    fn test_tetrahedralizes_a_tetrahedron() {
        let config = TetgenConfig::default();
        let particles = [Point3::new(0.25, 0.25, 0.25)];
        let boundary = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let triangles = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

        let mesh = tetrahedralize(&particles, &boundary, &triangles, &config).unwrap();
        assert_eq!(mesh.node_count(), 5);
        assert!(mesh.tet_count() >= 4);
        // Node 0 is the particle center.
        assert_eq!(mesh.nodes[0], particles[0]);
    }
}
