//! MEDIT `.mesh` input writer for the tetrahedralization engine.
//!
//! The point set is written particle centers first, then boundary points,
//! so node index `i < particle_count` identifies particle `i` in the
//! engine's output. Boundary triangles constrain the tetrahedralization to
//! the domain surface.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use meso_types::Point3;

use crate::error::TetgenResult;

/// Write a MEDIT `.mesh` file: particle centers, then boundary points, then
/// boundary triangles.
///
/// Vertex indices in the file are 1-based per the format; the triangle
/// indices reference `boundary_points` and are offset past the particle
/// centers.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be written.
pub fn write_medit_mesh(
    path: &Path,
    particle_centers: &[Point3<f64>],
    boundary_points: &[Point3<f64>],
    boundary_triangles: &[[usize; 3]],
) -> TetgenResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "MeshVersionFormatted 2")?;
    writeln!(writer, "Dimension")?;
    writeln!(writer, "3")?;

    writeln!(writer, "Vertices")?;
    writeln!(
        writer,
        "{}",
        particle_centers.len() + boundary_points.len()
    )?;
    for p in particle_centers.iter().chain(boundary_points) {
        writeln!(writer, "{} {} {} 0", p.x, p.y, p.z)?;
    }

    writeln!(writer, "Triangles")?;
    writeln!(writer, "{}", boundary_triangles.len())?;
    let offset = particle_centers.len() + 1;
    for tri in boundary_triangles {
        writeln!(
            writer,
            "{} {} {} 0",
            tri[0] + offset,
            tri[1] + offset,
            tri[2] + offset
        )?;
    }

    writeln!(writer, "End")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_particles_before_boundary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("domain.mesh");

        let particles = vec![Point3::new(0.5, 0.5, 0.5)];
        let boundary = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2]];

        write_medit_mesh(&path, &particles, &boundary, &triangles).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        let vertices_at = lines.iter().position(|l| *l == "Vertices").unwrap();
        assert_eq!(lines[vertices_at + 1], "4");
        // Particle center is the first vertex.
        assert_eq!(lines[vertices_at + 2], "0.5 0.5 0.5 0");

        let triangles_at = lines.iter().position(|l| *l == "Triangles").unwrap();
        assert_eq!(lines[triangles_at + 1], "1");
        // 1-based, offset past the single particle center.
        assert_eq!(lines[triangles_at + 2], "2 3 4 0");
        assert_eq!(*lines.last().unwrap(), "End");
    }
}
