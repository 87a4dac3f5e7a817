//! Parsers for the engine's `.node` and `.ele` output files.
//!
//! Both formats are whitespace-delimited text: a header line with counts
//! and metadata, then one line per entry starting with its index. Comment
//! lines start with `#` and are skipped. The engine numbers entries from 0
//! or 1 depending on how it was invoked; the first entry's index determines
//! the base and all indices are normalized to 0-based.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use meso_types::{Point3, TetMesh};

use crate::error::{TetgenError, TetgenResult};

/// Read a `.node` file into node positions, in file order.
///
/// Header: `<count> <dimension> <attributes> <boundary markers>`. Each
/// entry: `<index> <x> <y> <z> [attributes...]`.
///
/// # Errors
///
/// Returns [`TetgenError::FileNotFound`] when the file is missing and
/// [`TetgenError::InvalidContent`] for a malformed header or entry.
pub fn read_node_file(path: &Path) -> TetgenResult<Vec<Point3<f64>>> {
    let mut lines = open_data_lines(path)?;

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| TetgenError::invalid_content(path, "missing header line"))?;
    let count: usize = parse_field(path, &header, 0, "node count")?;

    let mut nodes = Vec::with_capacity(count);
    for line in lines {
        let line = line?;
        let x: f64 = parse_field(path, &line, 1, "x coordinate")?;
        let y: f64 = parse_field(path, &line, 2, "y coordinate")?;
        let z: f64 = parse_field(path, &line, 3, "z coordinate")?;
        nodes.push(Point3::new(x, y, z));
        if nodes.len() == count {
            break;
        }
    }

    if nodes.len() != count {
        return Err(TetgenError::invalid_content(
            path,
            format!("header promised {count} nodes, found {}", nodes.len()),
        ));
    }
    Ok(nodes)
}

/// Read a `.ele` file into tetrahedra as 0-based node index quadruples.
///
/// Header: `<count> <nodes per tet> <attributes>`. Each entry:
/// `<index> <v1> <v2> <v3> <v4> [attributes...]`. The index base (0 or 1)
/// is taken from the first entry and subtracted from every vertex index.
///
/// # Errors
///
/// Returns [`TetgenError::FileNotFound`] when the file is missing and
/// [`TetgenError::InvalidContent`] for a malformed header or entry.
pub fn read_ele_file(path: &Path) -> TetgenResult<Vec<[usize; 4]>> {
    let mut lines = open_data_lines(path)?;

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| TetgenError::invalid_content(path, "missing header line"))?;
    let count: usize = parse_field(path, &header, 0, "element count")?;

    let mut base: Option<usize> = None;
    let mut tets = Vec::with_capacity(count);
    for line in lines {
        let line = line?;
        if base.is_none() {
            base = Some(parse_field(path, &line, 0, "element index")?);
        }
        let base = base.unwrap_or(0);

        let mut tet = [0_usize; 4];
        for (slot, field) in tet.iter_mut().zip(1..=4) {
            let index: usize = parse_field(path, &line, field, "vertex index")?;
            *slot = index.checked_sub(base).ok_or_else(|| {
                TetgenError::invalid_content(
                    path,
                    format!("vertex index {index} below index base {base}"),
                )
            })?;
        }
        tets.push(tet);
        if tets.len() == count {
            break;
        }
    }

    if tets.len() != count {
        return Err(TetgenError::invalid_content(
            path,
            format!("header promised {count} elements, found {}", tets.len()),
        ));
    }
    Ok(tets)
}

/// Read a node/element file pair into a [`TetMesh`].
///
/// # Errors
///
/// Propagates the errors of [`read_node_file`] and [`read_ele_file`], plus
/// [`TetgenError::InvalidContent`] when an element references a missing
/// node.
pub fn read_tet_mesh(node_path: &Path, ele_path: &Path) -> TetgenResult<TetMesh> {
    let nodes = read_node_file(node_path)?;
    let tets = read_ele_file(ele_path)?;

    for (i, tet) in tets.iter().enumerate() {
        if let Some(&v) = tet.iter().find(|&&v| v >= nodes.len()) {
            return Err(TetgenError::invalid_content(
                ele_path,
                format!(
                    "element {i} references node {v}, only {} nodes exist",
                    nodes.len()
                ),
            ));
        }
    }

    Ok(TetMesh::new(nodes, tets))
}

/// Open a file as an iterator over non-empty, non-comment lines.
fn open_data_lines(
    path: &Path,
) -> TetgenResult<impl Iterator<Item = std::io::Result<String>>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TetgenError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TetgenError::Io(e)
        }
    })?;

    Ok(BufReader::new(file).lines().filter(|line| {
        line.as_ref().map_or(true, |l| {
            let trimmed = l.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
    }))
}

/// Parse whitespace-delimited field `index` of `line`.
fn parse_field<T: std::str::FromStr>(
    path: &Path,
    line: &str,
    index: usize,
    what: &str,
) -> TetgenResult<T> {
    line.split_whitespace()
        .nth(index)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| {
            TetgenError::invalid_content(path, format!("bad {what} in line {line:?}"))
        })
}
