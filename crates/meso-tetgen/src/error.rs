//! Error types for the tetrahedralization engine driver.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine driver operations.
pub type TetgenResult<T> = Result<T, TetgenError>;

/// Errors that can occur while driving the external engine or parsing its
/// output. All are fatal to the run; none are retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TetgenError {
    /// A configuration field holds an unusable value.
    #[error("invalid tetgen config: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// An expected input or output file was not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A node or element file failed to parse.
    #[error("invalid content in {path}: {message}")]
    InvalidContent {
        /// File being parsed.
        path: PathBuf,
        /// Description of what was invalid.
        message: String,
    },

    /// The engine exited with a non-zero status.
    #[error("tetrahedralization engine failed with status {status}: {stderr}")]
    EngineFailure {
        /// Exit status reported by the process, or -1 when terminated by a
        /// signal.
        status: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// The engine inserted or dropped points.
    ///
    /// Placement hands the engine a point set whose order is the
    /// node-to-particle contract; a changed node count breaks it.
    #[error("engine changed the point set: wrote {actual} nodes, expected {expected}")]
    NodeCountMismatch {
        /// Points handed to the engine.
        expected: usize,
        /// Nodes read back.
        actual: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TetgenError {
    /// Create an `InvalidContent` error for `path` with the given message.
    #[must_use]
    pub fn invalid_content(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
