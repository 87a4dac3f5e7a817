//! Engine driver configuration.

use std::path::PathBuf;

use crate::error::{TetgenError, TetgenResult};

/// Configuration for invoking the external tetrahedralization engine.
///
/// The default switch string `-pYS0Q` tetrahedralizes the piecewise-linear
/// complex (`p`) without splitting boundary facets (`Y`) and without
/// inserting Steiner points (`S0`), quietly (`Q`). The no-new-points
/// constraint is what keeps the node order identical to the point set the
/// driver wrote, so node index `i` below the particle count is particle `i`.
///
/// # Example
///
/// ```
/// use meso_tetgen::TetgenConfig;
///
/// let config = TetgenConfig::default().with_binary("/usr/local/bin/tetgen");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetgenConfig {
    /// Engine binary to invoke; resolved through `PATH` when relative.
    pub binary: PathBuf,
    /// Switch string passed as the first argument.
    pub switches: String,
    /// Directory for input and output files. `None` uses a fresh scratch
    /// directory that is removed when the run finishes.
    pub work_dir: Option<PathBuf>,
}

impl Default for TetgenConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tetgen"),
            switches: String::from("-pYS0Q"),
            work_dir: None,
        }
    }
}

impl TetgenConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine binary path.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the switch string.
    #[must_use]
    pub fn with_switches(mut self, switches: impl Into<String>) -> Self {
        self.switches = switches.into();
        self
    }

    /// Set a working directory, keeping the engine files after the run.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TetgenError::InvalidConfig`] for an empty binary path or an
    /// empty switch string.
    pub fn validate(&self) -> TetgenResult<()> {
        if self.binary.as_os_str().is_empty() {
            return Err(TetgenError::InvalidConfig {
                message: String::from("binary path is empty"),
            });
        }
        if self.switches.is_empty() {
            return Err(TetgenError::InvalidConfig {
                message: String::from("switch string is empty"),
            });
        }
        Ok(())
    }
}
