//! TOML configuration for `split-obj` runs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cell_split::{GridCell, SplitConfig};
use serde::{Deserialize, Serialize};

use crate::ObjResult;

/// Settings for one `split-obj` run.
///
/// ```toml
/// output_dir = "parts"
/// usable = [[0, 0, 0], [0, 0, -1]]
///
/// [split]
/// epsilon = 1e-5
/// axis_order = ["X", "Z", "Y"]
/// quadify = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Decomposition settings.
    pub split: SplitConfig,
    /// Cells fragments may be clumped into. Clumping is skipped when empty.
    pub usable: Vec<[i32; 3]>,
    /// Directory for the written cell files.
    pub output_dir: Option<PathBuf>,
}

impl JobConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> ObjResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> ObjResult<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn usable_cells(&self) -> BTreeSet<GridCell> {
        self.usable.iter().copied().map(GridCell::from).collect()
    }
}
