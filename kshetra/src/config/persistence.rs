//! Persistence configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Prefix tensor dumps with an i64 element count
    #[serde(default)]
    pub write_element_count: bool,

    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            write_element_count: false,
            output_dir: defaults::output_dir(),
        }
    }
}

impl PersistenceSection {
    /// Path of `file_name` inside the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.output_dir).join(file_name)
    }
}
