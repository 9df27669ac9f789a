//! Main KshetraConfig and conversion methods.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::GridMapInfo;

use super::grid::GridSection;
use super::persistence::PersistenceSection;
use super::tensor::TensorSection;

/// Default config file, relative to the working directory
const DEFAULT_PATH: &str = "configs/kshetra.yaml";

/// Full Kshetra configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KshetraConfig {
    /// Grid geometry
    #[serde(default)]
    pub grid: GridSection,

    /// Tensor layout
    #[serde(default)]
    pub tensor: TensorSection,

    /// Persistence settings
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl KshetraConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/kshetra.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            debug!("[Config] {DEFAULT_PATH} not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Grid geometry as a `D`-dimensional [`GridMapInfo`]
    pub fn grid_map_info<const D: usize>(&self) -> Result<GridMapInfo<D>> {
        self.grid.to_grid_map_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StorageOrder;
    use crate::error::Error;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = KshetraConfig::default();
        assert_eq!(config.grid.shape, vec![11, 11]);
        assert_eq!(config.tensor.order, StorageOrder::RowMajor);
        assert!(!config.persistence.write_element_count);

        let info = config.grid_map_info::<2>().unwrap();
        assert_relative_eq!(info.resolution_at(0), 1.0 / 11.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = KshetraConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = KshetraConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "
grid:
  min: [-2.0, -2.0, 0.0]
  max: [2.0, 2.0, 1.0]
  resolution: [0.5, 0.5, 0.25]
  padding: [1, 1, 0]
tensor:
  order: column_major
";
        let config = KshetraConfig::from_yaml(yaml).unwrap();
        assert!(!config.tensor.is_row_major());
        assert_eq!(config.persistence.output_dir, "./output");

        let info = config.grid_map_info::<3>().unwrap();
        assert_eq!(info.shape(), &[10, 10, 4]);
        assert_relative_eq!(info.min_at(0), -2.5);
    }

    #[test]
    fn test_dimension_mismatch() {
        let config = KshetraConfig::default();
        assert!(matches!(
            config.grid_map_info::<3>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            KshetraConfig::from_yaml("grid: [not, a, map]"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kshetra.yaml");
        std::fs::write(&path, "persistence:\n  write_element_count: true\n").unwrap();

        let config = KshetraConfig::load(&path).unwrap();
        assert!(config.persistence.write_element_count);
        assert_eq!(config.grid, GridSection::default());
        assert!(config.persistence.output_path("a.bin").ends_with("output/a.bin"));
    }
}
