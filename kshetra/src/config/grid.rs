//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridMapInfo;

use super::defaults;

/// Grid geometry section
///
/// Either `shape` with `min`/`max`, or `resolution` (plus optional
/// `padding`) with `min`/`max`. When `resolution` is set, `shape` is derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cells per axis
    #[serde(default = "defaults::grid_shape")]
    pub shape: Vec<usize>,

    /// Lower metric bound per axis (meters)
    #[serde(default = "defaults::grid_min")]
    pub min: Vec<f64>,

    /// Upper metric bound per axis (meters)
    #[serde(default = "defaults::grid_max")]
    pub max: Vec<f64>,

    /// Cell size per axis (meters); overrides `shape` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Vec<f64>>,

    /// Extra cells on each side per axis, with `resolution`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Vec<usize>>,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            shape: defaults::grid_shape(),
            min: defaults::grid_min(),
            max: defaults::grid_max(),
            resolution: None,
            padding: None,
        }
    }
}

impl GridSection {
    /// Build a `D`-dimensional [`GridMapInfo`] from this section.
    pub fn to_grid_map_info<const D: usize>(&self) -> Result<GridMapInfo<D>> {
        let min = to_array::<f64, D>(&self.min, "min")?;
        let max = to_array::<f64, D>(&self.max, "max")?;

        match &self.resolution {
            Some(resolution) => {
                let resolution = to_array::<f64, D>(resolution, "resolution")?;
                let padding = match &self.padding {
                    Some(padding) => to_array::<usize, D>(padding, "padding")?,
                    None => [0; D],
                };
                GridMapInfo::from_resolution(min, max, resolution, padding)
            }
            None => {
                let shape = to_array::<usize, D>(&self.shape, "shape")?;
                GridMapInfo::new(shape, min, max)
            }
        }
    }
}

fn to_array<T: Copy + Default, const D: usize>(values: &[T], field: &str) -> Result<[T; D]> {
    if values.len() != D {
        return Err(Error::Config(format!(
            "grid.{field} has {} entries, expected {D}",
            values.len()
        )));
    }
    let mut out = [T::default(); D];
    out.copy_from_slice(values);
    Ok(out)
}
