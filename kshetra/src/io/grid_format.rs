//! Binary dump of grid maps (geometry + cell values).
//!
//! Format (all little-endian):
//! - Magic: "KSGM" (4 bytes)
//! - Version: u32 (4 bytes)
//! - Dimensions: u32 (4 bytes)
//! - Element type tag: u8 (1 byte)
//! - Per axis: shape i64, min f64, max f64 (24 bytes each)
//! - Cell values in column-major order

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use super::tensor_format::{read_i64, read_raw, truncated};
use crate::core::StorageOrder;
use crate::error::{Error, Result};
use crate::grid::{GridMap, GridMapInfo};
use crate::tensor::{DType, Element, Tensor};

/// Magic bytes for grid map dumps
const MAGIC: &[u8; 4] = b"KSGM";

/// Current format version
const VERSION: u32 = 1;

/// Save a grid map to a file
pub fn save_grid_map<T: Element, const D: usize>(map: &GridMap<T, D>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_grid_map(map, &mut writer)?;
    writer.flush()?;

    debug!(
        "[GridMapIo] Saved {}D grid map {:?} to {}",
        D,
        map.info().shape(),
        path.display()
    );
    Ok(())
}

/// Write a grid map to a writer
pub fn write_grid_map<T: Element, const D: usize, W: Write>(
    map: &GridMap<T, D>,
    writer: &mut W,
) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(D as u32).to_le_bytes())?;
    writer.write_all(&[T::DTYPE.tag()])?;

    let info = map.info();
    for axis in 0..D {
        writer.write_all(&(info.shape_at(axis) as i64).to_le_bytes())?;
        writer.write_all(&info.min_at(axis).to_le_bytes())?;
        writer.write_all(&info.max_at(axis).to_le_bytes())?;
    }

    for value in map.data().to_column_major_vec() {
        value.write_le(writer)?;
    }
    Ok(())
}

/// Load a grid map from a file
pub fn load_grid_map<T: Element, const D: usize>(
    path: &Path,
    order: StorageOrder,
) -> Result<GridMap<T, D>> {
    let mut reader = BufReader::new(File::open(path)?);
    let map = read_grid_map(&mut reader, order)?;

    debug!(
        "[GridMapIo] Loaded {}D grid map {:?} from {}",
        D,
        map.info().shape(),
        path.display()
    );
    Ok(map)
}

/// Read a grid map from a reader; cell values are stored in `order`.
pub fn read_grid_map<T: Element, const D: usize, R: Read>(
    reader: &mut R,
    order: StorageOrder,
) -> Result<GridMap<T, D>> {
    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|e| truncated(e, "magic"))?;
    if &magic != MAGIC {
        return Err(Error::InvalidFormat("Invalid magic bytes".to_string()));
    }

    let version = read_u32(reader, "version")?;
    if version != VERSION {
        return Err(Error::InvalidFormat(format!(
            "Version mismatch: expected {VERSION}, found {version}"
        )));
    }

    let dims = read_u32(reader, "dimensions")? as usize;
    if dims != D {
        return Err(Error::InvalidFormat(format!(
            "dump holds a {dims}D grid, expected {D}D"
        )));
    }

    let mut tag = [0u8; 1];
    reader
        .read_exact(&mut tag)
        .map_err(|e| truncated(e, "element type"))?;
    let dtype = DType::from_tag(tag[0])
        .ok_or_else(|| Error::InvalidFormat(format!("unknown element type tag {}", tag[0])))?;
    if dtype != T::DTYPE {
        return Err(Error::DTypeMismatch {
            expected: T::DTYPE,
            found: dtype,
        });
    }

    let mut shape = [0usize; D];
    let mut min = [0.0; D];
    let mut max = [0.0; D];
    for axis in 0..D {
        let extent = read_i64(reader, "shape")?;
        if extent <= 0 {
            return Err(Error::InvalidFormat(format!(
                "axis {axis} has non-positive size {extent}"
            )));
        }
        shape[axis] = extent as usize;
        min[axis] = read_f64(reader, "min")?;
        max[axis] = read_f64(reader, "max")?;
    }

    let info = Arc::new(GridMapInfo::new(shape, min, max)?);
    let data = read_raw::<T, R>(reader, info.size())?;
    let tensor = Tensor::from_column_major(info.shape(), &data, order)?;
    GridMap::from_tensor(info, tensor)
}

fn read_u32<R: Read>(reader: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R, what: &str) -> Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(f64::from_le_bytes(buf))
}
