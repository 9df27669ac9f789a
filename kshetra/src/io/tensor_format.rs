//! Column-major binary dump of tensors.
//!
//! Format (all little-endian):
//! - Element count: i64 (optional, 8 bytes)
//! - Shape: `dims` x i64
//! - Elements: `product(shape)` values in column-major (Fortran) order
//!
//! The on-disk order is column-major whatever the tensor's own majorness;
//! the reader lays the values out in whichever order the caller asks for.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::core::{StorageOrder, validate_shape};
use crate::error::{Error, Result};
use crate::tensor::{Element, Tensor};

/// Upper bound on elements reserved up front; the count comes from the file
const MAX_PREALLOC: usize = 64 * 1024;

/// Save a tensor to a file
pub fn save_tensor<T: Element>(tensor: &Tensor<'_, T>, path: &Path, with_count: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_tensor(tensor, &mut writer, with_count)?;
    writer.flush()?;

    debug!(
        "[TensorIo] Saved {} to {}",
        tensor,
        path.display()
    );
    Ok(())
}

/// Write a tensor to a writer
pub fn write_tensor<T: Element, W: Write>(
    tensor: &Tensor<'_, T>,
    writer: &mut W,
    with_count: bool,
) -> Result<()> {
    if with_count {
        writer.write_all(&(tensor.size() as i64).to_le_bytes())?;
    }
    for &extent in tensor.shape() {
        writer.write_all(&(extent as i64).to_le_bytes())?;
    }

    if tensor.is_row_major() {
        for value in tensor.to_column_major_vec() {
            value.write_le(writer)?;
        }
    } else {
        for value in tensor.as_slice() {
            value.write_le(writer)?;
        }
    }
    Ok(())
}

/// Load a tensor from a file
pub fn load_tensor<T: Element>(
    path: &Path,
    dims: usize,
    with_count: bool,
    order: StorageOrder,
) -> Result<Tensor<'static, T>> {
    let mut reader = BufReader::new(File::open(path)?);
    let tensor = read_tensor(&mut reader, dims, with_count, order)?;

    debug!("[TensorIo] Loaded {} from {}", tensor, path.display());
    Ok(tensor)
}

/// Read a `dims`-dimensional tensor from a reader, stored in `order`.
pub fn read_tensor<T: Element, R: Read>(
    reader: &mut R,
    dims: usize,
    with_count: bool,
    order: StorageOrder,
) -> Result<Tensor<'static, T>> {
    let count = if with_count {
        Some(read_i64(reader, "element count")?)
    } else {
        None
    };

    let mut shape = Vec::with_capacity(dims);
    for axis in 0..dims {
        let extent = read_i64(reader, "shape")?;
        if extent <= 0 {
            return Err(Error::InvalidFormat(format!(
                "axis {axis} has non-positive size {extent}"
            )));
        }
        shape.push(extent as usize);
    }
    let size = validate_shape(&shape).map_err(|e| Error::InvalidFormat(e.to_string()))?;

    if let Some(count) = count
        && count != size as i64
    {
        return Err(Error::InvalidFormat(format!(
            "element count {count} does not match shape {shape:?}"
        )));
    }

    let data = read_raw::<T, R>(reader, size)?;
    Tensor::from_column_major(&shape, &data, order)
}

/// Write a flat buffer of elements, no header.
pub fn write_raw<T: Element, W: Write>(data: &[T], writer: &mut W) -> Result<()> {
    for value in data {
        value.write_le(writer)?;
    }
    Ok(())
}

/// Read `count` elements of a flat buffer, no header.
pub fn read_raw<T: Element, R: Read>(reader: &mut R, count: usize) -> Result<Vec<T>> {
    let mut data = Vec::with_capacity(count.min(MAX_PREALLOC));
    for i in 0..count {
        let value = T::read_le(reader).map_err(|e| truncated(e, &format!("element {i} of {count}")))?;
        data.push(value);
    }
    Ok(data)
}

pub(super) fn read_i64<R: Read>(reader: &mut R, what: &str) -> Result<i64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(i64::from_le_bytes(buf))
}

/// Short reads mean a malformed dump; anything else is a real I/O failure.
pub(super) fn truncated(e: std::io::Error, what: &str) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::InvalidFormat(format!("unexpected end of data while reading {what}"))
    } else {
        Error::Io(e)
    }
}
