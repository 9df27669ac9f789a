//! Stride computation and coordinate/offset conversion.
//!
//! Strides are measured in elements, not bytes, and are signed so that a
//! layout can be described the same way an external array library does.
//!
//! ```text
//! shape [3, 4]
//!
//! row-major (C)       column-major (F)
//! strides [4, 1]      strides [1, 3]
//!
//!  0  1  2  3          0  3  6  9
//!  4  5  6  7          1  4  7 10
//!  8  9 10 11          2  5  8 11
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Memory layout convention: which axis varies fastest in linear order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageOrder {
    /// C order: the last axis varies fastest
    #[default]
    RowMajor,
    /// Fortran order: the first axis varies fastest
    ColumnMajor,
}

impl StorageOrder {
    /// Build from a row-major flag
    #[inline]
    pub fn from_row_major(row_major: bool) -> Self {
        if row_major {
            StorageOrder::RowMajor
        } else {
            StorageOrder::ColumnMajor
        }
    }

    /// Is this C order?
    #[inline]
    pub fn is_row_major(self) -> bool {
        self == StorageOrder::RowMajor
    }
}

/// Validate a shape and return its element count.
///
/// A shape needs at least one axis and every axis must be non-empty.
pub fn validate_shape(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Err(Error::InvalidShape(
            "shape must have at least one dimension".to_string(),
        ));
    }

    let mut size: usize = 1;
    for (axis, &extent) in shape.iter().enumerate() {
        if extent == 0 {
            return Err(Error::InvalidShape(format!(
                "dimension {axis} has non-positive size {extent}"
            )));
        }
        size = size.checked_mul(extent).ok_or_else(|| {
            Error::InvalidShape(format!("element count of shape {shape:?} overflows"))
        })?;
    }
    Ok(size)
}

/// Row-major strides: the last axis has stride 1 and
/// `stride[i] = shape[i + 1] * stride[i + 1]`.
pub fn compute_c_strides(shape: &[usize]) -> Result<Vec<isize>> {
    validate_shape(shape)?;

    let mut strides = vec![1isize; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    Ok(strides)
}

/// Column-major strides: the first axis has stride 1 and
/// `stride[i] = shape[i - 1] * stride[i - 1]`.
pub fn compute_f_strides(shape: &[usize]) -> Result<Vec<isize>> {
    validate_shape(shape)?;

    let mut strides = vec![1isize; shape.len()];
    for i in 1..shape.len() {
        strides[i] = strides[i - 1] * shape[i - 1] as isize;
    }
    Ok(strides)
}

/// Strides for the given storage order.
pub fn compute_strides(shape: &[usize], order: StorageOrder) -> Result<Vec<isize>> {
    match order {
        StorageOrder::RowMajor => compute_c_strides(shape),
        StorageOrder::ColumnMajor => compute_f_strides(shape),
    }
}

/// Flat offset `Σ coords[d] * strides[d]`.
///
/// No bounds checking: callers validate `coords` against the shape first.
#[inline]
pub fn coords_to_index(strides: &[isize], coords: &[usize]) -> isize {
    strides
        .iter()
        .zip(coords)
        .map(|(&stride, &c)| stride * c as isize)
        .sum()
}

/// Inverse of [`coords_to_index`] for a contiguous layout of `shape`.
///
/// `index` must be below the element count of `shape`.
pub fn index_to_coords(shape: &[usize], index: usize, order: StorageOrder) -> Vec<usize> {
    let mut coords = vec![0; shape.len()];
    let mut rest = index;
    match order {
        StorageOrder::RowMajor => {
            for axis in (0..shape.len()).rev() {
                coords[axis] = rest % shape[axis];
                rest /= shape[axis];
            }
        }
        StorageOrder::ColumnMajor => {
            for axis in 0..shape.len() {
                coords[axis] = rest % shape[axis];
                rest /= shape[axis];
            }
        }
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_c_strides() {
        assert_eq!(compute_c_strides(&[3, 4]).unwrap(), vec![4, 1]);
        assert_eq!(compute_c_strides(&[2, 3, 4]).unwrap(), vec![12, 4, 1]);
        assert_eq!(compute_c_strides(&[7]).unwrap(), vec![1]);
    }

    #[test]
    fn test_f_strides() {
        assert_eq!(compute_f_strides(&[3, 4]).unwrap(), vec![1, 3]);
        assert_eq!(compute_f_strides(&[2, 3, 4]).unwrap(), vec![1, 2, 6]);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            compute_c_strides(&[3, 0]),
            Err(Error::InvalidShape(_))
        ));
        assert!(matches!(compute_f_strides(&[]), Err(Error::InvalidShape(_))));
        assert!(matches!(
            validate_shape(&[usize::MAX, 2]),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn test_coords_index_5d() {
        let shape = [2, 3, 4, 5, 6];
        let coords = [1, 2, 2, 3, 3];
        let strides = compute_c_strides(&shape).unwrap();

        let index = coords_to_index(&strides, &coords);
        assert_eq!(index, 360 + 2 * 120 + 2 * 30 + 3 * 6 + 3);
        assert_eq!(
            index_to_coords(&shape, index as usize, StorageOrder::RowMajor),
            coords
        );
    }

    #[test]
    fn test_index_to_coords_column_major() {
        assert_eq!(
            index_to_coords(&[3, 4], 4, StorageOrder::ColumnMajor),
            vec![1, 1]
        );
        assert_eq!(
            index_to_coords(&[3, 4], 4, StorageOrder::RowMajor),
            vec![1, 0]
        );
    }

    fn shapes() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..6, 1..5)
    }

    proptest! {
        #[test]
        fn c_strides_enumerate_every_offset_once(shape in shapes()) {
            let strides = compute_c_strides(&shape).unwrap();
            let size: usize = shape.iter().product();
            let mut seen = vec![false; size];

            for i in 0..size {
                let coords = index_to_coords(&shape, i, StorageOrder::RowMajor);
                let offset = coords_to_index(&strides, &coords);
                prop_assert_eq!(offset, i as isize);
                prop_assert!(!seen[offset as usize]);
                seen[offset as usize] = true;
            }
            prop_assert!(seen.into_iter().all(|s| s));
        }

        #[test]
        fn f_strides_enumerate_every_offset_once(shape in shapes()) {
            let strides = compute_f_strides(&shape).unwrap();
            let size: usize = shape.iter().product();
            let mut seen = vec![false; size];

            for i in 0..size {
                let coords = index_to_coords(&shape, i, StorageOrder::ColumnMajor);
                let offset = coords_to_index(&strides, &coords);
                prop_assert_eq!(offset, i as isize);
                prop_assert!(!seen[offset as usize]);
                seen[offset as usize] = true;
            }
            prop_assert!(seen.into_iter().all(|s| s));
        }
    }
}
