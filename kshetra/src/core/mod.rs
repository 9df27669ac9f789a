//! Core layout primitives shared by tensors and grid maps.
//!
//! ## Type Categories
//!
//! ### Stride calculation
//! - [`compute_c_strides`] / [`compute_f_strides`]: element strides for a shape
//! - [`coords_to_index`] / [`index_to_coords`]: multi-index ↔ flat offset
//! - [`StorageOrder`]: row-major (C) or column-major (Fortran) majorness
//!
//! ### Layouts
//! - [`Layout`]: shape, strides and base offset of a strided buffer view
//!
//! ## Example
//!
//! ```rust
//! use kshetra::core::{Layout, StorageOrder, compute_c_strides};
//!
//! assert_eq!(compute_c_strides(&[3, 4]).unwrap(), vec![4, 1]);
//!
//! let layout = Layout::contiguous(&[3, 4], StorageOrder::RowMajor).unwrap();
//! let column = layout.slice(&[1], &[2]).unwrap();
//! assert_eq!(column.offsets().collect::<Vec<_>>(), vec![2, 6, 10]);
//! ```

mod layout;
mod stride;

pub use layout::{Layout, Offsets};
pub use stride::{
    StorageOrder, compute_c_strides, compute_f_strides, compute_strides, coords_to_index,
    index_to_coords, validate_shape,
};
