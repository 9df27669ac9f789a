//! Strided N-dimensional tensors over owned or borrowed buffers.
//!
//! A [`Tensor`] pairs a contiguous buffer with a [`Layout`](crate::core::Layout)
//! whose strides are fixed by the shape and the storage order. The same
//! elements can be reached three ways without copying:
//!
//! ```text
//!   multi-index (i, j)  ──┐
//!                         ├──►  offset = i * strides[0] + j * strides[1]  ──►  buffer
//!   linear index k     ───┘          (linear index == buffer offset)
//!
//!   slice / subtensor  ──►  TensorView { parent buffer, subset of strides, base offset }
//!   as_external_view   ──►  ExternalView { ptr, shape, strides, dtype, order }
//! ```
//!
//! ## Key Components
//!
//! - [`Tensor`]: owned (`Tensor<'static, T>`) or aliasing (`Tensor<'a, T>`) array
//! - [`TensorView`] / [`TensorViewMut`]: cross-sections sharing the parent buffer
//! - [`ExternalView`]: pointer/shape/strides/dtype descriptor for array-interface interop
//! - [`Element`] / [`DType`]: the fixed scalar type of a tensor
//!
//! ## Example
//!
//! ```rust
//! use kshetra::core::StorageOrder;
//! use kshetra::tensor::Tensor;
//!
//! let mut t = Tensor::filled(&[3, 4], 0.0f64, StorageOrder::RowMajor).unwrap();
//! t.set(&[0, 3], 2.5).unwrap();
//! assert_eq!(t[3], 2.5);
//!
//! let mut column = t.slice_mut(&[1], &[2]).unwrap();
//! column.fill(1.0);
//! assert_eq!(t.get(&[2, 2]).unwrap(), 1.0);
//! ```

mod base;
mod element;
mod external;
mod view;

pub use base::Tensor;
pub use element::{DType, Element};
pub use external::ExternalView;
pub use view::{TensorView, TensorViewMut};
