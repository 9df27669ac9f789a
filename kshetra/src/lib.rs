//! # Kshetra
//!
//! Strided N-dimensional tensors and metric grid maps with exact cell traversal.
//!
//! ## Overview
//!
//! Kshetra provides two primitives for spatial data:
//!
//! - **Tensor** - a contiguous buffer seen through a fixed strided layout,
//!   reachable by multi-index, linear index, zero-copy cross-sections and an
//!   external array-interface descriptor
//! - **GridMapInfo** - the mapping between a continuous metric box and a
//!   discrete N-dimensional grid, with exact ray traversal between two points
//!
//! A [`GridMap`] ties the two together: one tensor value per grid cell.
//!
//! ## Features
//!
//! - **Row- and column-major layouts**: strides fixed by shape and order
//! - **Zero-copy aliasing**: borrow-checked tensors over caller buffers
//! - **Exact ray casting**: every crossed cell, face-adjacent, deterministic at corners
//! - **Persistence**: column-major little-endian dumps of tensors and grid maps
//!
//! ## Quick Start
//!
//! ```rust
//! use kshetra::{GridMapInfo, StorageOrder, Tensor};
//!
//! // 3x4 tensor, linear index follows the storage order
//! let mut t = Tensor::filled(&[3, 4], 0.0f64, StorageOrder::RowMajor).unwrap();
//! t[3] = 1.0;
//! assert_eq!(t.get(&[0, 3]).unwrap(), 1.0);
//!
//! // 11x11 grid over the unit square
//! let info = GridMapInfo::new([11, 11], [0.0, 0.0], [1.0, 1.0]).unwrap();
//! let cells = info.ray_casting(&[0.1, 0.2], &[0.9, 0.7]).unwrap();
//! assert_eq!(cells.first(), Some(&[1, 2]));
//! assert_eq!(cells.last(), Some(&[9, 7]));
//! ```
//!
//! ## Coordinate System
//!
//! - Grid index `g` along axis `i` has its metric center at
//!   `min[i] + (g + 0.5) * resolution[i]`
//! - Metric points outside `[min, max]` clamp to the nearest edge cell
//! - 2D pixels use the image convention `(u, v) = (x, height - 1 - y)`
//!
//! ## Concurrency
//!
//! Nothing here locks. [`GridMapInfo`] is immutable and can be shared across
//! threads (typically in an `Arc`). Tensors follow the borrow rules; memory
//! handed out through an [`ExternalView`] is the caller's to synchronize.

#![warn(missing_docs)]

// Strides and layouts
pub mod core;

// Tensors, views and scalar types
pub mod tensor;

// Grid geometry, ray casting and grid maps
pub mod grid;

// Persistence (save/load)
pub mod io;

// Unified configuration
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types
pub use crate::core::{Layout, StorageOrder, compute_c_strides, compute_f_strides};
pub use config::KshetraConfig;
pub use error::{Error, Result};
pub use grid::{
    GridIndex, GridMap, GridMapInfo, GridMapInfo2D, GridMapInfo3D, GridRayCaster, MetricPoint,
};
pub use tensor::{DType, Element, ExternalView, Tensor, TensorView, TensorViewMut};
