//! Metric grid maps: geometry, exact ray traversal and per-cell storage.
//!
//! ## Architecture
//!
//! ```text
//!   metric point (f64 x D)
//!          │  meter_to_grid (clamped)
//!          ▼
//! ┌─────────────────┐   start/end    ┌─────────────────┐
//! │  GridMapInfo<D> │ ─────────────► │  GridRayCaster  │ ──► cells in order
//! │ shape, min, max │                └─────────────────┘
//! │   resolution    │                         │
//! └────────┬────────┘                         ▼
//!          │ Arc                     ┌─────────────────┐
//!          └───────────────────────► │   GridMap<T,D>  │
//!                                    │ Tensor<'static> │
//!                                    └─────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`GridMapInfo`]: metric ↔ grid conversion, enumeration, pixels, polygons
//! - [`GridRayCaster`]: iterator over the cells a segment crosses
//! - [`GridMap`]: a [`Tensor`](crate::tensor::Tensor) of cell values sharing a `GridMapInfo`
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kshetra::core::StorageOrder;
//! use kshetra::grid::{GridMap, GridMapInfo};
//!
//! let info = Arc::new(GridMapInfo::new([11, 11], [0.0, 0.0], [1.0, 1.0]).unwrap());
//! let mut hits = GridMap::<u32, 2>::new(info, StorageOrder::RowMajor).unwrap();
//!
//! let n = hits.update_along_ray(&[0.1, 0.2], &[0.9, 0.7], |_, v| *v += 1).unwrap();
//! assert_eq!(n, 14);
//! assert_eq!(hits.get_at_meter(&[0.9, 0.7]).unwrap(), 1);
//! ```

mod info;
mod map;
pub mod raycaster;

pub use info::{GridIndex, GridMapInfo, GridMapInfo2D, GridMapInfo3D, MetricPoint};
pub use map::{Cells, GridMap};
pub use raycaster::{GridRayCaster, cells_along_ray, cells_along_ray_excluding_end};
