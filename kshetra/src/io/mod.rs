//! Persistence (save/load) for tensors and grid maps.
//!
//! Two little-endian formats:
//!
//! - **Tensor dump** ([`write_tensor`] / [`read_tensor`]): optional i64
//!   element count, i64 shape, then the values in column-major order. The
//!   reader must know the dimensionality and whether the count is present.
//! - **Grid map dump** ([`write_grid_map`] / [`read_grid_map`]): a
//!   self-describing header with the grid geometry and element type, then
//!   the cell values in column-major order.
//!
//! Each format comes as a `save`/`load` pair on paths and a `write`/`read`
//! pair on any `Write`/`Read`.

mod grid_format;
mod tensor_format;

pub use grid_format::{load_grid_map, read_grid_map, save_grid_map, write_grid_map};
pub use tensor_format::{load_tensor, read_raw, read_tensor, save_tensor, write_raw, write_tensor};
