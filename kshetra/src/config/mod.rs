//! Configuration loading for Kshetra.
//!
//! Loads settings from a single YAML file with sensible defaults; every
//! field may be omitted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kshetra::config::KshetraConfig;
//!
//! // Load from default path (configs/kshetra.yaml), falling back to defaults
//! let config = KshetraConfig::load_default().unwrap();
//! let info = config.grid_map_info::<2>().unwrap();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Grid shape or resolution, metric bounds, padding |
//! | [`TensorSection`] | Storage order of created tensors |
//! | [`PersistenceSection`] | Dump header options and output directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   min: [0.0, 0.0]
//!   max: [1.0, 1.0]
//!   resolution: [0.05, 0.05]   # overrides shape
//!   padding: [2, 2]
//!
//! tensor:
//!   order: row_major           # or column_major
//!
//! persistence:
//!   write_element_count: false
//!   output_dir: ./output
//! ```

mod defaults;
mod grid;
mod kshetra;
mod persistence;
mod tensor;

pub use grid::GridSection;
pub use kshetra::KshetraConfig;
pub use persistence::PersistenceSection;
pub use tensor::TensorSection;
