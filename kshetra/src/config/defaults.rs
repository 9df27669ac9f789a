//! Default value functions for serde deserialization.

use crate::core::StorageOrder;

pub fn grid_shape() -> Vec<usize> {
    vec![11, 11]
}

pub fn grid_min() -> Vec<f64> {
    vec![0.0, 0.0]
}

pub fn grid_max() -> Vec<f64> {
    vec![1.0, 1.0]
}

pub fn storage_order() -> StorageOrder {
    StorageOrder::RowMajor
}

pub fn output_dir() -> String {
    "./output".to_string()
}
