//! Test utilities for Kshetra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use kshetra::{GridIndex, GridMapInfo, StorageOrder, Tensor};

/// Install a logger once; repeated calls are harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 11x11 grid over the unit square.
pub fn unit_grid() -> GridMapInfo<2> {
    GridMapInfo::new([11, 11], [0.0, 0.0], [1.0, 1.0]).unwrap()
}

/// Shared 2D grid over `[min, max]^2` with `n` cells per axis.
pub fn square_grid(n: usize, min: f64, max: f64) -> Arc<GridMapInfo<2>> {
    Arc::new(GridMapInfo::new([n, n], [min, min], [max, max]).unwrap())
}

/// Tensor whose value encodes its own multi-index in base 10.
pub fn index_tensor(shape: &[usize], order: StorageOrder) -> Tensor<'static, i32> {
    Tensor::from_fn(shape, order, |c| c.iter().fold(0, |acc, &i| acc * 10 + i as i32)).unwrap()
}

/// Assert consecutive cells differ by one step on exactly one axis.
pub fn assert_face_adjacent<const D: usize>(cells: &[GridIndex<D>]) {
    for pair in cells.windows(2) {
        let diff: usize = (0..D).map(|i| pair[0][i].abs_diff(pair[1][i])).sum();
        assert_eq!(diff, 1, "{:?} -> {:?}", pair[0], pair[1]);
    }
}

/// Assert no cell appears twice.
pub fn assert_unique<const D: usize>(cells: &[GridIndex<D>]) {
    let mut sorted = cells.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), cells.len(), "duplicate cells in {cells:?}");
}
