//! A grid map: metric geometry plus one value per cell.

use std::sync::Arc;

use crate::core::{StorageOrder, coords_to_index, index_to_coords};
use crate::error::{Error, Result};
use crate::tensor::{Element, Tensor};

use super::info::{GridIndex, GridMapInfo, MetricPoint};
use super::raycaster::GridRayCaster;

/// Per-cell values of type `T` over a shared [`GridMapInfo`].
///
/// The backing tensor's shape always equals `info.shape()`.
#[derive(Debug)]
pub struct GridMap<T: Element, const D: usize> {
    info: Arc<GridMapInfo<D>>,
    data: Tensor<'static, T>,
}

impl<T: Element, const D: usize> GridMap<T, D> {
    /// Map with every cell set to `T::default()`.
    pub fn new(info: Arc<GridMapInfo<D>>, order: StorageOrder) -> Result<Self> {
        Self::filled(info, T::default(), order)
    }

    /// Map with every cell set to `value`.
    pub fn filled(info: Arc<GridMapInfo<D>>, value: T, order: StorageOrder) -> Result<Self> {
        let data = Tensor::filled(info.shape(), value, order)?;
        Ok(Self { info, data })
    }

    /// Wrap an existing tensor; its shape must match the grid.
    pub fn from_tensor(info: Arc<GridMapInfo<D>>, data: Tensor<'static, T>) -> Result<Self> {
        if data.shape() != info.shape() {
            return Err(Error::InvalidShape(format!(
                "tensor shape {:?} does not match grid shape {:?}",
                data.shape(),
                info.shape()
            )));
        }
        Ok(Self { info, data })
    }

    /// Initialize each cell from its index and metric center.
    pub fn from_fn<F>(info: Arc<GridMapInfo<D>>, order: StorageOrder, mut f: F) -> Result<Self>
    where
        F: FnMut(&GridIndex<D>, &MetricPoint<D>) -> T,
    {
        let data = Tensor::from_fn(info.shape(), order, |coords| {
            let index: GridIndex<D> = std::array::from_fn(|i| coords[i]);
            f(&index, &info.grid_to_meter(&index))
        })?;
        Ok(Self { info, data })
    }

    /// Shared geometry
    #[inline]
    pub fn info(&self) -> &Arc<GridMapInfo<D>> {
        &self.info
    }

    /// Backing tensor
    #[inline]
    pub fn data(&self) -> &Tensor<'static, T> {
        &self.data
    }

    /// Mutable backing tensor
    #[inline]
    pub fn data_mut(&mut self) -> &mut Tensor<'static, T> {
        &mut self.data
    }

    /// Value of a cell.
    pub fn get(&self, index: &GridIndex<D>) -> Result<T> {
        self.data.get(index)
    }

    /// Mutable value of a cell.
    pub fn get_mut(&mut self, index: &GridIndex<D>) -> Result<&mut T> {
        self.data.get_mut(index)
    }

    /// Store `value` in a cell.
    pub fn set(&mut self, index: &GridIndex<D>, value: T) -> Result<()> {
        self.data.set(index, value)
    }

    /// Value of the cell containing `point` (clamped).
    pub fn get_at_meter(&self, point: &MetricPoint<D>) -> Result<T> {
        let index = self.info.meter_to_grid(point)?;
        self.data.get(&index)
    }

    /// Mutable value of the cell containing `point` (clamped).
    pub fn get_at_meter_mut(&mut self, point: &MetricPoint<D>) -> Result<&mut T> {
        let index = self.info.meter_to_grid(point)?;
        self.data.get_mut(&index)
    }

    /// Snap a point to the center of its cell.
    pub fn canonical_metric_coords(&self, point: &MetricPoint<D>) -> Result<MetricPoint<D>> {
        self.info.canonical_metric_coords(point)
    }

    /// `(grid_index, metric_center, &value)` for every cell, in C order.
    pub fn cells(&self) -> Cells<'_, T, D> {
        Cells {
            map: self,
            next: 0,
        }
    }

    /// Apply `f` to every cell along the segment, returning the cell count.
    ///
    /// The ray is validated before any cell is touched.
    pub fn update_along_ray<F>(
        &mut self,
        start: &MetricPoint<D>,
        end: &MetricPoint<D>,
        mut f: F,
    ) -> Result<usize>
    where
        F: FnMut(&GridIndex<D>, &mut T),
    {
        let ray = GridRayCaster::new(&self.info, start, end)?;
        let mut count = 0;
        for index in ray {
            f(&index, self.data.get_mut(&index)?);
            count += 1;
        }
        Ok(count)
    }
}

/// Iterator over the cells of a [`GridMap`].
pub struct Cells<'a, T: Element, const D: usize> {
    map: &'a GridMap<T, D>,
    next: usize,
}

impl<'a, T: Element, const D: usize> Iterator for Cells<'a, T, D> {
    type Item = (GridIndex<D>, MetricPoint<D>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let info = &self.map.info;
        if self.next >= info.size() {
            return None;
        }
        let coords = index_to_coords(info.shape(), self.next, StorageOrder::RowMajor);
        let index: GridIndex<D> = std::array::from_fn(|i| coords[i]);
        self.next += 1;

        let offset = coords_to_index(self.map.data.strides(), &index) as usize;
        let value = &self.map.data.as_slice()[offset];
        Some((index, info.grid_to_meter(&index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.map.info.size() - self.next;
        (n, Some(n))
    }
}

impl<T: Element, const D: usize> ExactSizeIterator for Cells<'_, T, D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn info() -> Arc<GridMapInfo<2>> {
        Arc::new(GridMapInfo::new([4, 3], [0.0, 0.0], [2.0, 1.5]).unwrap())
    }

    #[test]
    fn test_metric_access() {
        let mut map = GridMap::<f32, 2>::new(info(), StorageOrder::RowMajor).unwrap();
        *map.get_at_meter_mut(&[1.2, 0.9]).unwrap() = 3.0;

        assert_eq!(map.get(&[2, 1]).unwrap(), 3.0);
        assert_eq!(map.get_at_meter(&[1.4, 0.6]).unwrap(), 3.0);
        // Clamped to the corner cell
        map.set(&[3, 2], 9.0).unwrap();
        assert_eq!(map.get_at_meter(&[50.0, 50.0]).unwrap(), 9.0);
    }

    #[test]
    fn test_from_fn_and_cells() {
        let map = GridMap::from_fn(info(), StorageOrder::ColumnMajor, |g, _| (g[0] * 10 + g[1]) as u32)
            .unwrap();

        let cells: Vec<_> = map.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0].0, [0, 0]);
        assert_eq!(cells[1].0, [0, 1]);
        assert_eq!(*cells[1].2, 1);
        assert_eq!(*cells[11].2, 32);
        assert_relative_eq!(cells[11].1[0], 1.75);
        assert_relative_eq!(cells[11].1[1], 1.25);
    }

    #[test]
    fn test_cells_cover_every_value() {
        for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
            let map = GridMap::from_fn(info(), order, |g, _| (g[0] * 10 + g[1]) as u32).unwrap();
            let cells = map.cells();
            assert_eq!(cells.len(), 12);

            let mut count = 0;
            for (index, center, &value) in cells {
                assert_eq!(value, map.get(&index).unwrap());
                assert_eq!(map.info().meter_to_grid(&center).unwrap(), index);
                count += 1;
            }
            assert_eq!(count, 12);
        }
    }

    #[test]
    fn test_from_tensor_shape_mismatch() {
        let tensor = Tensor::<u8>::new(&[3, 4], StorageOrder::RowMajor).unwrap();
        assert!(matches!(
            GridMap::from_tensor(info(), tensor),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn test_update_along_ray() {
        let mut map = GridMap::<i32, 2>::new(info(), StorageOrder::RowMajor).unwrap();
        let visited = map
            .update_along_ray(&[0.1, 0.25], &[1.9, 0.25], |_, v| *v += 1)
            .unwrap();

        assert_eq!(visited, 4);
        assert!((0..4).all(|x| map.get(&[x, 0]).unwrap() == 1));
        assert_eq!(map.get(&[0, 1]).unwrap(), 0);

        assert!(
            map.update_along_ray(&[f64::NAN, 0.0], &[1.0, 1.0], |_, v| *v = -1)
                .is_err()
        );
        assert!(map.data().as_slice().iter().all(|&v| v >= 0));
    }
}
