//! Mapping between a continuous metric box and a discrete N-dimensional grid.
//!
//! Cell `g` along axis `i` covers `[min[i] + g * res[i], min[i] + (g + 1) * res[i])`
//! and its metric coordinate is the cell center:
//!
//! ```text
//!   min                                                   max
//!    │  cell 0  │  cell 1  │  cell 2  │   ...   │ cell n-1 │
//!    ├────●─────┼────●─────┼────●─────┼─────────┼────●─────┤
//!       center = min + (g + 0.5) * res
//!
//!   meter → grid:  g = floor((p - min) / res), clamped to [0, n - 1]
//! ```
//!
//! Metric queries never fail for being outside the box: they clamp to the
//! nearest edge cell, since a point on or just past a boundary is usually
//! floating-point rounding rather than a caller error. Non-finite input fails
//! with [`Error::InvalidCoordinate`].

use log::debug;

use crate::core::{
    StorageOrder, compute_strides, coords_to_index, index_to_coords, validate_shape,
};
use crate::error::{Error, Result};

use super::raycaster::cells_along_ray;

/// Grid cell index, one component per axis.
pub type GridIndex<const D: usize> = [usize; D];

/// Metric point or displacement, one component per axis.
pub type MetricPoint<const D: usize> = [f64; D];

/// Shape, metric bounds and resolution of a `D`-dimensional grid.
///
/// Immutable after construction, so it can be shared freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMapInfo<const D: usize> {
    shape: [usize; D],
    min: [f64; D],
    max: [f64; D],
    resolution: [f64; D],
}

/// 2D grid map info
pub type GridMapInfo2D = GridMapInfo<2>;

/// 3D grid map info
pub type GridMapInfo3D = GridMapInfo<3>;

impl<const D: usize> GridMapInfo<D> {
    /// Create from cell counts and metric bounds.
    ///
    /// Fails with [`Error::InvalidShape`] for a zero-size axis and with
    /// [`Error::InvalidBounds`] unless `min[i] < max[i]` are both finite.
    pub fn new(shape: [usize; D], min: [f64; D], max: [f64; D]) -> Result<Self> {
        if D == 0 {
            return Err(Error::InvalidShape(
                "grid must have at least one dimension".to_string(),
            ));
        }
        for axis in 0..D {
            if shape[axis] == 0 {
                return Err(Error::InvalidShape(format!(
                    "grid axis {axis} has zero cells"
                )));
            }
            if !min[axis].is_finite() || !max[axis].is_finite() || max[axis] <= min[axis] {
                return Err(Error::InvalidBounds(format!(
                    "axis {axis}: min {} must be finite and below max {}",
                    min[axis], max[axis]
                )));
            }
        }
        validate_shape(&shape)?;

        let resolution: [f64; D] =
            std::array::from_fn(|i| (max[i] - min[i]) / shape[i] as f64);

        debug!(
            "[GridMapInfo] shape={:?} min={:?} max={:?} resolution={:?}",
            shape, min, max, resolution
        );

        Ok(Self {
            shape,
            min,
            max,
            resolution,
        })
    }

    /// Create from a metric range, a cell size and a padding in cells.
    ///
    /// The grid covers `[min, max]` plus `padding` cells on each side; the
    /// lower bound moves out by `padding * resolution` and the upper bound is
    /// set so that the cell size is exactly `resolution`.
    pub fn from_resolution(
        min: [f64; D],
        max: [f64; D],
        resolution: [f64; D],
        padding: [usize; D],
    ) -> Result<Self> {
        let mut shape = [0usize; D];
        let mut new_min = [0.0; D];
        let mut new_max = [0.0; D];

        for axis in 0..D {
            let res = resolution[axis];
            if !res.is_finite() || res <= 0.0 {
                return Err(Error::InvalidBounds(format!(
                    "axis {axis}: resolution {res} must be finite and positive"
                )));
            }
            if !min[axis].is_finite() || !max[axis].is_finite() || max[axis] <= min[axis] {
                return Err(Error::InvalidBounds(format!(
                    "axis {axis}: min {} must be finite and below max {}",
                    min[axis], max[axis]
                )));
            }

            let cells = (max[axis] - min[axis]) / res;
            // 1.0 / 0.1 is 10.000000000000002, which should still be 10 cells
            let cells = if (cells - cells.round()).abs() < 1e-9 {
                cells.round()
            } else {
                cells.ceil()
            };
            shape[axis] = (cells as usize).max(1) + 2 * padding[axis];
            new_min[axis] = min[axis] - padding[axis] as f64 * res;
            new_max[axis] = new_min[axis] + shape[axis] as f64 * res;
        }

        Self::new(shape, new_min, new_max)
    }

    // === Basic Properties ===

    /// Number of axes
    #[inline]
    pub fn dims(&self) -> usize {
        D
    }

    /// Cell count of every axis
    #[inline]
    pub fn shape(&self) -> &[usize; D] {
        &self.shape
    }

    /// Cell count along `axis`. Panics if `axis >= D`.
    #[inline]
    pub fn shape_at(&self, axis: usize) -> usize {
        self.shape[axis]
    }

    /// Total number of cells
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Lower metric bound of every axis
    #[inline]
    pub fn min(&self) -> &[f64; D] {
        &self.min
    }

    /// Lower metric bound along `axis`
    #[inline]
    pub fn min_at(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// Upper metric bound of every axis
    #[inline]
    pub fn max(&self) -> &[f64; D] {
        &self.max
    }

    /// Upper metric bound along `axis`
    #[inline]
    pub fn max_at(&self, axis: usize) -> f64 {
        self.max[axis]
    }

    /// Cell size of every axis
    #[inline]
    pub fn resolution(&self) -> &[f64; D] {
        &self.resolution
    }

    /// Cell size along `axis`
    #[inline]
    pub fn resolution_at(&self, axis: usize) -> f64 {
        self.resolution[axis]
    }

    /// Metric midpoint of the box
    pub fn center(&self) -> MetricPoint<D> {
        std::array::from_fn(|i| 0.5 * (self.min[i] + self.max[i]))
    }

    /// Index of the central cell (`shape / 2`)
    pub fn center_grid(&self) -> GridIndex<D> {
        std::array::from_fn(|i| self.shape[i] / 2)
    }

    // === Coordinate Conversion ===

    /// Cell containing `point`, clamped to the grid.
    #[inline]
    pub fn meter_to_grid(&self, point: &MetricPoint<D>) -> Result<GridIndex<D>> {
        let mut index = [0usize; D];
        for axis in 0..D {
            index[axis] = self.meter_to_grid_at_dim(point[axis], axis)?;
        }
        Ok(index)
    }

    /// Center of cell `index`.
    ///
    /// Indices past the grid extrapolate linearly.
    #[inline]
    pub fn grid_to_meter(&self, index: &GridIndex<D>) -> MetricPoint<D> {
        std::array::from_fn(|i| self.grid_to_meter_at_dim(index[i], i))
    }

    /// Cell index along one axis, clamped to `[0, shape[axis] - 1]`.
    #[inline]
    pub fn meter_to_grid_at_dim(&self, value: f64, axis: usize) -> Result<usize> {
        if !value.is_finite() {
            return Err(Error::InvalidCoordinate { axis, value });
        }
        // Cell edges sit at `min + k * res`, the ray caster's boundaries
        let cell = ((value - self.min[axis]) / self.resolution[axis]).floor();
        let last = (self.shape[axis] - 1) as f64;
        Ok(cell.clamp(0.0, last) as usize)
    }

    /// Cell-center coordinate along one axis.
    #[inline]
    pub fn grid_to_meter_at_dim(&self, index: usize, axis: usize) -> f64 {
        self.min[axis] + (index as f64 + 0.5) * self.resolution[axis]
    }

    /// [`meter_to_grid`](Self::meter_to_grid) for each point, order preserved.
    pub fn meter_to_grid_for_points(&self, points: &[MetricPoint<D>]) -> Result<Vec<GridIndex<D>>> {
        points.iter().map(|p| self.meter_to_grid(p)).collect()
    }

    /// [`grid_to_meter`](Self::grid_to_meter) for each index, order preserved.
    pub fn grid_to_meter_for_points(&self, indices: &[GridIndex<D>]) -> Vec<MetricPoint<D>> {
        indices.iter().map(|g| self.grid_to_meter(g)).collect()
    }

    /// Metric displacements to cell displacements: `floor(v / res)`, no
    /// offset and no clamping.
    pub fn meter_to_grid_for_vectors(&self, vectors: &[MetricPoint<D>]) -> Vec<[isize; D]> {
        vectors
            .iter()
            .map(|v| std::array::from_fn(|i| (v[i] / self.resolution[i]).floor() as isize))
            .collect()
    }

    /// Cell displacements to metric displacements: `v * res`.
    pub fn grid_to_meter_for_vectors(&self, vectors: &[[isize; D]]) -> Vec<MetricPoint<D>> {
        vectors
            .iter()
            .map(|v| std::array::from_fn(|i| v[i] as f64 * self.resolution[i]))
            .collect()
    }

    /// Snap a point to the center of its (clamped) cell.
    pub fn canonical_metric_coords(&self, point: &MetricPoint<D>) -> Result<MetricPoint<D>> {
        Ok(self.grid_to_meter(&self.meter_to_grid(point)?))
    }

    // === Membership ===

    /// Is `point` inside the closed box `[min, max]`?
    pub fn in_map(&self, point: &MetricPoint<D>) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Is a signed cell index inside the grid?
    pub fn in_grids(&self, index: &[isize; D]) -> bool {
        (0..D).all(|i| index[i] >= 0 && (index[i] as usize) < self.shape[i])
    }

    // === Flat Cell Numbering ===

    /// Flat cell number of `index` in C (`c_stride`) or Fortran order.
    pub fn grid_to_index(&self, index: &GridIndex<D>, c_stride: bool) -> Result<usize> {
        for axis in 0..D {
            if index[axis] >= self.shape[axis] {
                return Err(Error::IndexOutOfBounds(format!(
                    "cell index {} out of bounds for axis {axis} with {} cells",
                    index[axis], self.shape[axis]
                )));
            }
        }
        let strides = compute_strides(&self.shape, StorageOrder::from_row_major(c_stride))?;
        Ok(coords_to_index(&strides, index) as usize)
    }

    /// Inverse of [`grid_to_index`](Self::grid_to_index).
    pub fn index_to_grid(&self, flat: usize, c_stride: bool) -> Result<GridIndex<D>> {
        if flat >= self.size() {
            return Err(Error::IndexOutOfBounds(format!(
                "flat index {flat} out of bounds for grid of {} cells",
                self.size()
            )));
        }
        let coords = index_to_coords(&self.shape, flat, StorageOrder::from_row_major(c_stride));
        Ok(std::array::from_fn(|i| coords[i]))
    }

    // === Enumeration ===

    /// Every cell index, in C (`c_stride`) or Fortran order.
    pub fn generate_grid_coordinates(&self, c_stride: bool) -> Vec<GridIndex<D>> {
        let order = StorageOrder::from_row_major(c_stride);
        (0..self.size())
            .map(|flat| {
                let coords = index_to_coords(&self.shape, flat, order);
                std::array::from_fn(|i| coords[i])
            })
            .collect()
    }

    /// Every cell center, in C (`c_stride`) or Fortran order.
    pub fn generate_meter_coordinates(&self, c_stride: bool) -> Vec<MetricPoint<D>> {
        self.generate_grid_coordinates(c_stride)
            .iter()
            .map(|g| self.grid_to_meter(g))
            .collect()
    }

    /// Cell-center coordinates along one axis.
    pub fn dim_lin_space(&self, axis: usize) -> Vec<f64> {
        (0..self.shape[axis])
            .map(|g| self.grid_to_meter_at_dim(g, axis))
            .collect()
    }

    // === Ray Casting ===

    /// Cells crossed by the segment from `start` to `end`, in order.
    pub fn ray_casting(&self, start: &MetricPoint<D>, end: &MetricPoint<D>) -> Result<Vec<GridIndex<D>>> {
        cells_along_ray(self, start, end)
    }
}

impl GridMapInfo<2> {
    /// Cells along axis 0
    #[inline]
    pub fn width(&self) -> usize {
        self.shape[0]
    }

    /// Cells along axis 1
    #[inline]
    pub fn height(&self) -> usize {
        self.shape[1]
    }

    /// Insert a new axis at position `axis` (0..=2), yielding a 3D info.
    pub fn extend(&self, size: usize, min: f64, max: f64, axis: usize) -> Result<GridMapInfo<3>> {
        if axis > 2 {
            return Err(Error::InvalidShape(format!(
                "cannot insert axis {axis} into a 2D grid"
            )));
        }
        let mut shape = [0usize; 3];
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        let mut src = 0;
        for dst in 0..3 {
            if dst == axis {
                shape[dst] = size;
                lo[dst] = min;
                hi[dst] = max;
            } else {
                shape[dst] = self.shape[src];
                lo[dst] = self.min[src];
                hi[dst] = self.max[src];
                src += 1;
            }
        }
        GridMapInfo::new(shape, lo, hi)
    }

    // === Pixel Conversion ===
    //
    // Image convention: u runs with grid x, v runs against grid y so that
    // increasing y points up in a rendered image.
    //
    //   grid (x, y)  ->  pixel (u, v) = (x, height - 1 - y)

    /// Pixel of a cell.
    pub fn grid_to_pixel(&self, index: &GridIndex<2>) -> Result<[usize; 2]> {
        self.check_cell(index)?;
        Ok([index[0], self.shape[1] - 1 - index[1]])
    }

    /// Cell of a pixel.
    pub fn pixel_to_grid(&self, pixel: &[usize; 2]) -> Result<GridIndex<2>> {
        self.check_cell(pixel)?;
        Ok([pixel[0], self.shape[1] - 1 - pixel[1]])
    }

    /// Pixel of the cell containing `point` (clamped).
    pub fn meter_to_pixel(&self, point: &MetricPoint<2>) -> Result<[usize; 2]> {
        self.grid_to_pixel(&self.meter_to_grid(point)?)
    }

    /// Metric center of a pixel's cell.
    pub fn pixel_to_meter(&self, pixel: &[usize; 2]) -> Result<MetricPoint<2>> {
        Ok(self.grid_to_meter(&self.pixel_to_grid(pixel)?))
    }

    /// [`grid_to_pixel`](Self::grid_to_pixel) for each index.
    pub fn grid_to_pixel_for_points(&self, indices: &[GridIndex<2>]) -> Result<Vec<[usize; 2]>> {
        indices.iter().map(|g| self.grid_to_pixel(g)).collect()
    }

    /// [`pixel_to_grid`](Self::pixel_to_grid) for each pixel.
    pub fn pixel_to_grid_for_points(&self, pixels: &[[usize; 2]]) -> Result<Vec<GridIndex<2>>> {
        pixels.iter().map(|p| self.pixel_to_grid(p)).collect()
    }

    /// [`meter_to_pixel`](Self::meter_to_pixel) for each point.
    pub fn meter_to_pixel_for_points(&self, points: &[MetricPoint<2>]) -> Result<Vec<[usize; 2]>> {
        points.iter().map(|p| self.meter_to_pixel(p)).collect()
    }

    /// [`pixel_to_meter`](Self::pixel_to_meter) for each pixel.
    pub fn pixel_to_meter_for_points(&self, pixels: &[[usize; 2]]) -> Result<Vec<MetricPoint<2>>> {
        pixels.iter().map(|p| self.pixel_to_meter(p)).collect()
    }

    // === Polygons ===

    /// Every cell whose center lies inside the polygon (even-odd rule), in C order.
    ///
    /// Fewer than three vertices describe no area and yield nothing.
    pub fn grid_coordinates_of_filled_metric_polygon(
        &self,
        vertices: &[MetricPoint<2>],
    ) -> Result<Vec<GridIndex<2>>> {
        if vertices.len() < 3 {
            return Ok(Vec::new());
        }

        // Only cells inside the polygon's bounding box can qualify
        let mut lo = [usize::MAX; 2];
        let mut hi = [0usize; 2];
        for vertex in vertices {
            let cell = self.meter_to_grid(vertex)?;
            for axis in 0..2 {
                lo[axis] = lo[axis].min(cell[axis]);
                hi[axis] = hi[axis].max(cell[axis]);
            }
        }

        let mut cells = Vec::new();
        for x in lo[0]..=hi[0] {
            for y in lo[1]..=hi[1] {
                let center = self.grid_to_meter(&[x, y]);
                if point_in_polygon(&center, vertices) {
                    cells.push([x, y]);
                }
            }
        }
        Ok(cells)
    }

    /// Cell centers of [`grid_coordinates_of_filled_metric_polygon`](Self::grid_coordinates_of_filled_metric_polygon).
    pub fn metric_coordinates_of_filled_metric_polygon(
        &self,
        vertices: &[MetricPoint<2>],
    ) -> Result<Vec<MetricPoint<2>>> {
        Ok(self.grid_to_meter_for_points(&self.grid_coordinates_of_filled_metric_polygon(vertices)?))
    }

    fn check_cell(&self, index: &[usize; 2]) -> Result<()> {
        for axis in 0..2 {
            if index[axis] >= self.shape[axis] {
                return Err(Error::IndexOutOfBounds(format!(
                    "index {} out of bounds for axis {axis} with {} cells",
                    index[axis], self.shape[axis]
                )));
            }
        }
        Ok(())
    }
}

impl GridMapInfo<3> {
    /// Cells along axis 0
    #[inline]
    pub fn width(&self) -> usize {
        self.shape[0]
    }

    /// Cells along axis 1
    #[inline]
    pub fn height(&self) -> usize {
        self.shape[1]
    }

    /// Cells along axis 2
    #[inline]
    pub fn length(&self) -> usize {
        self.shape[2]
    }

    /// Drop `axis` (0..3), yielding a 2D info over the remaining axes.
    pub fn squeeze(&self, axis: usize) -> Result<GridMapInfo<2>> {
        if axis > 2 {
            return Err(Error::InvalidShape(format!(
                "cannot drop axis {axis} from a 3D grid"
            )));
        }
        let keep: Vec<usize> = (0..3).filter(|&i| i != axis).collect();
        GridMapInfo::new(
            [self.shape[keep[0]], self.shape[keep[1]]],
            [self.min[keep[0]], self.min[keep[1]]],
            [self.max[keep[0]], self.max[keep[1]]],
        )
    }
}

/// Even-odd crossing test.
fn point_in_polygon(point: &MetricPoint<2>, vertices: &[MetricPoint<2>]) -> bool {
    let [px, py] = *point;
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let [xi, yi] = vertices[i];
        let [xj, yj] = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_grid() -> GridMapInfo2D {
        GridMapInfo::new([11, 11], [0.0, 0.0], [1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_resolution() {
        let info = unit_grid();
        assert_relative_eq!(info.resolution_at(0), 1.0 / 11.0);
        assert_relative_eq!(info.resolution_at(1), 1.0 / 11.0);
        assert_eq!(info.size(), 121);
        assert_eq!(info.center_grid(), [5, 5]);
        assert_relative_eq!(info.center()[0], 0.5);
    }

    #[test]
    fn test_round_trip() {
        let info = unit_grid();
        let center = info.grid_to_meter(&[5, 5]);
        assert_relative_eq!(center[0], 0.5, epsilon = 1e-12);
        assert_eq!(info.meter_to_grid(&center).unwrap(), [5, 5]);

        for g in info.generate_grid_coordinates(true) {
            assert_eq!(info.meter_to_grid(&info.grid_to_meter(&g)).unwrap(), g);
        }
    }

    #[test]
    fn test_meter_to_grid_clamps() {
        let info = unit_grid();
        assert_eq!(info.meter_to_grid(&[-3.0, 0.0]).unwrap(), [0, 0]);
        assert_eq!(info.meter_to_grid(&[1.0, 1.0]).unwrap(), [10, 10]);
        assert_eq!(info.meter_to_grid(&[7.0, 0.5]).unwrap(), [10, 5]);
    }

    #[test]
    fn test_non_finite_coordinate() {
        let info = unit_grid();
        assert!(matches!(
            info.meter_to_grid(&[0.5, f64::NAN]),
            Err(Error::InvalidCoordinate { axis: 1, .. })
        ));
        assert!(matches!(
            info.meter_to_grid(&[f64::INFINITY, 0.5]),
            Err(Error::InvalidCoordinate { axis: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            GridMapInfo::new([0, 4], [0.0, 0.0], [1.0, 1.0]),
            Err(Error::InvalidShape(_))
        ));
        assert!(matches!(
            GridMapInfo::new([4, 4], [0.0, 1.0], [1.0, 1.0]),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            GridMapInfo::new([4, 4], [0.0, 0.0], [f64::NAN, 1.0]),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            GridMapInfo::from_resolution([0.0], [1.0], [0.0], [0]),
            Err(Error::InvalidBounds(_))
        ));
        // Cell count overflows usize
        assert!(matches!(
            GridMapInfo::new([usize::MAX, 2], [0.0, 0.0], [1.0, 1.0]),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn test_meter_to_grid_divides_by_resolution() {
        let info = GridMapInfo::new([10], [0.0], [1.0]).unwrap();
        // 0.3 / 0.1 is just below 3, 0.3 * 10.0 is just above
        assert_eq!(info.meter_to_grid(&[0.3]).unwrap(), [2]);
        assert_eq!(info.meter_to_grid(&[0.6]).unwrap(), [5]);
        assert_eq!(info.meter_to_grid(&[0.7]).unwrap(), [6]);
        assert_eq!(info.meter_to_grid_for_vectors(&[[0.3]]), vec![[2]]);

        // The ray walk ends on the same cell
        let cells = info.ray_casting(&[0.05], &[0.3]).unwrap();
        assert_eq!(cells.last(), Some(&[2]));
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_from_resolution() {
        let info = GridMapInfo::from_resolution([0.0, -1.0], [1.0, 1.0], [0.1, 0.25], [2, 0]).unwrap();
        assert_eq!(info.shape(), &[14, 8]);
        assert_relative_eq!(info.min_at(0), -0.2);
        assert_relative_eq!(info.max_at(0), 1.2, epsilon = 1e-12);
        assert_relative_eq!(info.resolution_at(0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(info.resolution_at(1), 0.25);

        // Partial cells round up
        let info = GridMapInfo::from_resolution([0.0], [1.05], [0.1], [0]).unwrap();
        assert_eq!(info.shape(), &[11]);
    }

    #[test]
    fn test_generate_grid_coordinates_2d() {
        let info = GridMapInfo::new([3, 5], [0.0, 0.0], [1.0, 1.0]).unwrap();

        let c = info.generate_grid_coordinates(true);
        let f = info.generate_grid_coordinates(false);
        assert_eq!(c.len(), 15);

        let mut k = 0;
        for i in 0..3 {
            for j in 0..5 {
                assert_eq!(c[k], [i, j]);
                k += 1;
            }
        }
        let mut k = 0;
        for j in 0..5 {
            for i in 0..3 {
                assert_eq!(f[k], [i, j]);
                k += 1;
            }
        }
    }

    #[test]
    fn test_generate_grid_coordinates_3d() {
        let info = GridMapInfo::new([3, 5, 7], [0.0; 3], [1.0; 3]).unwrap();

        let c = info.generate_grid_coordinates(true);
        let f = info.generate_grid_coordinates(false);
        for (k, g) in c.iter().enumerate() {
            assert_eq!(info.grid_to_index(g, true).unwrap(), k);
            assert_eq!(info.index_to_grid(k, true).unwrap(), *g);
        }
        for (k, g) in f.iter().enumerate() {
            assert_eq!(info.grid_to_index(g, false).unwrap(), k);
        }
        assert_eq!(c[1], [0, 0, 1]);
        assert_eq!(f[1], [1, 0, 0]);

        let meters = info.generate_meter_coordinates(true);
        assert_relative_eq!(meters[1][2], 1.5 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_index_bounds() {
        let info = unit_grid();
        assert!(matches!(
            info.grid_to_index(&[11, 0], true),
            Err(Error::IndexOutOfBounds(_))
        ));
        assert!(matches!(
            info.index_to_grid(121, false),
            Err(Error::IndexOutOfBounds(_))
        ));
    }

    #[test]
    fn test_vectors() {
        let info = GridMapInfo::new([10], [5.0], [6.0]).unwrap();
        let cells = info.meter_to_grid_for_vectors(&[[0.25], [-0.25], [0.0]]);
        assert_eq!(cells, vec![[2], [-3], [0]]);

        let meters = info.grid_to_meter_for_vectors(&[[3], [-1]]);
        assert_relative_eq!(meters[0][0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(meters[1][0], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_membership() {
        let info = unit_grid();
        assert!(info.in_map(&[0.0, 1.0]));
        assert!(!info.in_map(&[1.01, 0.5]));
        assert!(info.in_grids(&[10, 0]));
        assert!(!info.in_grids(&[-1, 0]));
        assert!(!info.in_grids(&[0, 11]));
    }

    #[test]
    fn test_dim_lin_space() {
        let info = GridMapInfo::new([4, 2], [0.0, 0.0], [1.0, 1.0]).unwrap();
        let xs = info.dim_lin_space(0);
        assert_eq!(xs.len(), 4);
        assert_relative_eq!(xs[0], 0.125);
        assert_relative_eq!(xs[3], 0.875);
    }

    #[test]
    fn test_pixels() {
        let info = GridMapInfo::new([4, 3], [0.0, 0.0], [4.0, 3.0]).unwrap();
        assert_eq!(info.width(), 4);
        assert_eq!(info.height(), 3);

        assert_eq!(info.grid_to_pixel(&[0, 0]).unwrap(), [0, 2]);
        assert_eq!(info.grid_to_pixel(&[3, 2]).unwrap(), [3, 0]);
        assert_eq!(info.pixel_to_grid(&[3, 0]).unwrap(), [3, 2]);
        assert_eq!(info.meter_to_pixel(&[1.5, 0.5]).unwrap(), [1, 2]);

        let center = info.pixel_to_meter(&[1, 2]).unwrap();
        assert_relative_eq!(center[0], 1.5);
        assert_relative_eq!(center[1], 0.5);

        assert!(matches!(
            info.pixel_to_grid(&[0, 3]),
            Err(Error::IndexOutOfBounds(_))
        ));
        assert_eq!(
            info.grid_to_pixel_for_points(&[[0, 0], [1, 1]]).unwrap(),
            vec![[0, 2], [1, 1]]
        );
    }

    #[test]
    fn test_filled_polygon() {
        let info = GridMapInfo::new([10, 10], [0.0, 0.0], [1.0, 1.0]).unwrap();

        // Square covering cell centers 0.25..0.55 on both axes
        let square = [[0.2, 0.2], [0.6, 0.2], [0.6, 0.6], [0.2, 0.6]];
        let cells = info.grid_coordinates_of_filled_metric_polygon(&square).unwrap();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], [2, 2]);
        assert_eq!(cells[1], [2, 3]);
        assert_eq!(cells[15], [5, 5]);

        // Right triangle on and below the diagonal; centers on the hypotenuse count
        let triangle = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let cells = info.grid_coordinates_of_filled_metric_polygon(&triangle).unwrap();
        assert!(cells.iter().all(|c| c[1] <= c[0]));
        assert_eq!(cells.len(), 55);

        assert!(
            info.grid_coordinates_of_filled_metric_polygon(&[[0.0, 0.0], [1.0, 1.0]])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_extend_and_squeeze() {
        let info = GridMapInfo::new([4, 6], [0.0, -1.0], [2.0, 1.0]).unwrap();

        let volume = info.extend(8, 0.0, 4.0, 1).unwrap();
        assert_eq!(volume.shape(), &[4, 8, 6]);
        assert_relative_eq!(volume.min_at(2), -1.0);
        assert_relative_eq!(volume.resolution_at(1), 0.5);
        assert_eq!(volume.length(), 6);

        let flat = volume.squeeze(1).unwrap();
        assert_eq!(flat, info);

        assert!(matches!(info.extend(8, 0.0, 4.0, 3), Err(Error::InvalidShape(_))));
        assert!(matches!(volume.squeeze(3), Err(Error::InvalidShape(_))));
    }

    #[test]
    fn test_canonical_metric_coords() {
        let info = GridMapInfo::new([4], [0.0], [1.0]).unwrap();
        let snapped = info.canonical_metric_coords(&[0.3]).unwrap();
        assert_relative_eq!(snapped[0], 0.375);
    }
}
