//! Strided layout shared by tensors and their views.
//!
//! A [`Layout`] maps a multi-index to a flat buffer offset:
//! `offset + Σ index[d] * strides[d]`. Pinning axes produces a smaller layout
//! over the same buffer, which is how cross-sections avoid copying.

use crate::error::{Error, Result};

use super::stride::{StorageOrder, compute_strides, validate_shape};

/// Shape, strides and base offset of a strided buffer view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
}

impl Layout {
    /// Contiguous layout of `shape` in the given order, starting at offset 0.
    pub fn contiguous(shape: &[usize], order: StorageOrder) -> Result<Self> {
        let strides = compute_strides(shape, order)?;
        Ok(Self {
            shape: shape.to_vec(),
            strides,
            offset: 0,
        })
    }

    /// Extent of every axis
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element stride of every axis
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Buffer offset of the first element
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of axes
    #[inline]
    pub fn dims(&self) -> usize {
        self.shape.len()
    }

    /// Number of addressable elements
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Largest buffer offset this layout can address.
    pub fn max_offset(&self) -> usize {
        let span: isize = self
            .shape
            .iter()
            .zip(&self.strides)
            .map(|(&extent, &stride)| (extent as isize - 1) * stride.max(0))
            .sum();
        self.offset + span as usize
    }

    /// Buffer offset of a full multi-index.
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.shape.len() {
            return Err(Error::InvalidShape(format!(
                "index has {} components but the layout has {} dimensions",
                indices.len(),
                self.shape.len()
            )));
        }

        let mut offset = self.offset as isize;
        for (axis, (&idx, &extent)) in indices.iter().zip(&self.shape).enumerate() {
            if idx >= extent {
                return Err(Error::IndexOutOfBounds(format!(
                    "index {idx} out of bounds for dimension {axis} with size {extent}"
                )));
            }
            offset += idx as isize * self.strides[axis];
        }
        Ok(offset as usize)
    }

    /// Cross-section with `fixed_axes[k]` pinned to `fixed_values[k]`.
    ///
    /// The remaining axes keep their order and their original strides.
    pub fn slice(&self, fixed_axes: &[usize], fixed_values: &[usize]) -> Result<Layout> {
        if fixed_axes.len() != fixed_values.len() {
            return Err(Error::InvalidShape(format!(
                "{} axes given with {} values",
                fixed_axes.len(),
                fixed_values.len()
            )));
        }
        if fixed_axes.is_empty() {
            return Err(Error::InvalidShape(
                "at least one axis must be pinned".to_string(),
            ));
        }

        let mut pinned = vec![None; self.shape.len()];
        for (&axis, &value) in fixed_axes.iter().zip(fixed_values) {
            if axis >= self.shape.len() {
                return Err(Error::InvalidShape(format!(
                    "axis {axis} is out of range for a {}-dimensional layout",
                    self.shape.len()
                )));
            }
            if pinned[axis].is_some() {
                return Err(Error::InvalidShape(format!("axis {axis} is pinned twice")));
            }
            if value >= self.shape[axis] {
                return Err(Error::IndexOutOfBounds(format!(
                    "index {value} out of bounds for dimension {axis} with size {}",
                    self.shape[axis]
                )));
            }
            pinned[axis] = Some(value);
        }

        if fixed_axes.len() == self.shape.len() {
            return Err(Error::InvalidShape(
                "a slice must keep at least one axis".to_string(),
            ));
        }

        let mut offset = self.offset as isize;
        let mut shape = Vec::with_capacity(self.shape.len() - fixed_axes.len());
        let mut strides = Vec::with_capacity(shape.capacity());
        for (axis, pin) in pinned.into_iter().enumerate() {
            match pin {
                Some(value) => offset += value as isize * self.strides[axis],
                None => {
                    shape.push(self.shape[axis]);
                    strides.push(self.strides[axis]);
                }
            }
        }

        Ok(Layout {
            shape,
            strides,
            offset: offset as usize,
        })
    }

    /// Cross-section pinning the leading `indices.len()` axes.
    pub fn subview(&self, indices: &[usize]) -> Result<Layout> {
        let axes: Vec<usize> = (0..indices.len()).collect();
        self.slice(&axes, indices)
    }

    /// Buffer offsets in logical row-major order of this layout.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            layout: self,
            coords: vec![0; self.shape.len()],
            remaining: self.size(),
        }
    }

    /// Check that the layout fits inside a buffer of `len` elements.
    pub(crate) fn check_fits(&self, len: usize) -> Result<()> {
        validate_shape(&self.shape)?;
        if self.max_offset() >= len {
            return Err(Error::InvalidShape(format!(
                "layout with shape {:?} needs {} elements but the buffer holds {len}",
                self.shape,
                self.max_offset() + 1
            )));
        }
        Ok(())
    }
}

/// Iterator over the buffer offsets of a [`Layout`].
pub struct Offsets<'a> {
    layout: &'a Layout,
    coords: Vec<usize>,
    remaining: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let offset = self.layout.offset as isize
            + super::stride::coords_to_index(&self.layout.strides, &self.coords);

        // Odometer increment, last axis fastest
        for axis in (0..self.coords.len()).rev() {
            self.coords[axis] += 1;
            if self.coords[axis] < self.layout.shape[axis] {
                break;
            }
            self.coords[axis] = 0;
        }

        Some(offset as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}
