//! The [`Tensor`] type: a contiguous buffer with a fixed strided layout.

use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};

use crate::core::{Layout, StorageOrder, coords_to_index, index_to_coords, validate_shape};
use crate::error::{Error, Result};

use super::element::{DType, Element};
use super::external::ExternalView;
use super::view::{TensorView, TensorViewMut};

/// Backing storage: owned, or borrowed from someone else.
#[derive(Debug)]
enum Buffer<'a, T> {
    Owned(Vec<T>),
    Aliased(&'a mut [T]),
}

impl<T> Deref for Buffer<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        match self {
            Buffer::Owned(data) => data,
            Buffer::Aliased(data) => data,
        }
    }
}

impl<T> DerefMut for Buffer<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        match self {
            Buffer::Owned(data) => data,
            Buffer::Aliased(data) => data,
        }
    }
}

/// N-dimensional array over a contiguous buffer.
///
/// The strides are fixed by the shape and the storage order at construction;
/// a tensor is never resized. Linear indexing addresses the buffer directly,
/// so it follows the tensor's own majorness.
///
/// ```text
/// shape [3, 4], row-major          linear index 3 == (0, 3)
///
///        col 0  col 1  col 2  col 3
/// row 0    0      1      2      3
/// row 1    4      5      6      7
/// row 2    8      9     10     11
/// ```
///
/// A `Tensor<'static, T>` owns its buffer. A `Tensor<'a, T>` built with
/// [`Tensor::from_slice_mut`] aliases a caller's buffer and cannot outlive it.
#[derive(Debug)]
pub struct Tensor<'a, T: Element> {
    buffer: Buffer<'a, T>,
    layout: Layout,
    order: StorageOrder,
}

impl<T: Element> Tensor<'static, T> {
    /// Owned tensor with every element set to `T::default()`.
    pub fn new(shape: &[usize], order: StorageOrder) -> Result<Self> {
        Self::filled(shape, T::default(), order)
    }

    /// Owned tensor with every element set to `value`.
    pub fn filled(shape: &[usize], value: T, order: StorageOrder) -> Result<Self> {
        let size = validate_shape(shape)?;
        Self::from_vec(shape, vec![value; size], order)
    }

    /// Take ownership of `data`, interpreted in `order`.
    pub fn from_vec(shape: &[usize], data: Vec<T>, order: StorageOrder) -> Result<Self> {
        let layout = checked_layout(shape, data.len(), order)?;
        Ok(Self {
            buffer: Buffer::Owned(data),
            layout,
            order,
        })
    }

    /// Build by calling `f` with every multi-index, in buffer order.
    pub fn from_fn<F>(shape: &[usize], order: StorageOrder, mut f: F) -> Result<Self>
    where
        F: FnMut(&[usize]) -> T,
    {
        let size = validate_shape(shape)?;
        let data = (0..size)
            .map(|i| f(&index_to_coords(shape, i, order)))
            .collect();
        Self::from_vec(shape, data, order)
    }

    /// Build from elements listed in column-major order, stored in `order`.
    pub fn from_column_major(shape: &[usize], data: &[T], order: StorageOrder) -> Result<Self> {
        if order == StorageOrder::ColumnMajor {
            return Self::from_vec(shape, data.to_vec(), order);
        }

        let layout = checked_layout(shape, data.len(), order)?;
        let mut buffer = vec![T::default(); data.len()];
        for (i, &value) in data.iter().enumerate() {
            let coords = index_to_coords(shape, i, StorageOrder::ColumnMajor);
            buffer[coords_to_index(layout.strides(), &coords) as usize] = value;
        }
        Ok(Self {
            buffer: Buffer::Owned(buffer),
            layout,
            order,
        })
    }
}

impl<'a, T: Element> Tensor<'a, T> {
    /// Alias a caller-owned buffer without copying.
    ///
    /// Writes through the tensor land in `data`; the borrow ends when the
    /// tensor is dropped.
    pub fn from_slice_mut(shape: &[usize], data: &'a mut [T], order: StorageOrder) -> Result<Self> {
        let layout = checked_layout(shape, data.len(), order)?;
        Ok(Self {
            buffer: Buffer::Aliased(data),
            layout,
            order,
        })
    }

    /// Number of dimensions
    #[inline]
    pub fn dims(&self) -> usize {
        self.layout.dims()
    }

    /// Extent of every axis
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Element strides, derived from shape and order
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Total element count
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Storage order
    #[inline]
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Is the buffer laid out in C order?
    #[inline]
    pub fn is_row_major(&self) -> bool {
        self.order.is_row_major()
    }

    /// Does this tensor own its buffer?
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.buffer, Buffer::Owned(_))
    }

    /// Scalar type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// The full layout (offset is always 0)
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Raw buffer in storage order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Mutable raw buffer in storage order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    /// Overwrite every element.
    pub fn fill(&mut self, value: T) {
        self.buffer.fill(value);
    }

    /// Element at a full multi-index.
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        let offset = self.layout.offset_of(indices)?;
        Ok(self.buffer[offset])
    }

    /// Mutable reference to the element at a full multi-index.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let offset = self.layout.offset_of(indices)?;
        Ok(&mut self.buffer[offset])
    }

    /// Store `value` at a full multi-index.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Element at a buffer position.
    pub fn get_linear(&self, index: usize) -> Result<T> {
        self.check_linear(index)?;
        Ok(self.buffer[index])
    }

    /// Mutable reference to the element at a buffer position.
    pub fn get_linear_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_linear(index)?;
        Ok(&mut self.buffer[index])
    }

    /// Store `value` at a buffer position.
    pub fn set_linear(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_linear_mut(index)? = value;
        Ok(())
    }

    /// Sub-tensor selected by a leading partial multi-index.
    ///
    /// `t.subtensor(&[i])` on a 3D tensor is the 2D plane at `i` along axis 0.
    pub fn subtensor(&self, indices: &[usize]) -> Result<TensorView<'_, T>> {
        let layout = self.layout.subview(indices)?;
        Ok(TensorView::from_parts(&self.buffer, layout))
    }

    /// Mutable sub-tensor selected by a leading partial multi-index.
    pub fn subtensor_mut(&mut self, indices: &[usize]) -> Result<TensorViewMut<'_, T>> {
        let layout = self.layout.subview(indices)?;
        Ok(TensorViewMut::from_parts(&mut self.buffer, layout))
    }

    /// Cross-section with `fixed_axes` pinned to `fixed_values`.
    ///
    /// Shares the buffer; the view's strides are the parent's strides of the
    /// free axes.
    pub fn slice(&self, fixed_axes: &[usize], fixed_values: &[usize]) -> Result<TensorView<'_, T>> {
        let layout = self.layout.slice(fixed_axes, fixed_values)?;
        Ok(TensorView::from_parts(&self.buffer, layout))
    }

    /// Mutable cross-section; writes go to this tensor's buffer.
    pub fn slice_mut(
        &mut self,
        fixed_axes: &[usize],
        fixed_values: &[usize],
    ) -> Result<TensorViewMut<'_, T>> {
        let layout = self.layout.slice(fixed_axes, fixed_values)?;
        Ok(TensorViewMut::from_parts(&mut self.buffer, layout))
    }

    /// Borrow the whole tensor as a view
    pub fn view(&self) -> TensorView<'_, T> {
        TensorView::from_parts(&self.buffer, self.layout.clone())
    }

    /// Mutably borrow the whole tensor as a view
    pub fn view_mut(&mut self) -> TensorViewMut<'_, T> {
        TensorViewMut::from_parts(&mut self.buffer, self.layout.clone())
    }

    /// Descriptor for zero-copy aliasing by an external array library.
    ///
    /// The descriptor holds the exclusive borrow of this tensor, so the
    /// tensor is unusable until the descriptor is dropped.
    pub fn as_external_view(&mut self) -> ExternalView<'_> {
        ExternalView::from_slice(&mut self.buffer, &self.layout, self.order)
    }

    /// `(multi_index, &value)` pairs in buffer order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> + '_ {
        let order = self.order;
        self.buffer
            .iter()
            .enumerate()
            .map(move |(i, value)| (index_to_coords(self.layout.shape(), i, order), value))
    }

    /// Copy of the elements in column-major order.
    pub fn to_column_major_vec(&self) -> Vec<T> {
        self.to_vec_in(StorageOrder::ColumnMajor)
    }

    /// Copy of the elements in row-major order.
    pub fn to_row_major_vec(&self) -> Vec<T> {
        self.to_vec_in(StorageOrder::RowMajor)
    }

    /// Owned deep copy with the same shape and order.
    pub fn to_owned_tensor(&self) -> Tensor<'static, T> {
        Tensor {
            buffer: Buffer::Owned(self.buffer.to_vec()),
            layout: self.layout.clone(),
            order: self.order,
        }
    }

    fn to_vec_in(&self, order: StorageOrder) -> Vec<T> {
        if order == self.order {
            return self.buffer.to_vec();
        }
        (0..self.size())
            .map(|i| {
                let coords = index_to_coords(self.layout.shape(), i, order);
                self.buffer[coords_to_index(self.layout.strides(), &coords) as usize]
            })
            .collect()
    }

    fn check_linear(&self, index: usize) -> Result<()> {
        if index >= self.size() {
            return Err(Error::IndexOutOfBounds(format!(
                "linear index {index} out of bounds for tensor of size {}",
                self.size()
            )));
        }
        Ok(())
    }
}

fn checked_layout(shape: &[usize], len: usize, order: StorageOrder) -> Result<Layout> {
    let size = validate_shape(shape)?;
    if size != len {
        return Err(Error::InvalidShape(format!(
            "shape {shape:?} holds {size} elements but the buffer has {len}"
        )));
    }
    Layout::contiguous(shape, order)
}

impl<T: Element> Index<usize> for Tensor<'_, T> {
    type Output = T;

    /// Linear access; panics when out of bounds, like slice indexing.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.buffer[index]
    }
}

impl<T: Element> IndexMut<usize> for Tensor<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buffer[index]
    }
}

/// Equal when shapes match and every multi-index holds the same value,
/// whatever the storage order.
impl<T: Element> PartialEq for Tensor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .layout
                .offsets()
                .zip(other.layout.offsets())
                .all(|(a, b)| self.buffer[a] == other.buffer[b])
    }
}

impl<T: Element> fmt::Display for Tensor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor, shape: {:?}, data: array of {}",
            self.shape(),
            T::DTYPE
        )
    }
}
