//! Borrowed strided views over a tensor buffer.

use crate::core::Layout;
use crate::error::Result;

use super::element::Element;

/// Read-only strided view, typically a cross-section of a [`Tensor`](super::Tensor).
#[derive(Clone, Debug)]
pub struct TensorView<'a, T: Element> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T: Element> TensorView<'a, T> {
    pub(crate) fn from_parts(data: &'a [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Extent of every axis
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Strides into the parent buffer
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of axes
    #[inline]
    pub fn dims(&self) -> usize {
        self.layout.dims()
    }

    /// Number of elements in the view
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Layout into the parent buffer
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Element at a full multi-index of the view.
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        Ok(self.data[self.layout.offset_of(indices)?])
    }

    /// Narrower cross-section of this view.
    pub fn slice(&self, fixed_axes: &[usize], fixed_values: &[usize]) -> Result<TensorView<'a, T>> {
        let layout = self.layout.slice(fixed_axes, fixed_values)?;
        Ok(TensorView::from_parts(self.data, layout))
    }

    /// Elements in row-major order of the view.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let data = self.data;
        self.layout.offsets().map(move |offset| &data[offset])
    }

    /// Copy of the elements in row-major order of the view.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

/// Mutable strided view; writes land in the parent buffer.
#[derive(Debug)]
pub struct TensorViewMut<'a, T: Element> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T: Element> TensorViewMut<'a, T> {
    pub(crate) fn from_parts(data: &'a mut [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Extent of every axis
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Strides into the parent buffer
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of elements in the view
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Element at a full multi-index of the view.
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        Ok(self.data[self.layout.offset_of(indices)?])
    }

    /// Mutable reference at a full multi-index of the view.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let offset = self.layout.offset_of(indices)?;
        Ok(&mut self.data[offset])
    }

    /// Store `value` at a full multi-index of the view.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Overwrite every element of the view.
    pub fn fill(&mut self, value: T) {
        for offset in self.layout.offsets() {
            self.data[offset] = value;
        }
    }

    /// Apply `f` to every element of the view in row-major order.
    pub fn map_inplace<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for offset in self.layout.offsets() {
            f(&mut self.data[offset]);
        }
    }

    /// Narrower mutable cross-section of this view.
    pub fn slice_mut(
        &mut self,
        fixed_axes: &[usize],
        fixed_values: &[usize],
    ) -> Result<TensorViewMut<'_, T>> {
        let layout = self.layout.slice(fixed_axes, fixed_values)?;
        Ok(TensorViewMut::from_parts(&mut *self.data, layout))
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> TensorView<'_, T> {
        TensorView::from_parts(&*self.data, self.layout.clone())
    }

    /// Copy of the elements in row-major order of the view.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_view().to_vec()
    }
}
