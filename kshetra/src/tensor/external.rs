//! Zero-copy descriptor for sharing a tensor buffer with another array library.
//!
//! An [`ExternalView`] carries what an array-interface consumer needs to alias
//! the memory: base pointer, element count, shape, element strides, scalar
//! type and majorness. It holds the exclusive borrow of the source buffer for
//! its lifetime `'a`, so aliasing is bounded by the borrow checker on the Rust
//! side. Across an FFI boundary the consumer must not keep the pointer past
//! that lifetime and must serialize its own writes.

use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::core::{Layout, StorageOrder, validate_shape};
use crate::error::{Error, Result};

use super::base::Tensor;
use super::element::{DType, Element};

/// Pointer, shape, strides and dtype of a borrowed tensor buffer.
#[derive(Debug)]
pub struct ExternalView<'a> {
    ptr: NonNull<u8>,
    len: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
    dtype: DType,
    order: StorageOrder,
    _borrow: PhantomData<&'a mut [u8]>,
}

impl<'a> ExternalView<'a> {
    pub(crate) fn from_slice<T: Element>(
        data: &'a mut [T],
        layout: &Layout,
        order: StorageOrder,
    ) -> Self {
        Self {
            ptr: NonNull::from(&mut *data).cast::<u8>(),
            len: data.len(),
            shape: layout.shape().to_vec(),
            strides: layout.strides().to_vec(),
            dtype: T::DTYPE,
            order,
            _borrow: PhantomData,
        }
    }

    /// Describe memory owned by someone else.
    ///
    /// # Safety
    ///
    /// `ptr` must point to `product(shape)` initialized, properly aligned
    /// elements of `dtype`, laid out contiguously in `order`, valid for reads
    /// and writes for `'a`, and not accessed through any other path while the
    /// returned view (or a tensor built from it) is alive.
    pub unsafe fn from_raw_parts(
        ptr: NonNull<u8>,
        shape: &[usize],
        dtype: DType,
        order: StorageOrder,
    ) -> Result<Self> {
        let layout = Layout::contiguous(shape, order)?;
        Ok(Self {
            ptr,
            len: validate_shape(shape)?,
            shape: layout.shape().to_vec(),
            strides: layout.strides().to_vec(),
            dtype,
            order,
            _borrow: PhantomData,
        })
    }

    /// Base address of the buffer
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; shapes have no zero-size axes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extent of every axis
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides in elements
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Strides in bytes, as array-interface consumers expect
    pub fn byte_strides(&self) -> Vec<isize> {
        let item_size = self.item_size() as isize;
        self.strides.iter().map(|&s| s * item_size).collect()
    }

    /// Size of one element in bytes
    #[inline]
    pub fn item_size(&self) -> usize {
        self.dtype.size_bytes()
    }

    /// Scalar type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Storage order
    #[inline]
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Is the buffer in C order?
    #[inline]
    pub fn is_row_major(&self) -> bool {
        self.order.is_row_major()
    }

    /// Read the buffer as `T` elements.
    pub fn typed<T: Element>(&self) -> Result<&[T]> {
        self.check_dtype::<T>()?;
        // SAFETY: dtype matches, and the pointer/len pair came from a live
        // `&'a mut [T]` (or a caller upholding `from_raw_parts`).
        Ok(unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<T>(), self.len) })
    }

    /// Write the buffer as `T` elements.
    pub fn typed_mut<T: Element>(&mut self) -> Result<&mut [T]> {
        self.check_dtype::<T>()?;
        // SAFETY: as in `typed`; `&mut self` guarantees exclusivity.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<T>(), self.len) })
    }

    /// Turn the descriptor into a tensor aliasing the same memory.
    pub fn into_tensor<T: Element>(self) -> Result<Tensor<'a, T>> {
        self.check_dtype::<T>()?;
        // SAFETY: the view owned the exclusive borrow for 'a and is consumed.
        let data =
            unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<T>(), self.len) };
        Tensor::from_slice_mut(&self.shape, data, self.order)
    }

    fn check_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                expected: T::DTYPE,
                found: self.dtype,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_fields() {
        let mut t = Tensor::<f64>::new(&[3, 4], StorageOrder::ColumnMajor).unwrap();
        let view = t.as_external_view();

        assert_eq!(view.len(), 12);
        assert_eq!(view.shape(), &[3, 4]);
        assert_eq!(view.strides(), &[1, 3]);
        assert_eq!(view.byte_strides(), vec![8, 24]);
        assert_eq!(view.dtype(), DType::Float64);
        assert!(!view.is_row_major());
    }

    #[test]
    fn test_write_through_alias() {
        let mut t = Tensor::filled(&[3, 4], 1.0f64, StorageOrder::RowMajor).unwrap();
        {
            let mut view = t.as_external_view();
            let data = view.typed_mut::<f64>().unwrap();
            assert_eq!(data.len(), 12);
            assert!(data.iter().all(|&v| v == 1.0));
            data[1] = 10.0;
        }
        assert_eq!(t.get(&[0, 1]).unwrap(), 10.0);
    }

    #[test]
    fn test_dtype_mismatch() {
        let mut t = Tensor::<i32>::new(&[2, 2], StorageOrder::RowMajor).unwrap();
        let view = t.as_external_view();
        assert!(matches!(
            view.typed::<f32>(),
            Err(Error::DTypeMismatch {
                expected: DType::Float32,
                found: DType::Int32
            })
        ));
    }

    #[test]
    fn test_into_tensor_round_trip() {
        let mut t = Tensor::<u32>::new(&[2, 3], StorageOrder::ColumnMajor).unwrap();
        {
            let mut alias = t.as_external_view().into_tensor::<u32>().unwrap();
            assert!(!alias.is_owned());
            alias.set(&[1, 2], 42).unwrap();
        }
        assert_eq!(t.get(&[1, 2]).unwrap(), 42);
        assert_eq!(t.as_slice()[5], 42);
    }

    #[test]
    fn test_from_raw_parts() {
        let mut data = vec![0i32; 6];
        let ptr = NonNull::from(data.as_mut_slice()).cast::<u8>();
        {
            // SAFETY: `data` outlives the view and is not touched meanwhile.
            let view =
                unsafe { ExternalView::from_raw_parts(ptr, &[2, 3], DType::Int32, StorageOrder::RowMajor) }
                    .unwrap();
            let mut alias = view.into_tensor::<i32>().unwrap();
            alias.set(&[1, 0], 7).unwrap();
        }
        assert_eq!(data[3], 7);
    }
}
