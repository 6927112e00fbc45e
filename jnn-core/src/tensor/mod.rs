// src/tensor/mod.rs

use std::fmt;
use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};

use crate::buffer::Buffer;
use crate::error::JnnError;
use crate::ops::traits::JnnNumeric;
use crate::tensor_data::TensorData;
use crate::types::DType;
use crate::with_dtype;

pub mod create;
mod inplace_arithmetic_methods;
pub mod iter_utils;
mod math_methods;
pub mod utils;
mod view_methods;

pub use create::{full, ones, ones_like, zeros, zeros_like};
use iter_utils::StridedIndexIter;

/// Represents a multi-dimensional array (tensor).
///
/// A `Tensor` is a cheap handle: cloning it shares the same [`TensorData`].
/// Shape and strides never change after creation. The element buffer is
/// shared with every view derived from this tensor and can be mutated only
/// through the explicitly in-place methods (`add_`, `fill_`, ...).
///
/// Non-mutating operations always return a fresh, owning, contiguous tensor.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) data: Arc<TensorData>,
}

impl Tensor {
    /// Creates a new F32 tensor from row-major data and a shape.
    ///
    /// # Errors
    /// `TensorCreationError` if `data_vec.len()` differs from the product of `shape`
    /// or if any dimension is zero.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, JnnError> {
        Self::from_buffer(Buffer::F32(data_vec), shape)
    }

    /// Creates a new F64 tensor from row-major data and a shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, JnnError> {
        Self::from_buffer(Buffer::F64(data_vec), shape)
    }

    /// Creates an owning tensor over `buffer`.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, JnnError> {
        if shape.contains(&0) {
            return Err(JnnError::TensorCreationError {
                data_len: buffer.len(),
                shape,
            });
        }
        Ok(Tensor {
            data: Arc::new(TensorData::new(buffer, shape)?),
        })
    }

    /// Creates an owning tensor from a typed vector.
    pub(crate) fn from_typed<T: JnnNumeric>(data: Vec<T>, shape: Vec<usize>) -> Result<Self, JnnError> {
        Self::from_buffer(T::into_buffer(data), shape)
    }

    pub(crate) fn from_data(data: TensorData) -> Self {
        Tensor { data: Arc::new(data) }
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.data.dtype
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.data.shape
    }

    /// Returns the strides of the tensor.
    pub fn strides(&self) -> &[usize] {
        &self.data.strides
    }

    /// Offset of the first element inside the backing buffer.
    pub fn offset(&self) -> usize {
        self.data.offset
    }

    pub fn rank(&self) -> usize {
        self.data.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.numel()
    }

    /// Checks if the tensor is contiguous in memory.
    pub fn is_contiguous(&self) -> bool {
        self.data.is_contiguous()
    }

    /// `true` if this tensor reads another tensor's buffer (created by a view op).
    pub fn is_view(&self) -> bool {
        self.data.is_view
    }

    /// `true` if both tensors read the same backing buffer.
    pub fn shares_buffer_with(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data.buffer, &other.data.buffer)
    }

    /// Acquires a read lock on the backing buffer.
    pub fn read_buffer(&self) -> Result<RwLockReadGuard<'_, Buffer>, JnnError> {
        self.data.read_buffer()
    }

    /// Acquires a write lock on the backing buffer.
    ///
    /// Writes through the guard are visible to every view of the buffer.
    pub fn write_buffer(&self) -> Result<RwLockWriteGuard<'_, Buffer>, JnnError> {
        self.data.write_buffer()
    }

    /// Physical buffer offsets of every element, in logical row-major order.
    pub(crate) fn physical_indices(&self) -> StridedIndexIter<'_> {
        StridedIndexIter::new(&self.data.shape, &self.data.strides, self.data.offset)
    }

    /// Copies the logical elements into a contiguous `Vec<T>`.
    ///
    /// # Errors
    /// `DataTypeMismatch` if `T` is not this tensor's element type.
    pub(crate) fn contiguous_data<T: JnnNumeric>(&self) -> Result<Vec<T>, JnnError> {
        let guard = self.read_buffer()?;
        let slice = guard.try_as_slice::<T>()?;
        if self.is_contiguous() {
            let start = self.data.offset;
            return Ok(slice[start..start + self.numel()].to_vec());
        }
        Ok(self.physical_indices().map(|i| slice[i]).collect())
    }

    /// Returns the tensor data as a `Vec<f32>`.
    /// Errors if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, JnnError> {
        self.contiguous_data::<f32>()
    }

    /// Returns the tensor data as a `Vec<f64>`.
    /// Errors if the tensor is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, JnnError> {
        self.contiguous_data::<f64>()
    }

    /// Returns the elements widened to f64, whatever the dtype.
    pub fn to_vec_f64(&self) -> Result<Vec<f64>, JnnError> {
        with_dtype!(self.dtype(), T => {
            Ok(self
                .contiguous_data::<T>()?
                .into_iter()
                .map(JnnNumeric::as_f64)
                .collect())
        })
    }

    /// Physical buffer position of a logical coordinate.
    fn physical_offset(&self, index: &[usize]) -> Result<usize, JnnError> {
        let shape = self.shape();
        if index.len() != shape.len() || index.iter().zip(shape).any(|(&i, &d)| i >= d) {
            return Err(JnnError::IndexOutOfRange {
                index: index.to_vec(),
                shape: shape.to_vec(),
            });
        }
        Ok(self.data.offset
            + index
                .iter()
                .zip(self.strides())
                .map(|(&i, &s)| i * s)
                .sum::<usize>())
    }

    /// Reads one element, widened to f64.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index` has the wrong rank or exceeds a dimension.
    pub fn get(&self, index: &[usize]) -> Result<f64, JnnError> {
        let pos = self.physical_offset(index)?;
        let guard = self.read_buffer()?;
        Ok(match &*guard {
            Buffer::F32(v) => v[pos] as f64,
            Buffer::F64(v) => v[pos],
        })
    }

    /// Writes one element in place (visible to all views of the buffer).
    pub fn set(&self, index: &[usize], value: f64) -> Result<(), JnnError> {
        let pos = self.physical_offset(index)?;
        let mut guard = self.write_buffer()?;
        match &mut *guard {
            Buffer::F32(v) => v[pos] = value as f32,
            Buffer::F64(v) => v[pos] = value,
        }
        Ok(())
    }

    /// Returns the single value of a one-element tensor.
    pub fn item(&self) -> Result<f64, JnnError> {
        if self.numel() != 1 {
            return Err(JnnError::ShapeMismatch {
                expected: vec![],
                actual: self.shape().to_vec(),
                operation: "item".to_string(),
            });
        }
        let pos = self.physical_indices().next().unwrap_or(self.data.offset);
        let guard = self.read_buffer()?;
        Ok(match &*guard {
            Buffer::F32(v) => v[pos] as f64,
            Buffer::F64(v) => v[pos],
        })
    }
}

impl PartialEq for Tensor {
    /// Same dtype, same shape and bitwise-equal logical values.
    fn eq(&self, other: &Self) -> bool {
        if self.dtype() != other.dtype() || self.shape() != other.shape() {
            return false;
        }
        match (self.to_vec_f64(), other.to_vec_f64()) {
            (Ok(a), Ok(b)) => a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()),
            _ => false,
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Tensor");
        dbg.field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("is_view", &self.is_view());
        // Keep output bounded for large tensors.
        if self.numel() <= 16 {
            if let Ok(values) = self.to_vec_f64() {
                dbg.field("data", &values);
            }
        }
        dbg.finish()
    }
}
