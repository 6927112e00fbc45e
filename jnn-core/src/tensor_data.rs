// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::buffer::Buffer;
use crate::error::JnnError;
use crate::tensor::utils::calculate_strides;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// Metadata (shape, strides, offset) is fixed once the `TensorData` exists;
/// only the elements inside the shared buffer can change. The buffer sits behind
/// `Arc<RwLock<_>>`, so its lifetime is that of the longest holder and a view
/// never outlives the storage it reads.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying data buffer, shared by views.
    pub(crate) buffer: Arc<RwLock<Buffer>>,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// Elements to skip in the buffer to move one step along each dimension.
    pub(crate) strides: Vec<usize>,
    /// The offset into the buffer for the first element (used for views).
    pub(crate) offset: usize,
    /// `true` when this tensor borrows another tensor's buffer.
    pub(crate) is_view: bool,
}

impl TensorData {
    /// Creates an owning `TensorData` from a freshly allocated buffer.
    ///
    /// # Errors
    /// Returns `JnnError::TensorCreationError` if the buffer length does not match
    /// the number of elements implied by `shape`.
    pub fn new(buffer: Buffer, shape: Vec<usize>) -> Result<Self, JnnError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(JnnError::TensorCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer: Arc::new(RwLock::new(buffer)),
            shape,
            strides,
            offset: 0,
            is_view: false,
        })
    }

    /// Creates a `TensorData` that reads `buffer` through new metadata.
    /// (Used internally by view operations like slice, transpose, etc.)
    pub(crate) fn new_view(
        buffer: Arc<RwLock<Buffer>>,
        dtype: DType,
        offset: usize,
        shape: Vec<usize>,
        strides: Vec<usize>,
    ) -> Self {
        TensorData {
            buffer,
            dtype,
            shape,
            strides,
            offset,
            is_view: true,
        }
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Checks if the tensor is C-contiguous (row-major) in memory.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1;
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()).rev() {
            if dim > 1 && stride != expected {
                return false;
            }
            expected *= dim;
        }
        true
    }

    pub(crate) fn read_buffer(&self) -> Result<RwLockReadGuard<'_, Buffer>, JnnError> {
        self.buffer.read().map_err(|e| JnnError::LockError {
            lock_type: "read".to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) fn write_buffer(&self) -> Result<RwLockWriteGuard<'_, Buffer>, JnnError> {
        self.buffer.write().map_err(|e| JnnError::LockError {
            lock_type: "write".to_string(),
            reason: e.to_string(),
        })
    }
}
