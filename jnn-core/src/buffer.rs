use std::fmt::Debug;

use crate::error::JnnError;
use crate::ops::traits::JnnNumeric;
use crate::types::DType;

/// Typed flat storage backing one or more tensors.
///
/// A buffer is always shared through `Arc<RwLock<Buffer>>` (see
/// [`TensorData`](crate::tensor_data::TensorData)), so views and their base
/// tensor observe the same elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Vec<f32>),
    /// Buffer holding f64 data.
    F64(Vec<f64>),
}

impl Buffer {
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(v) => v.len(),
            Buffer::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocates a buffer of `len` copies of `value` converted to `dtype`.
    pub fn filled(dtype: DType, len: usize, value: f64) -> Self {
        match dtype {
            DType::F32 => Buffer::F32(vec![value as f32; len]),
            DType::F64 => Buffer::F64(vec![value; len]),
        }
    }

    /// Returns the slice if the buffer holds `T`, or a `DataTypeMismatch` error.
    pub fn try_as_slice<T: JnnNumeric>(&self) -> Result<&[T], JnnError> {
        T::slice_of(self).ok_or_else(|| JnnError::DataTypeMismatch {
            expected: T::DTYPE,
            actual: self.dtype(),
            operation: "buffer access".to_string(),
        })
    }

    pub fn try_as_mut_slice<T: JnnNumeric>(&mut self) -> Result<&mut [T], JnnError> {
        let actual = self.dtype();
        T::slice_of_mut(self).ok_or_else(|| JnnError::DataTypeMismatch {
            expected: T::DTYPE,
            actual,
            operation: "buffer access".to_string(),
        })
    }
}
