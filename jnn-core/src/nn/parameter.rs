use std::fmt;
use std::ops::Deref;

use crate::error::JnnError;
use crate::tensor::Tensor;
use crate::types::DType;

/// A named, trainable tensor with an accumulated gradient.
///
/// The gradient is allocated by the first [`accumulate_grad`](Self::accumulate_grad)
/// and dropped by [`zero_grad`](Self::zero_grad), so a parameter no backward
/// pass touched since the last reset reports `grad() == None`.
///
/// Derefs to the value tensor for read access.
pub struct Parameter {
    name: String,
    value: Tensor,
    grad: Option<Tensor>,
}

impl Parameter {
    /// Wraps `value` under `name`. The name must be unique within the owning module.
    pub fn new(name: impl Into<String>, value: Tensor) -> Self {
        Parameter {
            name: name.into(),
            value,
            grad: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    /// Mutable access to the value, for in-place updates (`add_`, `sub_`, ...).
    pub fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    /// Replaces the value.
    ///
    /// # Errors
    /// `ShapeMismatch` / `DataTypeMismatch` if `value` differs from the
    /// current value in shape or dtype.
    pub fn set_value(&mut self, value: Tensor) -> Result<(), JnnError> {
        self.check_compatible(&value, "set_value")?;
        self.value = value;
        Ok(())
    }

    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    pub fn grad_mut(&mut self) -> Option<&mut Tensor> {
        self.grad.as_mut()
    }

    /// Adds `delta` into the gradient, allocating it on first use.
    ///
    /// # Errors
    /// `ShapeMismatch` if `delta.shape() != self.shape()`, `DataTypeMismatch`
    /// if the dtypes differ. The gradient is left unchanged on error.
    pub fn accumulate_grad(&mut self, delta: &Tensor) -> Result<(), JnnError> {
        self.check_compatible(delta, "accumulate_grad")?;
        match self.grad.as_mut() {
            Some(grad) => grad.add_(delta)?,
            // Copy so the gradient never aliases the caller's buffer.
            None => self.grad = Some(delta.contiguous()?),
        }
        Ok(())
    }

    /// Drops the gradient.
    pub fn zero_grad(&mut self) {
        self.grad = None;
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn dtype(&self) -> DType {
        self.value.dtype()
    }

    pub fn numel(&self) -> usize {
        self.value.numel()
    }

    fn check_compatible(&self, other: &Tensor, operation: &str) -> Result<(), JnnError> {
        if other.shape() != self.shape() {
            return Err(JnnError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: other.shape().to_vec(),
                operation: format!("{} on parameter '{}'", operation, self.name),
            });
        }
        if other.dtype() != self.dtype() {
            return Err(JnnError::DataTypeMismatch {
                expected: self.dtype(),
                actual: other.dtype(),
                operation: format!("{} on parameter '{}'", operation, self.name),
            });
        }
        Ok(())
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("has_grad", &self.grad.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
