use crate::error::JnnError;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Element-wise division (`a / b`) with NumPy-style broadcasting.
///
/// # Errors
/// `ShapeMismatch` if the shapes cannot be broadcast together,
/// `DataTypeMismatch` if the dtypes differ.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_binary_op::<T, _>(a, b, |x, y| x / y, "div"))
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
