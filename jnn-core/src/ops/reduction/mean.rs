use crate::error::JnnError;
use crate::ops::arithmetic::div_scalar_op;
use crate::ops::reduction::{sum_axis_op, sum_op};
use crate::tensor::utils::check_dim;
use crate::tensor::Tensor;

/// Arithmetic mean of all elements, as a rank-0 tensor.
pub fn mean_op(a: &Tensor) -> Result<Tensor, JnnError> {
    div_scalar_op(&sum_op(a)?, a.numel() as f64)
}

/// Mean along `axis`.
pub fn mean_axis_op(a: &Tensor, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
    check_dim(axis, a.rank())?;
    div_scalar_op(&sum_axis_op(a, axis, keep_dim)?, a.shape()[axis] as f64)
}
