use crate::error::JnnError;
use crate::ops::reduction::utils::{fold_axis, reduction_output_shape};
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Sums every element into a rank-0 tensor.
pub fn sum_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let total = a
            .contiguous_data::<T>()?
            .into_iter()
            .fold(<T as num_traits::Zero>::zero(), |acc, x| acc + x);
        Tensor::from_typed(vec![total], vec![])
    })
}

/// Sums along `axis`. With `keep_dim` the axis stays with size 1.
///
/// # Errors
/// `InvalidDimension` if `axis >= rank`.
pub fn sum_axis_op(a: &Tensor, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let data = a.contiguous_data::<T>()?;
        let out = fold_axis(&data, a.shape(), axis, <T as num_traits::Zero>::zero(), |acc, x| acc + x)?;
        Tensor::from_typed(out, reduction_output_shape(a.shape(), axis, keep_dim))
    })
}

/// Sums `grad` down to `target`, undoing a broadcast from `target` to
/// `grad.shape()`.
///
/// Leading dimensions that broadcasting added are summed away; dimensions
/// that were 1 in `target` are summed with `keep_dim`.
///
/// # Errors
/// `ShapeMismatch` if `target` does not broadcast to `grad.shape()`.
pub fn reduce_to_shape_op(grad: &Tensor, target: &[usize]) -> Result<Tensor, JnnError> {
    let mismatch = || JnnError::ShapeMismatch {
        expected: target.to_vec(),
        actual: grad.shape().to_vec(),
        operation: "reduce_to_shape".to_string(),
    };
    if grad.shape() == target {
        return grad.contiguous();
    }
    if target.len() > grad.rank() || broadcast_shapes(grad.shape(), target).map_err(|_| mismatch())? != grad.shape() {
        return Err(mismatch());
    }

    let mut out = grad.clone();
    let rank_diff = grad.rank() - target.len();
    for _ in 0..rank_diff {
        out = sum_axis_op(&out, 0, false)?;
    }
    for (axis, &dim) in target.iter().enumerate() {
        if dim == 1 && out.shape()[axis] != 1 {
            out = sum_axis_op(&out, axis, true)?;
        }
    }
    if target.is_empty() {
        return Ok(out);
    }
    out.reshape(target.to_vec())
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
