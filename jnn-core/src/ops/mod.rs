//! # Tensor Operations Module (`ops`)
//!
//! Kernels behind the [`Tensor`] methods, grouped by category. Each operation
//! has a `xxx_op` function (usually `pub(crate)`) called by the matching
//! method on `Tensor`.
//!
//! ## Structure:
//!
//! - **Kernels are generic** over [`JnnNumeric`](traits::JnnNumeric) and
//!   dispatched on the runtime dtype with [`with_dtype!`](crate::with_dtype).
//! - **Results are fresh**: every operation here returns a new, owning,
//!   contiguous tensor, except the layout operations in [`view`].
//! - **Inputs may be strided**: views (transposed, sliced) are read through
//!   their strides, never rejected for being non-contiguous.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: element-wise arithmetic with broadcasting, scalar variants.
//! - [`math_elem`]: unary element-wise math (exp, ln, sqrt, tanh, ...).
//! - [`linalg`]: matrix multiplication.
//! - [`reduction`]: sum / mean / max over all elements or one axis.
//! - [`activation`]: activation functions and their derivatives.
//! - [`view`]: reshape, transpose, slice, squeeze/unsqueeze, contiguous.
//! - [`dtype`]: dtype conversion.

pub mod activation;
pub mod arithmetic;
pub mod dtype;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod traits;
pub mod view;

use crate::error::JnnError;
use crate::tensor::iter_utils::StridedIndexIter;
use crate::tensor::utils::{broadcast_shapes, broadcast_strides, calculate_strides};
use crate::tensor::Tensor;
use traits::JnnNumeric;

/// Applies `op` to every element of `a` (read through its strides).
pub(crate) fn apply_unary_op<T, F>(a: &Tensor, op: F) -> Result<Tensor, JnnError>
where
    T: JnnNumeric,
    F: Fn(T) -> T,
{
    let data: Vec<T> = a.contiguous_data::<T>()?.into_iter().map(op).collect();
    Tensor::from_typed(data, a.shape().to_vec())
}

/// Applies `op` pairwise after broadcasting `a` and `b` to a common shape.
///
/// # Errors
/// `DataTypeMismatch` when the dtypes differ, `ShapeMismatch` when the shapes
/// do not broadcast.
pub(crate) fn apply_binary_op<T, F>(a: &Tensor, b: &Tensor, op: F, op_name: &str) -> Result<Tensor, JnnError>
where
    T: JnnNumeric,
    F: Fn(T, T) -> T,
{
    check_same_dtype(a, b, op_name)?;
    let out_shape = broadcast_shapes(a.shape(), b.shape()).map_err(|_| JnnError::ShapeMismatch {
        expected: a.shape().to_vec(),
        actual: b.shape().to_vec(),
        operation: op_name.to_string(),
    })?;

    // Each operand is copied out first, so `a` and `b` may share a buffer.
    let a_data = a.contiguous_data::<T>()?;
    let b_data = b.contiguous_data::<T>()?;

    if a.shape() == b.shape() {
        let data: Vec<T> = a_data.iter().zip(b_data.iter()).map(|(&x, &y)| op(x, y)).collect();
        return Tensor::from_typed(data, out_shape);
    }

    let a_strides = broadcast_strides(a.shape(), &calculate_strides(a.shape()), &out_shape);
    let b_strides = broadcast_strides(b.shape(), &calculate_strides(b.shape()), &out_shape);
    let data: Vec<T> = StridedIndexIter::new(&out_shape, &a_strides, 0)
        .zip(StridedIndexIter::new(&out_shape, &b_strides, 0))
        .map(|(i, j)| op(a_data[i], b_data[j]))
        .collect();
    Tensor::from_typed(data, out_shape)
}

pub(crate) fn check_same_dtype(a: &Tensor, b: &Tensor, op_name: &str) -> Result<(), JnnError> {
    if a.dtype() != b.dtype() {
        return Err(JnnError::DataTypeMismatch {
            expected: a.dtype(),
            actual: b.dtype(),
            operation: op_name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_same_shape(a: &Tensor, b: &Tensor, op_name: &str) -> Result<(), JnnError> {
    if a.shape() != b.shape() {
        return Err(JnnError::ShapeMismatch {
            expected: a.shape().to_vec(),
            actual: b.shape().to_vec(),
            operation: op_name.to_string(),
        });
    }
    Ok(())
}
