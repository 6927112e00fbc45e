use num_traits::Zero;

use crate::error::JnnError;
use crate::ops::{check_same_dtype, check_same_shape};
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Softmax over the last dimension, max-subtracted for stability.
pub fn softmax_op(input: &Tensor) -> Result<Tensor, JnnError> {
    let n = input.shape().last().copied().unwrap_or(1);
    with_dtype!(input.dtype(), T => {
        let mut data = input.contiguous_data::<T>()?;
        for row in data.chunks_mut(n) {
            softmax_row(row);
        }
        Tensor::from_typed(data, input.shape().to_vec())
    })
}

fn softmax_row<T: JnnNumeric>(row: &mut [T]) {
    let max = row.iter().fold(T::neg_infinity(), |m, &x| m.max(x));
    let mut total = T::zero();
    for x in row.iter_mut() {
        *x = (*x - max).exp();
        total += *x;
    }
    for x in row.iter_mut() {
        *x /= total;
    }
}

/// Jacobian-vector product of softmax at the forward `output` `y`:
/// `dx_i = y_i * (g_i - sum_j g_j y_j)` per row of the last dimension.
pub fn softmax_backward_op(grad: &Tensor, output: &Tensor) -> Result<Tensor, JnnError> {
    check_same_shape(output, grad, "softmax_backward")?;
    check_same_dtype(output, grad, "softmax_backward")?;
    let n = output.shape().last().copied().unwrap_or(1);
    with_dtype!(output.dtype(), T => {
        let y = output.contiguous_data::<T>()?;
        let mut g = grad.contiguous_data::<T>()?;
        for (g_row, y_row) in g.chunks_mut(n).zip(y.chunks(n)) {
            let dot = g_row
                .iter()
                .zip(y_row)
                .fold(T::zero(), |acc, (&gi, &yi)| acc + gi * yi);
            for (gi, &yi) in g_row.iter_mut().zip(y_row) {
                *gi = yi * (*gi - dot);
            }
        }
        Tensor::from_typed(g, output.shape().to_vec())
    })
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
