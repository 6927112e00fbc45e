use num_traits::One;

use crate::error::JnnError;
use crate::ops::activation::apply_local_derivative;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid_op(input: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        apply_unary_op::<T, _>(input, |x| T::one() / (T::one() + (-x).exp()))
    })
}

/// Gradient of the sigmoid evaluated at the forward `output` `y`: `g * y * (1 - y)`.
pub fn sigmoid_backward_op(grad: &Tensor, output: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(output.dtype(), T => {
        apply_local_derivative::<T, _>(grad, output, |y| y * (T::one() - y), "sigmoid_backward")
    })
}
