use num_traits::{One, Zero};

use crate::error::JnnError;
use crate::ops::activation::apply_local_derivative;
use crate::ops::apply_unary_op;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

/// `max(x, 0)` element-wise.
pub fn relu_op(input: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let zero = T::zero();
        apply_unary_op::<T, _>(input, move |x| if x > zero { x } else { zero })
    })
}

/// Gradient of ReLU evaluated at the forward `input` (derivative 0 at `x == 0`).
pub fn relu_backward_op(grad: &Tensor, input: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let (zero, one) = (T::zero(), T::one());
        apply_local_derivative::<T, _>(grad, input, move |x| if x > zero { one } else { zero }, "relu_backward")
    })
}

/// `x` for positive inputs, `alpha * x` otherwise.
pub fn leaky_relu_op(input: &Tensor, alpha: f64) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let (zero, a) = (T::zero(), T::from_f64(alpha));
        apply_unary_op::<T, _>(input, move |x| if x > zero { x } else { a * x })
    })
}

pub fn leaky_relu_backward_op(grad: &Tensor, input: &Tensor, alpha: f64) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let (zero, one, a) = (T::zero(), T::one(), T::from_f64(alpha));
        apply_local_derivative::<T, _>(grad, input, move |x| if x > zero { one } else { a }, "leaky_relu_backward")
    })
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
