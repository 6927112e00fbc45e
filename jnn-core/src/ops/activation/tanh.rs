use num_traits::One;

use crate::error::JnnError;
use crate::ops::activation::apply_local_derivative;
use crate::tensor::Tensor;
use crate::with_dtype;

// Forward is `ops::math_elem::tanh_op`.

/// Gradient of tanh evaluated at the forward `output` `y`: `g * (1 - y^2)`.
pub fn tanh_backward_op(grad: &Tensor, output: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(output.dtype(), T => {
        apply_local_derivative::<T, _>(grad, output, |y| T::one() - y * y, "tanh_backward")
    })
}
