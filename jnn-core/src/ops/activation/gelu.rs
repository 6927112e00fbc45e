use num_traits::One;

use crate::error::JnnError;
use crate::ops::activation::apply_local_derivative;
use crate::ops::apply_unary_op;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

const GELU_COEFF: f64 = 0.044715;
// sqrt(2 / pi)
const SQRT_2_OVER_PI: f64 = 0.797_884_560_802_865_4;

/// GELU, tanh approximation: `0.5 x (1 + tanh(sqrt(2/pi) (x + 0.044715 x^3)))`.
pub fn gelu_op(input: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let (half, one) = (T::from_f64(0.5), T::one());
        let (c, k) = (T::from_f64(SQRT_2_OVER_PI), T::from_f64(GELU_COEFF));
        apply_unary_op::<T, _>(input, move |x| half * x * (one + (c * (x + k * x * x * x)).tanh()))
    })
}

/// Gradient of GELU evaluated at the forward `input`.
pub fn gelu_backward_op(grad: &Tensor, input: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(input.dtype(), T => {
        let (half, one, three) = (T::from_f64(0.5), T::one(), T::from_f64(3.0));
        let (c, k) = (T::from_f64(SQRT_2_OVER_PI), T::from_f64(GELU_COEFF));
        apply_local_derivative::<T, _>(
            grad,
            input,
            move |x| {
                let t = (c * (x + k * x * x * x)).tanh();
                half * (one + t) + half * x * (one - t * t) * c * (one + three * k * x * x)
            },
            "gelu_backward",
        )
    })
}
