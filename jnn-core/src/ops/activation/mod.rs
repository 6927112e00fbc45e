//! Activation functions and their backward rules.
//!
//! Each `xxx_backward_op` takes the upstream gradient and the tensor the
//! derivative is evaluated at (input or output, as documented) and returns
//! the gradient with respect to the activation input.

pub mod gelu;
pub mod relu;
pub mod sigmoid;
pub mod softmax;
pub mod tanh;

pub use gelu::{gelu_backward_op, gelu_op};
pub use relu::{leaky_relu_backward_op, leaky_relu_op, relu_backward_op, relu_op};
pub use sigmoid::{sigmoid_backward_op, sigmoid_op};
pub use softmax::{softmax_backward_op, softmax_op};
pub use tanh::tanh_backward_op;

use crate::error::JnnError;
use crate::ops::{apply_binary_op, check_same_shape};
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;

/// `grad * f(at)` element-wise, with `grad` and `at` of identical shape.
pub(crate) fn apply_local_derivative<T, F>(grad: &Tensor, at: &Tensor, derivative: F, op_name: &str) -> Result<Tensor, JnnError>
where
    T: JnnNumeric,
    F: Fn(T) -> T,
{
    check_same_shape(at, grad, op_name)?;
    apply_binary_op::<T, _>(grad, at, |g, x| g * derivative(x), op_name)
}
