pub mod activation;
pub mod embedding;
pub mod layer_norm;
pub mod linear;

pub use activation::{Activation, ActivationKind};
pub use embedding::Embedding;
pub use layer_norm::LayerNorm;
pub use linear::Linear;

use crate::error::JnnError;
use crate::tensor::Tensor;

/// Checks that the last dimension of `input` is `expected`.
pub(crate) fn check_last_dim(input: &Tensor, expected: usize, operation: &str) -> Result<(), JnnError> {
    if input.shape().last() != Some(&expected) {
        let mut want = input.shape().to_vec();
        match want.last_mut() {
            Some(last) => *last = expected,
            None => want.push(expected),
        }
        return Err(JnnError::ShapeMismatch {
            expected: want,
            actual: input.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Checks that a backward gradient has the forward output's shape.
pub(crate) fn check_grad_shape(grad: &Tensor, output_shape: &[usize], operation: &str) -> Result<(), JnnError> {
    if grad.shape() != output_shape {
        return Err(JnnError::ShapeMismatch {
            expected: output_shape.to_vec(),
            actual: grad.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}
