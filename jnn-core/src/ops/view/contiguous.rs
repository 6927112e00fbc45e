use crate::error::JnnError;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Copies the logical elements of `tensor` into a fresh row-major buffer.
///
/// The result always owns its buffer, even when the input was already
/// contiguous.
pub(crate) fn contiguous_op(tensor: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(tensor.dtype(), T => {
        let data = tensor.contiguous_data::<T>()?;
        Tensor::from_typed(data, tensor.shape().to_vec())
    })
}
