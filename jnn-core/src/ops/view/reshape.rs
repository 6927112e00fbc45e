use crate::error::JnnError;
use crate::ops::view::make_view;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Reinterprets `tensor` with `new_shape`.
///
/// Returns a view when the input is contiguous; otherwise the elements are
/// copied into a fresh buffer that the result owns.
pub(crate) fn reshape_op(tensor: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, JnnError> {
    let new_numel: usize = new_shape.iter().product();
    if new_numel != tensor.numel() || new_shape.contains(&0) {
        return Err(JnnError::ShapeMismatch {
            expected: tensor.shape().to_vec(),
            actual: new_shape,
            operation: "reshape".to_string(),
        });
    }
    if tensor.is_contiguous() {
        let strides = calculate_strides(&new_shape);
        return Ok(make_view(tensor, tensor.offset(), new_shape, strides));
    }
    with_dtype!(tensor.dtype(), T => {
        Tensor::from_typed(tensor.contiguous_data::<T>()?, new_shape)
    })
}
