use crate::error::JnnError;
use crate::ops::view::make_view;
use crate::tensor::utils::check_dim;
use crate::tensor::Tensor;

/// Removes `dim`, which must have size 1.
pub(crate) fn squeeze_op(tensor: &Tensor, dim: usize) -> Result<Tensor, JnnError> {
    check_dim(dim, tensor.rank())?;
    if tensor.shape()[dim] != 1 {
        let mut expected = tensor.shape().to_vec();
        expected[dim] = 1;
        return Err(JnnError::ShapeMismatch {
            expected,
            actual: tensor.shape().to_vec(),
            operation: "squeeze".to_string(),
        });
    }
    let mut shape = tensor.shape().to_vec();
    let mut strides = tensor.strides().to_vec();
    shape.remove(dim);
    strides.remove(dim);
    Ok(make_view(tensor, tensor.offset(), shape, strides))
}

/// Inserts a dimension of size 1 at `dim` (`dim <= rank`).
pub(crate) fn unsqueeze_op(tensor: &Tensor, dim: usize) -> Result<Tensor, JnnError> {
    check_dim(dim, tensor.rank() + 1)?;
    let mut shape = tensor.shape().to_vec();
    let mut strides = tensor.strides().to_vec();
    // Any stride works for a size-1 axis; keep it row-major consistent.
    let stride = if dim < strides.len() {
        strides[dim] * shape[dim]
    } else {
        1
    };
    shape.insert(dim, 1);
    strides.insert(dim, stride);
    Ok(make_view(tensor, tensor.offset(), shape, strides))
}
