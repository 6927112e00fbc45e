use crate::error::JnnError;
use crate::ops::view::make_view;
use crate::tensor::utils::check_dim;
use crate::tensor::Tensor;

/// Narrows `dim` to the half-open range `[start, end)`.
///
/// # Errors
/// `InvalidDimension` for a bad `dim`, `IndexOutOfRange` when the range is
/// empty or exceeds the dimension.
pub(crate) fn slice_op(tensor: &Tensor, dim: usize, start: usize, end: usize) -> Result<Tensor, JnnError> {
    check_dim(dim, tensor.rank())?;
    let size = tensor.shape()[dim];
    if start >= end || end > size {
        let mut index = vec![0; tensor.rank()];
        index[dim] = end.max(start);
        return Err(JnnError::IndexOutOfRange {
            index,
            shape: tensor.shape().to_vec(),
        });
    }
    let mut shape = tensor.shape().to_vec();
    shape[dim] = end - start;
    let offset = tensor.offset() + start * tensor.strides()[dim];
    Ok(make_view(tensor, offset, shape, tensor.strides().to_vec()))
}
