use crate::error::JnnError;
use crate::ops::view::make_view;
use crate::tensor::utils::check_dim;
use crate::tensor::Tensor;

/// Swaps `dim0` and `dim1` by swapping their sizes and strides.
pub(crate) fn transpose_op(tensor: &Tensor, dim0: usize, dim1: usize) -> Result<Tensor, JnnError> {
    let rank = tensor.rank();
    check_dim(dim0, rank)?;
    check_dim(dim1, rank)?;

    let mut shape = tensor.shape().to_vec();
    let mut strides = tensor.strides().to_vec();
    shape.swap(dim0, dim1);
    strides.swap(dim0, dim1);
    Ok(make_view(tensor, tensor.offset(), shape, strides))
}
