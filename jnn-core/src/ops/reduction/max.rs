use crate::error::JnnError;
use crate::ops::reduction::utils::{fold_axis, reduction_output_shape};
use crate::tensor::Tensor;
use crate::with_dtype;

/// Maximum along `axis`. `NaN` elements are ignored unless the whole slice is `NaN`.
pub fn max_axis_op(a: &Tensor, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let data = a.contiguous_data::<T>()?;
        let out = fold_axis(&data, a.shape(), axis, <T as num_traits::Float>::nan(), |acc, x| acc.max(x))?;
        Tensor::from_typed(out, reduction_output_shape(a.shape(), axis, keep_dim))
    })
}
