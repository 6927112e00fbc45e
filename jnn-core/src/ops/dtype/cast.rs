use crate::error::JnnError;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::with_dtype;

/// Converts a tensor to `new_dtype`, returning a new owning tensor.
///
/// Widening F32 -> F64 is exact; narrowing rounds to nearest. Casting to the
/// current dtype still copies, so the result never aliases the input.
pub fn cast_op(tensor: &Tensor, new_dtype: DType) -> Result<Tensor, JnnError> {
    let values = tensor.to_vec_f64()?;
    with_dtype!(new_dtype, T => {
        let data: Vec<T> = values.into_iter().map(T::from_f64).collect();
        Tensor::from_typed(data, tensor.shape().to_vec())
    })
}

#[cfg(test)]
#[path = "cast_test.rs"]
mod tests;
