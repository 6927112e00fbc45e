use crate::error::JnnError;
use crate::ops::check_same_dtype;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Matrix product of two rank-2 tensors: `[m, k] x [k, n] -> [m, n]`.
///
/// Either operand may be a strided view (e.g. the result of `t()`).
///
/// # Errors
/// `ShapeMismatch` if an operand is not rank 2 or the inner dimensions
/// differ, `DataTypeMismatch` if the dtypes differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, JnnError> {
    if a.rank() != 2 || b.rank() != 2 {
        return Err(JnnError::ShapeMismatch {
            expected: vec![2, 2],
            actual: vec![a.rank(), b.rank()],
            operation: "matmul (operand ranks)".to_string(),
        });
    }
    let (m, k) = (a.shape()[0], a.shape()[1]);
    let (k2, n) = (b.shape()[0], b.shape()[1]);
    if k != k2 {
        return Err(JnnError::ShapeMismatch {
            expected: vec![k, n],
            actual: b.shape().to_vec(),
            operation: "matmul".to_string(),
        });
    }
    check_same_dtype(a, b, "matmul")?;

    with_dtype!(a.dtype(), T => {
        let a_data = a.contiguous_data::<T>()?;
        let b_data = b.contiguous_data::<T>()?;
        let out = matmul_kernel(&a_data, &b_data, m, k, n);
        Tensor::from_typed(out, vec![m, n])
    })
}

/// Row-major `[m, k] x [k, n]`, i-p-j loop order for sequential access of `b`.
fn matmul_kernel<T: JnnNumeric>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        let out_row = &mut out[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
