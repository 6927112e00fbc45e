use crate::error::JnnError;
use crate::ops::traits::JnnNumeric;
use crate::tensor::utils::check_dim;

/// Output shape of a reduction along `axis`.
pub(crate) fn reduction_output_shape(shape: &[usize], axis: usize, keep_dim: bool) -> Vec<usize> {
    let mut out = shape.to_vec();
    if keep_dim {
        out[axis] = 1;
    } else {
        out.remove(axis);
    }
    out
}

/// Folds `data` (row-major, `shape`) along `axis`.
///
/// The tensor is viewed as `[outer, axis_len, inner]`; the result has
/// `outer * inner` elements in row-major order.
pub(crate) fn fold_axis<T, F>(data: &[T], shape: &[usize], axis: usize, init: T, f: F) -> Result<Vec<T>, JnnError>
where
    T: JnnNumeric,
    F: Fn(T, T) -> T,
{
    check_dim(axis, shape.len())?;
    let axis_len = shape[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();

    let mut out = vec![init; outer * inner];
    for o in 0..outer {
        for j in 0..axis_len {
            let base = (o * axis_len + j) * inner;
            let row = &data[base..base + inner];
            let acc = &mut out[o * inner..(o + 1) * inner];
            for (a, &v) in acc.iter_mut().zip(row) {
                *a = f(*a, v);
            }
        }
    }
    Ok(out)
}
