use std::cmp::max;

use crate::error::JnnError;

/// Calculates the row-major strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
///
/// # Errors
/// `JnnError::ShapeMismatch` when some pair of dimensions is incompatible.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, JnnError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = if i < rank_a { shape_a[rank_a - 1 - i] } else { 1 };
        let dim_b = if i < rank_b { shape_b[rank_b - 1 - i] } else { 1 };

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(JnnError::ShapeMismatch {
                expected: shape_a.to_vec(),
                actual: shape_b.to_vec(),
                operation: "broadcast".to_string(),
            });
        };
    }
    Ok(result_shape)
}

/// Strides that read a tensor of `shape`/`strides` as if it had `target_shape`.
///
/// Broadcast dimensions (missing on the left, or of size 1) get stride 0 so the
/// same element is revisited. The caller guarantees `shape` broadcasts to
/// `target_shape`.
pub fn broadcast_strides(shape: &[usize], strides: &[usize], target_shape: &[usize]) -> Vec<usize> {
    let rank_diff = target_shape.len() - shape.len();
    let mut out = vec![0; target_shape.len()];
    for (i, (&dim, &stride)) in shape.iter().zip(strides.iter()).enumerate() {
        if dim == target_shape[rank_diff + i] {
            out[rank_diff + i] = stride;
        }
    }
    out
}

/// Checks that `dim` addresses an axis of a rank-`rank` tensor.
pub fn check_dim(dim: usize, rank: usize) -> Result<(), JnnError> {
    if dim >= rank {
        return Err(JnnError::InvalidDimension { dim, rank });
    }
    Ok(())
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
