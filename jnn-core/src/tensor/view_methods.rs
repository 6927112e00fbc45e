use crate::error::JnnError;
use crate::ops::view;
use crate::tensor::Tensor;

/// Layout methods. Except for `contiguous` (and `reshape` of a non-contiguous
/// tensor) the results share `self`'s buffer: `is_view()` is `true` and
/// in-place writes through either handle are visible to both.
impl Tensor {
    /// Returns a tensor with the same elements and `new_shape`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the element counts differ.
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, JnnError> {
        view::reshape_op(self, new_shape)
    }

    /// Flattens every dimension into one.
    pub fn flatten(&self) -> Result<Tensor, JnnError> {
        self.reshape(vec![self.numel()])
    }

    /// Swaps two dimensions without moving data.
    ///
    /// # Errors
    /// `InvalidDimension` if either dimension is out of range.
    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Tensor, JnnError> {
        view::transpose_op(self, dim0, dim1)
    }

    /// Transposes the last two dimensions (matrix transpose for rank 2).
    pub fn t(&self) -> Result<Tensor, JnnError> {
        let rank = self.rank();
        if rank < 2 {
            return Err(JnnError::InvalidDimension { dim: 1, rank });
        }
        self.transpose(rank - 2, rank - 1)
    }

    /// Restricts `dim` to `[start, end)`.
    pub fn slice(&self, dim: usize, start: usize, end: usize) -> Result<Tensor, JnnError> {
        view::slice_op(self, dim, start, end)
    }

    pub fn squeeze(&self, dim: usize) -> Result<Tensor, JnnError> {
        view::squeeze_op(self, dim)
    }

    pub fn unsqueeze(&self, dim: usize) -> Result<Tensor, JnnError> {
        view::unsqueeze_op(self, dim)
    }

    /// Materialises the logical elements into a new, owning, row-major tensor.
    pub fn contiguous(&self) -> Result<Tensor, JnnError> {
        view::contiguous_op(self)
    }
}

#[cfg(test)]
#[path = "view_methods_test.rs"]
mod tests;
