use crate::error::JnnError;
use crate::ops;
use crate::tensor::Tensor;
use crate::types::DType;

/// Non-mutating math. Every method returns a new, owning, contiguous tensor.
impl Tensor {
    /// Element-wise `self + other` with broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, JnnError> {
        ops::arithmetic::add_op(self, other)
    }

    /// Element-wise `self - other` with broadcasting.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, JnnError> {
        ops::arithmetic::sub_op(self, other)
    }

    /// Element-wise `self * other` with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, JnnError> {
        ops::arithmetic::mul_op(self, other)
    }

    /// Element-wise `self / other` with broadcasting.
    pub fn div(&self, other: &Tensor) -> Result<Tensor, JnnError> {
        ops::arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, JnnError> {
        ops::arithmetic::neg_op(self)
    }

    pub fn add_scalar(&self, scalar: f64) -> Result<Tensor, JnnError> {
        ops::arithmetic::add_scalar_op(self, scalar)
    }

    pub fn mul_scalar(&self, scalar: f64) -> Result<Tensor, JnnError> {
        ops::arithmetic::mul_scalar_op(self, scalar)
    }

    pub fn div_scalar(&self, scalar: f64) -> Result<Tensor, JnnError> {
        ops::arithmetic::div_scalar_op(self, scalar)
    }

    pub fn pow_scalar(&self, exponent: f64) -> Result<Tensor, JnnError> {
        ops::arithmetic::pow_scalar_op(self, exponent)
    }

    pub fn exp(&self) -> Result<Tensor, JnnError> {
        ops::math_elem::exp_op(self)
    }

    pub fn ln(&self) -> Result<Tensor, JnnError> {
        ops::math_elem::ln_op(self)
    }

    pub fn sqrt(&self) -> Result<Tensor, JnnError> {
        ops::math_elem::sqrt_op(self)
    }

    pub fn tanh(&self) -> Result<Tensor, JnnError> {
        ops::math_elem::tanh_op(self)
    }

    pub fn abs(&self) -> Result<Tensor, JnnError> {
        ops::math_elem::abs_op(self)
    }

    pub fn clamp(&self, min: f64, max: f64) -> Result<Tensor, JnnError> {
        ops::math_elem::clamp_op(self, min, max)
    }

    /// Applies `f` to every element (computed in f64, stored in `self`'s dtype).
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Result<Tensor, JnnError> {
        ops::math_elem::map_op(self, f)
    }

    /// Matrix product of two rank-2 tensors.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `self` is `[m, k]` and `other` is `[k, n]`.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, JnnError> {
        ops::linalg::matmul_op(self, other)
    }

    /// Sum of all elements as a rank-0 tensor.
    pub fn sum(&self) -> Result<Tensor, JnnError> {
        ops::reduction::sum_op(self)
    }

    pub fn sum_axis(&self, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
        ops::reduction::sum_axis_op(self, axis, keep_dim)
    }

    pub fn mean(&self) -> Result<Tensor, JnnError> {
        ops::reduction::mean_op(self)
    }

    pub fn mean_axis(&self, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
        ops::reduction::mean_axis_op(self, axis, keep_dim)
    }

    pub fn max_axis(&self, axis: usize, keep_dim: bool) -> Result<Tensor, JnnError> {
        ops::reduction::max_axis_op(self, axis, keep_dim)
    }

    /// Sums broadcast dimensions away so the result has shape `target`.
    pub fn reduce_to_shape(&self, target: &[usize]) -> Result<Tensor, JnnError> {
        ops::reduction::reduce_to_shape_op(self, target)
    }

    /// Returns a copy converted to `dtype`.
    pub fn to_dtype(&self, dtype: DType) -> Result<Tensor, JnnError> {
        ops::dtype::cast_op(self, dtype)
    }
}
