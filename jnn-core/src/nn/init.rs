//! Parameter initialisers.
//!
//! The `*_with_rng` variants take any [`rand::Rng`] so initialisation can be
//! made reproducible with `StdRng::seed_from_u64`.

use rand::Rng;

use crate::error::JnnError;
use crate::tensor::create::{rand_uniform_with_rng, randn_with_rng};
use crate::tensor::Tensor;
use crate::types::DType;

/// Fills `tensor` with 0 in place.
pub fn zeros_(tensor: &mut Tensor) -> Result<(), JnnError> {
    tensor.fill_(0.0)
}

/// Fills `tensor` with 1 in place.
pub fn ones_(tensor: &mut Tensor) -> Result<(), JnnError> {
    tensor.fill_(1.0)
}

/// Overwrites `tensor` with samples from `U(low, high)`.
pub fn uniform_<R: Rng + ?Sized>(tensor: &mut Tensor, low: f64, high: f64, rng: &mut R) -> Result<(), JnnError> {
    let sample = rand_uniform_with_rng(tensor.shape(), low, high, tensor.dtype(), rng)?;
    tensor.copy_from_(&sample)
}

/// Overwrites `tensor` with samples from `N(mean, std^2)`.
pub fn normal_<R: Rng + ?Sized>(tensor: &mut Tensor, mean: f64, std: f64, rng: &mut R) -> Result<(), JnnError> {
    let sample = randn_with_rng(tensor.shape(), mean, std, tensor.dtype(), rng)?;
    tensor.copy_from_(&sample)
}

/// `U(-1/sqrt(fan_in), 1/sqrt(fan_in))`, the default for `Linear`.
pub fn fan_in_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, JnnError> {
    let bound = 1.0 / (fan_in as f64).sqrt();
    rand_uniform_with_rng(shape, -bound, bound, dtype, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
