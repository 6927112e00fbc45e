// src/tensor/create.rs

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Normal, StandardNormal};

use crate::buffer::Buffer;
use crate::error::JnnError;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::with_dtype;

/// Creates a new tensor of `dtype` filled with `value`.
pub fn full(shape: &[usize], value: f64, dtype: DType) -> Result<Tensor, JnnError> {
    let numel = shape.iter().product();
    Tensor::from_buffer(Buffer::filled(dtype, numel, value), shape.to_vec())
}

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize], dtype: DType) -> Result<Tensor, JnnError> {
    full(shape, 0.0, dtype)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize], dtype: DType) -> Result<Tensor, JnnError> {
    full(shape, 1.0, dtype)
}

/// Creates a new tensor filled with zeros, having the same shape and DType as the input.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, JnnError> {
    zeros(tensor.shape(), tensor.dtype())
}

/// Creates a new tensor filled with ones, having the same shape and DType as the input.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, JnnError> {
    ones(tensor.shape(), tensor.dtype())
}

/// Creates a new F32 Tensor from a Vec<f32> and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, JnnError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new F64 Tensor from a Vec<f64> and shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, JnnError> {
    Tensor::new_f64(data_vec, shape)
}

/// Creates a rank-0 tensor holding `value`.
pub fn scalar(value: f64, dtype: DType) -> Result<Tensor, JnnError> {
    full(&[], value, dtype)
}

/// Creates a 1-D tensor `[start, start + step, ...)` stopping before `end`.
pub fn arange(start: f64, end: f64, step: f64, dtype: DType) -> Result<Tensor, JnnError> {
    if step == 0.0 || (end > start && step < 0.0) || (end < start && step > 0.0) || end == start {
        return Err(JnnError::ConfigurationError(format!(
            "Invalid step {} for arange({}, {})",
            step, start, end
        )));
    }
    let numel = ((end - start) / step).ceil() as usize;
    let values: Vec<f64> = (0..numel).map(|i| start + i as f64 * step).collect();
    with_dtype!(dtype, T => {
        Tensor::from_typed(values.into_iter().map(T::from_f64).collect::<Vec<T>>(), vec![numel])
    })
}

/// Samples each element uniformly from `[low, high)` using `rng`.
pub fn rand_uniform_with_rng<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, JnnError> {
    if !(low < high) {
        return Err(JnnError::ConfigurationError(format!(
            "Uniform bounds must satisfy low < high, got [{}, {})",
            low, high
        )));
    }
    let numel: usize = shape.iter().product();
    let dist = Uniform::new(low, high);
    with_dtype!(dtype, T => {
        let data: Vec<T> = (0..numel).map(|_| T::from_f64(dist.sample(rng))).collect();
        Tensor::from_typed(data, shape.to_vec())
    })
}

/// Samples each element uniformly from `[low, high)` using the thread RNG.
pub fn rand_uniform(shape: &[usize], low: f64, high: f64, dtype: DType) -> Result<Tensor, JnnError> {
    rand_uniform_with_rng(shape, low, high, dtype, &mut rand::thread_rng())
}

/// Samples each element from `N(mean, std^2)` using `rng`.
pub fn randn_with_rng<R: Rng + ?Sized>(
    shape: &[usize],
    mean: f64,
    std: f64,
    dtype: DType,
    rng: &mut R,
) -> Result<Tensor, JnnError> {
    let numel: usize = shape.iter().product();
    let values: Vec<f64> = if mean == 0.0 && std == 1.0 {
        (0..numel)
            .map(|_| Distribution::<f64>::sample(&StandardNormal, rng))
            .collect()
    } else {
        let dist = Normal::new(mean, std)
            .map_err(|e| JnnError::ConfigurationError(format!("Invalid normal distribution: {}", e)))?;
        (0..numel).map(|_| dist.sample(rng)).collect()
    };
    with_dtype!(dtype, T => {
        Tensor::from_typed(values.into_iter().map(T::from_f64).collect::<Vec<T>>(), shape.to_vec())
    })
}

/// Samples each element from the standard normal distribution.
pub fn randn(shape: &[usize], dtype: DType) -> Result<Tensor, JnnError> {
    randn_with_rng(shape, 0.0, 1.0, dtype, &mut rand::thread_rng())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
