//! Unary element-wise math functions.

use crate::error::JnnError;
use crate::ops::apply_unary_op;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

pub fn exp_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| x.exp()))
}

/// Natural logarithm. Non-positive inputs give `NaN` / `-inf` as in IEEE 754.
pub fn ln_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| x.ln()))
}

pub fn sqrt_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| x.sqrt()))
}

pub fn tanh_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| x.tanh()))
}

pub fn abs_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| x.abs()))
}

/// Clamps every element into `[min, max]`.
///
/// # Errors
/// `ConfigurationError` if `min > max`.
pub fn clamp_op(a: &Tensor, min: f64, max: f64) -> Result<Tensor, JnnError> {
    check_bounds(min, max)?;
    with_dtype!(a.dtype(), T => {
        let (lo, hi) = (T::from_f64(min), T::from_f64(max));
        apply_unary_op::<T, _>(a, move |x| x.max(lo).min(hi))
    })
}

/// Applies an arbitrary function, computed in f64 and stored back in the
/// tensor's dtype.
pub fn map_op<F>(a: &Tensor, f: F) -> Result<Tensor, JnnError>
where
    F: Fn(f64) -> f64,
{
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| T::from_f64(f(x.as_f64()))))
}

pub(crate) fn check_bounds(min: f64, max: f64) -> Result<(), JnnError> {
    if min > max {
        return Err(JnnError::ConfigurationError(format!(
            "clamp requires min <= max, got min={} max={}",
            min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "math_elem_test.rs"]
mod tests;
