use crate::error::JnnError;
use crate::ops::apply_unary_op;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Raises every element to `exponent`.
///
/// Integral exponents use `powi`, so squaring a negative number stays exact.
pub fn pow_scalar_op(a: &Tensor, exponent: f64) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
            let n = exponent as i32;
            apply_unary_op::<T, _>(a, move |x| x.powi(n))
        } else {
            let e = T::from_f64(exponent);
            apply_unary_op::<T, _>(a, move |x| x.powf(e))
        }
    })
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
