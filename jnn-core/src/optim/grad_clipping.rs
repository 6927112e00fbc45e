use crate::error::JnnError;
use crate::nn::parameter::Parameter;
use crate::ops::math_elem::check_bounds;

/// Clamps every gradient element into `[min, max]` in place.
///
/// Parameters without a gradient are left alone.
///
/// # Errors
/// `ConfigurationError` if `min > max`.
pub fn clip_grad_value_<'a>(
    parameters: impl IntoIterator<Item = &'a mut Parameter>,
    min: f64,
    max: f64,
) -> Result<(), JnnError> {
    check_bounds(min, max)?;
    for param in parameters {
        if let Some(grad) = param.grad_mut() {
            grad.clamp_(min, max)?;
        }
    }
    Ok(())
}

/// Rescales all gradients so their joint L2 norm is at most `max_norm`.
///
/// The gradients are treated as one concatenated vector. Returns the norm
/// measured before clipping.
///
/// # Errors
/// `ConfigurationError` if `max_norm` is negative or not finite.
pub fn clip_grad_norm_<'a>(
    parameters: impl IntoIterator<Item = &'a mut Parameter>,
    max_norm: f64,
) -> Result<f64, JnnError> {
    if !(max_norm >= 0.0) || !max_norm.is_finite() {
        return Err(JnnError::ConfigurationError(format!(
            "max_norm must be non-negative and finite, got {}",
            max_norm
        )));
    }
    let mut params: Vec<&'a mut Parameter> = parameters.into_iter().collect();

    let mut sum_sq = 0.0;
    for param in params.iter() {
        if let Some(grad) = param.grad() {
            sum_sq += grad.to_vec_f64()?.iter().map(|g| g * g).sum::<f64>();
        }
    }
    let total_norm = sum_sq.sqrt();

    if total_norm > max_norm {
        let coef = max_norm / (total_norm + 1e-6);
        for param in params.iter_mut() {
            if let Some(grad) = param.grad_mut() {
                grad.mul_scalar_(coef)?;
            }
        }
    }
    Ok(total_norm)
}

#[cfg(test)]
#[path = "grad_clipping_test.rs"]
mod tests;
