//! Optimizers for training neural networks.
//!
//! An optimizer updates parameter values in place from their accumulated
//! gradients. It does not own the parameters: every `step` receives them
//! from the caller (usually `module.parameters_mut()`), always in the same
//! order, and per-parameter state is keyed by that position. Zeroing
//! gradients stays the caller's job.

pub mod adam;
pub mod config;
pub mod grad_clipping;
pub mod optimizer_state;
pub mod optimizer_trait;
pub mod sgd;

pub use adam::AdamOptimizer;
pub use config::OptimizerConfig;
pub use grad_clipping::{clip_grad_norm_, clip_grad_value_};
pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;

use crate::error::JnnError;

pub(crate) fn check_learning_rate(lr: f64) -> Result<(), JnnError> {
    if !(lr > 0.0) || !lr.is_finite() {
        return Err(JnnError::ConfigurationError(format!(
            "Learning rate must be positive and finite, got {}",
            lr
        )));
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<(), JnnError> {
    if !(value >= 0.0) {
        return Err(JnnError::ConfigurationError(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}
