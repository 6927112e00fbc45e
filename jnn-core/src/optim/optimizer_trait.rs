use std::fmt::Debug;

use crate::error::JnnError;
use crate::nn::parameter::Parameter;

/// Trait defining the common interface for all optimizers.
pub trait Optimizer: Debug + Send {
    /// Applies one update to every parameter that has a gradient.
    ///
    /// Parameters without a gradient are skipped and keep their state slot.
    /// `params` must come in the same order on every call.
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), JnnError>;

    fn learning_rate(&self) -> f64;

    /// # Errors
    /// `ConfigurationError` unless `lr` is positive and finite.
    fn set_learning_rate(&mut self, lr: f64) -> Result<(), JnnError>;

    /// Number of completed `step` calls.
    fn steps(&self) -> u64;
}
