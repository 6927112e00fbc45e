use log::{debug, trace};

use crate::error::JnnError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_state::StateSlots;
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::{check_learning_rate, check_non_negative};
use crate::tensor::Tensor;

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// Supports momentum, weight decay (L2 penalty added to the gradient), and
/// Nesterov momentum:
///
/// ```text
/// d   = grad + weight_decay * p
/// buf = momentum * buf + d
/// p  -= lr * (nesterov ? d + momentum * buf : buf)
/// ```
#[derive(Debug)]
pub struct SgdOptimizer {
    lr: f64,
    momentum: f64,
    weight_decay: f64,
    nesterov: bool,
    momentum_buffers: StateSlots<Tensor>,
    steps: u64,
}

impl SgdOptimizer {
    /// Plain SGD: `p -= lr * grad`.
    pub fn new(lr: f64) -> Result<Self, JnnError> {
        Self::with_options(lr, 0.0, 0.0, false)
    }

    /// # Errors
    /// `ConfigurationError` for a non-positive `lr`, negative `momentum` or
    /// `weight_decay`, or `nesterov` without momentum.
    pub fn with_options(lr: f64, momentum: f64, weight_decay: f64, nesterov: bool) -> Result<Self, JnnError> {
        check_learning_rate(lr)?;
        check_non_negative("momentum", momentum)?;
        check_non_negative("weight_decay", weight_decay)?;
        if nesterov && momentum == 0.0 {
            return Err(JnnError::ConfigurationError(
                "Nesterov momentum requires a positive momentum".to_string(),
            ));
        }
        debug!(
            "SGD created: lr={}, momentum={}, weight_decay={}, nesterov={}",
            lr, momentum, weight_decay, nesterov
        );
        Ok(SgdOptimizer {
            lr,
            momentum,
            weight_decay,
            nesterov,
            momentum_buffers: StateSlots::default(),
            steps: 0,
        })
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }

    pub fn nesterov(&self) -> bool {
        self.nesterov
    }

    /// Drops all momentum buffers.
    pub fn reset_state(&mut self) {
        self.momentum_buffers.clear();
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), JnnError> {
        for (index, param) in params.iter_mut().enumerate() {
            let grad = match param.grad() {
                Some(g) => g.clone(),
                None => {
                    trace!("SGD: parameter #{} ('{}') has no gradient, skipped", index, param.name());
                    continue;
                }
            };

            let mut d_p = grad;
            if self.weight_decay != 0.0 {
                d_p = d_p.add(&param.value().mul_scalar(self.weight_decay)?)?;
            }

            let update = if self.momentum != 0.0 {
                let buf = self
                    .momentum_buffers
                    .slot(index, &**param, || crate::tensor::zeros_like(&d_p))?;
                buf.mul_scalar_(self.momentum)?;
                buf.add_(&d_p)?;
                if self.nesterov {
                    d_p.add(&buf.mul_scalar(self.momentum)?)?
                } else {
                    buf.contiguous()?
                }
            } else {
                d_p
            };

            param.value_mut().sub_(&update.mul_scalar(self.lr)?)?;
        }
        self.steps += 1;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), JnnError> {
        check_learning_rate(lr)?;
        self.lr = lr;
        Ok(())
    }

    fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
