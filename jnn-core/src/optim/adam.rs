use log::{debug, trace};

use crate::error::JnnError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_state::{ParamState, StateSlots};
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::{check_learning_rate, check_non_negative};
use crate::tensor::{zeros_like, Tensor};

pub const DEFAULT_BETAS: (f64, f64) = (0.9, 0.999);
pub const DEFAULT_EPS: f64 = 1e-8;
/// Weight decay used by [`AdamOptimizer::adamw`].
pub const DEFAULT_ADAMW_WEIGHT_DECAY: f64 = 0.01;

/// Moment estimates for one parameter.
#[derive(Debug)]
struct AdamParamState {
    /// First moment (moving average of gradients).
    m: Tensor,
    /// Second moment (moving average of squared gradients).
    v: Tensor,
}

impl ParamState for AdamParamState {
    fn fits(&self, param: &Parameter) -> bool {
        self.m.fits(param)
    }
}

/// Adam and AdamW Optimizer.
///
/// With `decoupled == false`, weight decay is an L2 term added to the
/// gradient before the moment updates. With `decoupled == true` (AdamW) the
/// parameter is shrunk directly by `lr * weight_decay * p`, independently of
/// the adaptive step.
#[derive(Debug)]
pub struct AdamOptimizer {
    lr: f64,
    beta1: f64,
    beta2: f64,
    eps: f64,
    weight_decay: f64,
    decoupled: bool,
    state: StateSlots<AdamParamState>,
    steps: u64,
}

impl AdamOptimizer {
    /// Adam with default betas and eps, no weight decay.
    pub fn new(lr: f64) -> Result<Self, JnnError> {
        Self::with_options(lr, DEFAULT_BETAS, DEFAULT_EPS, 0.0, false)
    }

    /// AdamW with default betas, eps and a weight decay of 0.01.
    pub fn adamw(lr: f64) -> Result<Self, JnnError> {
        Self::with_options(lr, DEFAULT_BETAS, DEFAULT_EPS, DEFAULT_ADAMW_WEIGHT_DECAY, true)
    }

    /// # Errors
    /// `ConfigurationError` unless `lr > 0`, both betas are in `[0, 1)`,
    /// `eps > 0` and `weight_decay >= 0`.
    pub fn with_options(
        lr: f64,
        betas: (f64, f64),
        eps: f64,
        weight_decay: f64,
        decoupled: bool,
    ) -> Result<Self, JnnError> {
        check_learning_rate(lr)?;
        let (beta1, beta2) = betas;
        for (name, beta) in [("beta1", beta1), ("beta2", beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(JnnError::ConfigurationError(format!(
                    "{} must be in [0, 1), got {}",
                    name, beta
                )));
            }
        }
        if !(eps > 0.0) {
            return Err(JnnError::ConfigurationError(format!(
                "Epsilon must be positive, got {}",
                eps
            )));
        }
        check_non_negative("weight_decay", weight_decay)?;
        debug!(
            "{} created: lr={}, betas=({}, {}), eps={}, weight_decay={}",
            if decoupled { "AdamW" } else { "Adam" },
            lr,
            beta1,
            beta2,
            eps,
            weight_decay
        );
        Ok(AdamOptimizer {
            lr,
            beta1,
            beta2,
            eps,
            weight_decay,
            decoupled,
            state: StateSlots::default(),
            steps: 0,
        })
    }

    pub fn betas(&self) -> (f64, f64) {
        (self.beta1, self.beta2)
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }

    pub fn is_decoupled(&self) -> bool {
        self.decoupled
    }

    /// Drops the moment estimates and restarts bias correction.
    pub fn reset_state(&mut self) {
        self.state.clear();
        self.steps = 0;
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), JnnError> {
        let t = self.steps + 1;
        let bias_correction1 = 1.0 - self.beta1.powi(t as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(t as i32);

        for (index, param) in params.iter_mut().enumerate() {
            let mut grad = match param.grad() {
                Some(g) => g.clone(),
                None => {
                    trace!("Adam: parameter #{} ('{}') has no gradient, skipped", index, param.name());
                    continue;
                }
            };
            if self.weight_decay != 0.0 && !self.decoupled {
                grad = grad.add(&param.value().mul_scalar(self.weight_decay)?)?;
            }

            let state = self.state.slot(index, &**param, || {
                Ok(AdamParamState {
                    m: zeros_like(&grad)?,
                    v: zeros_like(&grad)?,
                })
            })?;
            state.m.mul_scalar_(self.beta1)?;
            state.m.add_(&grad.mul_scalar(1.0 - self.beta1)?)?;
            state.v.mul_scalar_(self.beta2)?;
            state.v.add_(&grad.mul(&grad)?.mul_scalar(1.0 - self.beta2)?)?;

            // lr * m_hat / (sqrt(v_hat) + eps)
            let m_hat = state.m.div_scalar(bias_correction1)?;
            let denom = state.v.div_scalar(bias_correction2)?.sqrt()?.add_scalar(self.eps)?;
            let update = m_hat.div(&denom)?.mul_scalar(self.lr)?;

            if self.decoupled && self.weight_decay != 0.0 {
                let decay = param.value().mul_scalar(self.lr * self.weight_decay)?;
                param.value_mut().sub_(&decay)?;
            }
            param.value_mut().sub_(&update)?;
        }
        self.steps = t;
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
#[path = "adam_test.rs"]
mod tests;
