use serde::{Deserialize, Serialize};

use crate::error::JnnError;
use crate::optim::adam::{AdamOptimizer, DEFAULT_ADAMW_WEIGHT_DECAY, DEFAULT_BETAS, DEFAULT_EPS};
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::sgd::SgdOptimizer;

/// Serializable description of an optimizer.
///
/// There is no default algorithm: callers pick `Sgd` or `Adam` explicitly.
/// Validation happens in [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerConfig {
    Sgd {
        lr: f64,
        #[serde(default)]
        momentum: f64,
        #[serde(default)]
        weight_decay: f64,
        #[serde(default)]
        nesterov: bool,
    },
    Adam {
        lr: f64,
        #[serde(default = "default_beta1")]
        beta1: f64,
        #[serde(default = "default_beta2")]
        beta2: f64,
        #[serde(default = "default_eps")]
        eps: f64,
        #[serde(default)]
        weight_decay: f64,
        /// AdamW-style decay.
        #[serde(default)]
        decoupled: bool,
    },
}

fn default_beta1() -> f64 {
    DEFAULT_BETAS.0
}

fn default_beta2() -> f64 {
    DEFAULT_BETAS.1
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

impl OptimizerConfig {
    /// Plain SGD.
    pub fn sgd(lr: f64) -> Self {
        OptimizerConfig::Sgd {
            lr,
            momentum: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        }
    }

    /// Adam with default betas and eps.
    pub fn adam(lr: f64) -> Self {
        OptimizerConfig::Adam {
            lr,
            beta1: DEFAULT_BETAS.0,
            beta2: DEFAULT_BETAS.1,
            eps: DEFAULT_EPS,
            weight_decay: 0.0,
            decoupled: false,
        }
    }

    /// AdamW with a weight decay of 0.01.
    pub fn adamw(lr: f64) -> Self {
        OptimizerConfig::Adam {
            lr,
            beta1: DEFAULT_BETAS.0,
            beta2: DEFAULT_BETAS.1,
            eps: DEFAULT_EPS,
            weight_decay: DEFAULT_ADAMW_WEIGHT_DECAY,
            decoupled: true,
        }
    }

    /// # Errors
    /// `ConfigurationError` for out-of-range hyperparameters.
    pub fn build(&self) -> Result<Box<dyn Optimizer>, JnnError> {
        Ok(match *self {
            OptimizerConfig::Sgd {
                lr,
                momentum,
                weight_decay,
                nesterov,
            } => Box::new(SgdOptimizer::with_options(lr, momentum, weight_decay, nesterov)?),
            OptimizerConfig::Adam {
                lr,
                beta1,
                beta2,
                eps,
                weight_decay,
                decoupled,
            } => Box::new(AdamOptimizer::with_options(
                lr,
                (beta1, beta2),
                eps,
                weight_decay,
                decoupled,
            )?),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
