//! Loss functions.
//!
//! A loss is not a [`Module`](crate::nn::Module): `forward` takes both the
//! prediction and the target and returns a rank-0 tensor, and `backward`
//! returns the gradient with respect to the prediction. The same
//! one-record rule applies: `backward` consumes what `forward` saved.

use std::fmt;
use std::str::FromStr;

use crate::error::JnnError;
use crate::ops::{check_same_dtype, check_same_shape};
use crate::tensor::Tensor;

pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::CrossEntropyLoss;
pub use mse::MSELoss;

/// How per-element (or per-row) losses are combined into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reduction {
    type Err = JnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(JnnError::ConfigurationError(format!("Unsupported reduction type: {}", s))),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Mean => f.write_str("mean"),
            Reduction::Sum => f.write_str("sum"),
        }
    }
}

/// Both operands of a loss must agree in shape and dtype.
pub(crate) fn check_prediction_target(output: &Tensor, target: &Tensor, loss: &str) -> Result<(), JnnError> {
    check_same_dtype(output, target, loss)?;
    check_same_shape(output, target, loss)
}
