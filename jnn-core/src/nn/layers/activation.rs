use std::fmt;

use crate::error::JnnError;
use crate::nn::layers::check_grad_shape;
use crate::nn::module::{ComputationRecord, Module, ModuleConfig, ModuleKind, ModuleState};
use crate::nn::parameter::Parameter;
use crate::ops::activation as act;
use crate::tensor::Tensor;

/// Default negative slope of [`ActivationKind::LeakyReLU`].
pub const DEFAULT_LEAKY_ALPHA: f64 = 0.01;

/// The element-wise function an [`Activation`] applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationKind {
    ReLU,
    LeakyReLU { alpha: f64 },
    Sigmoid,
    Tanh,
    /// Tanh approximation.
    Gelu,
    /// Over the last dimension.
    Softmax,
}

impl ActivationKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::ReLU => "relu",
            ActivationKind::LeakyReLU { .. } => "leaky_relu",
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::Tanh => "tanh",
            ActivationKind::Gelu => "gelu",
            ActivationKind::Softmax => "softmax",
        }
    }

    /// Parses a function name; `alpha` is only read for `leaky_relu`.
    pub fn from_name(name: &str, alpha: Option<f64>) -> Result<Self, JnnError> {
        Ok(match name {
            "relu" => ActivationKind::ReLU,
            "leaky_relu" => ActivationKind::LeakyReLU {
                alpha: alpha.unwrap_or(DEFAULT_LEAKY_ALPHA),
            },
            "sigmoid" => ActivationKind::Sigmoid,
            "tanh" => ActivationKind::Tanh,
            "gelu" => ActivationKind::Gelu,
            "softmax" => ActivationKind::Softmax,
            other => {
                return Err(JnnError::MalformedDocument(format!(
                    "unknown activation function '{}'",
                    other
                )))
            }
        })
    }

    /// Whether backward needs the forward output rather than its input.
    fn uses_output(&self) -> bool {
        matches!(
            self,
            ActivationKind::Sigmoid | ActivationKind::Tanh | ActivationKind::Softmax
        )
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationKind::LeakyReLU { alpha } => write!(f, "leaky_relu(alpha={})", alpha),
            other => f.write_str(other.name()),
        }
    }
}

/// A parameter-free module applying an [`ActivationKind`].
#[derive(Debug)]
pub struct Activation {
    kind: ActivationKind,
    /// Input or output of the last forward, see `ActivationKind::uses_output`.
    record: ComputationRecord<Tensor>,
}

impl Activation {
    pub fn new(kind: ActivationKind) -> Self {
        Activation {
            kind,
            record: ComputationRecord::default(),
        }
    }

    pub fn relu() -> Self {
        Self::new(ActivationKind::ReLU)
    }

    pub fn leaky_relu(alpha: f64) -> Self {
        Self::new(ActivationKind::LeakyReLU { alpha })
    }

    pub fn sigmoid() -> Self {
        Self::new(ActivationKind::Sigmoid)
    }

    pub fn tanh() -> Self {
        Self::new(ActivationKind::Tanh)
    }

    pub fn gelu() -> Self {
        Self::new(ActivationKind::Gelu)
    }

    pub fn softmax() -> Self {
        Self::new(ActivationKind::Softmax)
    }

    pub fn activation_kind(&self) -> ActivationKind {
        self.kind
    }
}

impl Module for Activation {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        let output = match self.kind {
            ActivationKind::ReLU => act::relu_op(input)?,
            ActivationKind::LeakyReLU { alpha } => act::leaky_relu_op(input, alpha)?,
            ActivationKind::Sigmoid => act::sigmoid_op(input)?,
            ActivationKind::Tanh => input.tanh()?,
            ActivationKind::Gelu => act::gelu_op(input)?,
            ActivationKind::Softmax => act::softmax_op(input)?,
        };
        let saved = if self.kind.uses_output() {
            output.clone()
        } else {
            input.contiguous()?
        };
        self.record.save(saved);
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        let saved = self.record.get("Activation")?;
        check_grad_shape(grad_output, saved.shape(), "Activation backward")?;
        let grad_input = match self.kind {
            ActivationKind::ReLU => act::relu_backward_op(grad_output, saved)?,
            ActivationKind::LeakyReLU { alpha } => act::leaky_relu_backward_op(grad_output, saved, alpha)?,
            ActivationKind::Sigmoid => act::sigmoid_backward_op(grad_output, saved)?,
            ActivationKind::Tanh => act::tanh_backward_op(grad_output, saved)?,
            ActivationKind::Gelu => act::gelu_backward_op(grad_output, saved)?,
            ActivationKind::Softmax => act::softmax_backward_op(grad_output, saved)?,
        };
        self.record.consume();
        Ok(grad_input)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Activation
    }

    fn describe(&self) -> ModuleConfig {
        let config = ModuleConfig::new().with("function", self.kind.name());
        match self.kind {
            ActivationKind::LeakyReLU { alpha } => config.with("alpha", alpha),
            _ => config,
        }
    }

    fn state(&self) -> ModuleState {
        self.record.state()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }

    fn zero_grad(&mut self) {
        self.record.settle();
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
