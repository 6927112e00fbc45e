use log::debug;

use crate::error::JnnError;
use crate::nn::layers::{check_grad_shape, check_last_dim};
use crate::nn::module::{ComputationRecord, Module, ModuleConfig, ModuleKind, ModuleState};
use crate::nn::parameter::Parameter;
use crate::tensor::{ones, zeros, Tensor};
use crate::types::DType;

pub const DEFAULT_LAYER_NORM_EPS: f64 = 1e-5;

/// Normalises the last dimension to zero mean and unit (population)
/// variance, then applies an element-wise affine `weight * x_hat + bias`.
#[derive(Debug)]
pub struct LayerNorm {
    normalized_size: usize,
    eps: f64,
    weight: Parameter,
    bias: Option<Parameter>,
    record: ComputationRecord<LayerNormRecord>,
}

#[derive(Debug)]
struct LayerNormRecord {
    x_hat: Tensor,
    /// `1 / sqrt(var + eps)`, last dim kept with size 1.
    inv_std: Tensor,
}

impl LayerNorm {
    /// Weight starts at ones and bias at zeros.
    pub fn new(normalized_size: usize, eps: f64, bias: bool, dtype: DType) -> Result<Self, JnnError> {
        if normalized_size == 0 {
            return Err(JnnError::ConfigurationError(
                "LayerNorm needs a positive normalized_size".to_string(),
            ));
        }
        if !(eps > 0.0) {
            return Err(JnnError::ConfigurationError(format!(
                "LayerNorm eps must be positive, got {}",
                eps
            )));
        }
        debug!("LayerNorm({}, eps={}, bias={}, {}) created", normalized_size, eps, bias, dtype);
        let bias = if bias {
            Some(Parameter::new("bias", zeros(&[normalized_size], dtype)?))
        } else {
            None
        };
        Ok(LayerNorm {
            normalized_size,
            eps,
            weight: Parameter::new("weight", ones(&[normalized_size], dtype)?),
            bias,
            record: ComputationRecord::default(),
        })
    }

    pub fn normalized_size(&self) -> usize {
        self.normalized_size
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }
}

impl Module for LayerNorm {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        check_last_dim(input, self.normalized_size, "LayerNorm forward")?;
        let last = input.rank() - 1;

        let centered = input.sub(&input.mean_axis(last, true)?)?;
        let var = centered.pow_scalar(2.0)?.mean_axis(last, true)?;
        let inv_std = var.add_scalar(self.eps)?.pow_scalar(-0.5)?;
        let x_hat = centered.mul(&inv_std)?;

        let mut output = x_hat.mul(&self.weight)?;
        if let Some(b) = &self.bias {
            output = output.add(b)?;
        }
        self.record.save(LayerNormRecord { x_hat, inv_std });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        let rec = self.record.get("LayerNorm")?;
        check_grad_shape(grad_output, rec.x_hat.shape(), "LayerNorm backward")?;
        let last = rec.x_hat.rank() - 1;
        let size = [self.normalized_size];

        let grad_weight = grad_output.mul(&rec.x_hat)?.reduce_to_shape(&size)?;
        let grad_bias = grad_output.reduce_to_shape(&size)?;

        // dx = inv_std * (dx_hat - mean(dx_hat) - x_hat * mean(dx_hat * x_hat))
        let dx_hat = grad_output.mul(&self.weight)?;
        let mean_dx_hat = dx_hat.mean_axis(last, true)?;
        let mean_dx_hat_x_hat = dx_hat.mul(&rec.x_hat)?.mean_axis(last, true)?;
        let grad_input = dx_hat
            .sub(&mean_dx_hat)?
            .sub(&rec.x_hat.mul(&mean_dx_hat_x_hat)?)?
            .mul(&rec.inv_std)?;

        self.weight.accumulate_grad(&grad_weight)?;
        if let Some(b) = self.bias.as_mut() {
            b.accumulate_grad(&grad_bias)?;
        }
        self.record.consume();
        Ok(grad_input)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::LayerNorm
    }

    fn describe(&self) -> ModuleConfig {
        ModuleConfig::new()
            .with("normalized_size", self.normalized_size)
            .with("eps", self.eps)
            .with("bias", self.bias.is_some())
    }

    fn state(&self) -> ModuleState {
        self.record.state()
    }

    fn local_parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        params.extend(self.bias.as_ref());
        params
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = vec![&mut self.weight];
        params.extend(self.bias.as_mut());
        params
    }

    fn zero_grad(&mut self) {
        self.weight.zero_grad();
        if let Some(b) = self.bias.as_mut() {
            b.zero_grad();
        }
        self.record.settle();
    }
}

#[cfg(test)]
#[path = "layer_norm_test.rs"]
mod tests;
