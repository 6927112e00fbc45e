use log::debug;
use rand::Rng;

use crate::error::JnnError;
use crate::nn::init::fan_in_uniform;
use crate::nn::layers::{check_grad_shape, check_last_dim};
use crate::nn::module::{ComputationRecord, Module, ModuleConfig, ModuleKind, ModuleState};
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use crate::types::DType;

/// Applies an affine transformation to the last dimension: `y = x W + b`.
///
/// `weight` has shape `[in_features, out_features]` and `bias` `[out_features]`.
/// Inputs of any rank >= 1 are accepted; leading dimensions are treated as
/// a batch. A 1-D input yields a 1-D output.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
    record: ComputationRecord<LinearRecord>,
}

#[derive(Debug)]
struct LinearRecord {
    /// Input flattened to `[rows, in_features]`.
    input_2d: Tensor,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
}

impl Linear {
    /// Creates a layer with weight and bias drawn from `U(-k, k)`, `k = 1/sqrt(in_features)`.
    pub fn new(in_features: usize, out_features: usize, bias: bool, dtype: DType) -> Result<Self, JnnError> {
        Self::with_rng(in_features, out_features, bias, dtype, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new) with an explicit random source.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        bias: bool,
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, JnnError> {
        if in_features == 0 || out_features == 0 {
            return Err(JnnError::ConfigurationError(format!(
                "Linear needs positive feature counts, got in={} out={}",
                in_features, out_features
            )));
        }
        let weight = fan_in_uniform(&[in_features, out_features], in_features, dtype, rng)?;
        let bias = if bias {
            Some(fan_in_uniform(&[out_features], in_features, dtype, rng)?)
        } else {
            None
        };
        debug!("Linear({} -> {}, bias={}, {}) created", in_features, out_features, bias.is_some(), dtype);
        Self::from_tensors(weight, bias)
    }

    /// Builds a layer around existing tensors.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `weight` is rank 2 and `bias` (if any) is
    /// `[weight.shape()[1]]`; `DataTypeMismatch` if their dtypes differ.
    pub fn from_tensors(weight: Tensor, bias: Option<Tensor>) -> Result<Self, JnnError> {
        if weight.rank() != 2 {
            return Err(JnnError::ShapeMismatch {
                expected: vec![0, 0],
                actual: weight.shape().to_vec(),
                operation: "Linear weight (expected rank 2)".to_string(),
            });
        }
        let (in_features, out_features) = (weight.shape()[0], weight.shape()[1]);
        if let Some(b) = &bias {
            if b.shape() != [out_features] {
                return Err(JnnError::ShapeMismatch {
                    expected: vec![out_features],
                    actual: b.shape().to_vec(),
                    operation: "Linear bias".to_string(),
                });
            }
            if b.dtype() != weight.dtype() {
                return Err(JnnError::DataTypeMismatch {
                    expected: weight.dtype(),
                    actual: b.dtype(),
                    operation: "Linear bias".to_string(),
                });
            }
        }
        Ok(Linear {
            weight: Parameter::new("weight", weight),
            bias: bias.map(|b| Parameter::new("bias", b)),
            in_features,
            out_features,
            record: ComputationRecord::default(),
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn dtype(&self) -> DType {
        self.weight.dtype()
    }
}

impl Module for Linear {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        check_last_dim(input, self.in_features, "Linear forward")?;
        let rows = input.numel() / self.in_features;
        // The record keeps its own copy so later writes to `input` cannot leak into backward.
        let input_2d = input.reshape(vec![rows, self.in_features])?.contiguous()?;

        let mut output = input_2d.matmul(&self.weight)?;
        if let Some(b) = &self.bias {
            output = output.add(b)?;
        }

        let mut output_shape = input.shape().to_vec();
        if let Some(last) = output_shape.last_mut() {
            *last = self.out_features;
        }
        let output = output.reshape(output_shape.clone())?;

        self.record.save(LinearRecord {
            input_2d,
            input_shape: input.shape().to_vec(),
            output_shape,
        });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        let rec = self.record.get("Linear")?;
        check_grad_shape(grad_output, &rec.output_shape, "Linear backward")?;

        let rows = rec.input_2d.shape()[0];
        let grad_2d = grad_output.reshape(vec![rows, self.out_features])?;

        let grad_weight = rec.input_2d.t()?.matmul(&grad_2d)?;
        let grad_input = grad_2d.matmul(&self.weight.t()?)?.reshape(rec.input_shape.clone())?;
        self.weight.accumulate_grad(&grad_weight)?;
        if let Some(b) = self.bias.as_mut() {
            b.accumulate_grad(&grad_2d.sum_axis(0, false)?)?;
        }

        self.record.consume();
        Ok(grad_input)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Linear
    }

    fn describe(&self) -> ModuleConfig {
        ModuleConfig::new()
            .with("in_features", self.in_features)
            .with("out_features", self.out_features)
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
#[path = "linear_test.rs"]
mod tests;
