//! Multilayer perceptron builder.

use log::debug;
use rand::Rng;

use crate::error::JnnError;
use crate::model::Sequential;
use crate::nn::layers::{Activation, ActivationKind, Linear};
use crate::types::DType;

/// Builds `Linear -> act -> (Linear -> act) * hidden_layers -> Linear` as a
/// [`Sequential`]. No activation follows the output layer.
///
/// ```ignore
/// let mlp = MlpBuilder::new(4, 2).hidden_size(16).hidden_layers(1).build()?;
/// ```
#[derive(Debug, Clone)]
pub struct MlpBuilder {
    in_features: usize,
    out_features: usize,
    hidden_size: usize,
    hidden_layers: usize,
    bias: bool,
    activation: ActivationKind,
    dtype: DType,
}

impl MlpBuilder {
    /// Defaults: one hidden width of 32, no extra hidden layers, bias,
    /// ReLU, `F32`.
    pub fn new(in_features: usize, out_features: usize) -> Self {
        MlpBuilder {
            in_features,
            out_features,
            hidden_size: 32,
            hidden_layers: 0,
            bias: true,
            activation: ActivationKind::ReLU,
            dtype: DType::F32,
        }
    }

    pub fn hidden_size(mut self, size: usize) -> Self {
        self.hidden_size = size;
        self
    }

    /// Number of `hidden_size -> hidden_size` layers between input and output layers.
    pub fn hidden_layers(mut self, count: usize) -> Self {
        self.hidden_layers = count;
        self
    }

    pub fn bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    pub fn activation(mut self, kind: ActivationKind) -> Self {
        self.activation = kind;
        self
    }

    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    pub fn build(&self) -> Result<Sequential, JnnError> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Sequential, JnnError> {
        let mut widths = vec![self.in_features];
        widths.extend(std::iter::repeat(self.hidden_size).take(self.hidden_layers + 1));
        widths.push(self.out_features);

        let mut seq = Sequential::new();
        let last = widths.len() - 2;
        for (i, pair) in widths.windows(2).enumerate() {
            seq.push(Box::new(Linear::with_rng(pair[0], pair[1], self.bias, self.dtype, rng)?));
            if i != last {
                seq.push(Box::new(Activation::new(self.activation)));
            }
        }
        debug!(
            "MLP {:?} built with {} activation ({} modules)",
            widths,
            self.activation,
            seq.len()
        );
        Ok(seq)
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
