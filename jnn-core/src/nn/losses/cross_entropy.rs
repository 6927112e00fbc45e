use crate::error::JnnError;
use crate::nn::losses::{check_prediction_target, Reduction};
use crate::nn::module::{ComputationRecord, ModuleState};
use crate::ops::activation::softmax_op;
use crate::tensor::{zeros, Tensor};
use crate::types::DType;

/// Probabilities are clipped into `[EPS, 1 - EPS]` before the logarithm.
const PROB_EPS: f64 = 1e-7;

/// Softmax cross-entropy over the last dimension.
///
/// `output` holds raw logits `[..., classes]`; `target` holds one-hot or
/// probability rows of the same shape (see [`one_hot`]). Each row
/// contributes `-sum_c target_c * ln(softmax(output)_c)`.
#[derive(Debug, Default)]
pub struct CrossEntropyLoss {
    reduction: Reduction,
    record: ComputationRecord<CrossEntropyRecord>,
}

#[derive(Debug)]
struct CrossEntropyRecord {
    probs: Tensor,
    target: Tensor,
    scale: f64,
}

impl CrossEntropyLoss {
    pub fn new(reduction: Reduction) -> Self {
        CrossEntropyLoss {
            reduction,
            record: ComputationRecord::default(),
        }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn state(&self) -> ModuleState {
        self.record.state()
    }

    /// Returns the loss as a rank-0 tensor; `Mean` averages over rows.
    pub fn forward(&mut self, output: &Tensor, target: &Tensor) -> Result<Tensor, JnnError> {
        check_prediction_target(output, target, "CrossEntropyLoss forward")?;
        let classes = match output.shape().last() {
            Some(&c) => c,
            None => {
                return Err(JnnError::InvalidDimension { dim: 0, rank: 0 });
            }
        };
        let rows = output.numel() / classes;

        let probs = softmax_op(output)?;
        let log_probs = probs.clamp(PROB_EPS, 1.0 - PROB_EPS)?.ln()?;
        let total = target.mul(&log_probs)?.sum()?.neg()?;
        let scale = match self.reduction {
            Reduction::Mean => 1.0 / rows as f64,
            Reduction::Sum => 1.0,
        };
        let loss = total.mul_scalar(scale)?;

        self.record.save(CrossEntropyRecord {
            probs,
            target: target.contiguous()?,
            scale,
        });
        Ok(loss)
    }

    /// Gradient with respect to the logits: `scale * (softmax(output) - target)`.
    pub fn backward(&mut self) -> Result<Tensor, JnnError> {
        let rec = self.record.get("CrossEntropyLoss")?;
        let grad = rec.probs.sub(&rec.target)?.mul_scalar(rec.scale)?;
        self.record.consume();
        Ok(grad)
    }
}

/// Encodes class indices as one-hot rows: shape `[n, num_classes]`.
///
/// # Errors
/// `IndexOutOfRange` if a class is `>= num_classes`.
pub fn one_hot(classes: &[usize], num_classes: usize, dtype: DType) -> Result<Tensor, JnnError> {
    let encoded = zeros(&[classes.len(), num_classes], dtype)?;
    for (row, &class) in classes.iter().enumerate() {
        encoded.set(&[row, class], 1.0)?;
    }
    Ok(encoded)
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
