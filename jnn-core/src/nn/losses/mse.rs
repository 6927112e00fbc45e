use crate::error::JnnError;
use crate::nn::losses::{check_prediction_target, Reduction};
use crate::nn::module::{ComputationRecord, ModuleState};
use crate::tensor::Tensor;

/// Mean squared error: `reduce((output - target)^2)`.
#[derive(Debug, Default)]
pub struct MSELoss {
    reduction: Reduction,
    record: ComputationRecord<MseRecord>,
}

#[derive(Debug)]
struct MseRecord {
    diff: Tensor,
    /// `d loss / d diff^2` per element: `1/numel` for `Mean`, `1` for `Sum`.
    scale: f64,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss {
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

    /// Returns the loss as a rank-0 tensor of the operands' dtype.
    ///
    /// # Errors
    /// `ShapeMismatch` / `DataTypeMismatch` if `output` and `target` differ.
    pub fn forward(&mut self, output: &Tensor, target: &Tensor) -> Result<Tensor, JnnError> {
        check_prediction_target(output, target, "MSELoss forward")?;
        let diff = output.sub(target)?;
        let squared = diff.mul(&diff)?;
        let (loss, scale) = match self.reduction {
            Reduction::Mean => (squared.mean()?, 1.0 / diff.numel() as f64),
            Reduction::Sum => (squared.sum()?, 1.0),
        };
        self.record.save(MseRecord { diff, scale });
        Ok(loss)
    }

    /// Gradient of the last loss with respect to `output`: `2 * scale * (output - target)`.
    ///
    /// # Errors
    /// `IllegalState` without a preceding `forward`.
    pub fn backward(&mut self) -> Result<Tensor, JnnError> {
        let rec = self.record.get("MSELoss")?;
        let grad = rec.diff.mul_scalar(2.0 * rec.scale)?;
        self.record.consume();
        Ok(grad)
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
