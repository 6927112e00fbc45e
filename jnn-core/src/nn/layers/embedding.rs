use log::debug;
use rand::Rng;

use crate::error::JnnError;
use crate::nn::layers::check_grad_shape;
use crate::nn::module::{ComputationRecord, Module, ModuleConfig, ModuleKind, ModuleState};
use crate::nn::parameter::Parameter;
use crate::tensor::create::randn_with_rng;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::with_dtype;

/// A lookup table mapping integer indices to dense vectors.
///
/// The input tensor holds indices stored as floats; every value must be a
/// whole number in `[0, num_embeddings)`. The output has shape
/// `input.shape() + [embedding_dim]`.
#[derive(Debug)]
pub struct Embedding {
    weight: Parameter,
    num_embeddings: usize,
    embedding_dim: usize,
    record: ComputationRecord<EmbeddingRecord>,
}

#[derive(Debug)]
struct EmbeddingRecord {
    indices: Vec<usize>,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
}

impl Embedding {
    /// Creates a table with rows drawn from `N(0, 1)`.
    pub fn new(num_embeddings: usize, embedding_dim: usize, dtype: DType) -> Result<Self, JnnError> {
        Self::with_rng(num_embeddings, embedding_dim, dtype, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        num_embeddings: usize,
        embedding_dim: usize,
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, JnnError> {
        if num_embeddings == 0 || embedding_dim == 0 {
            return Err(JnnError::ConfigurationError(format!(
                "Embedding needs positive sizes, got num_embeddings={} embedding_dim={}",
                num_embeddings, embedding_dim
            )));
        }
        let weight = randn_with_rng(&[num_embeddings, embedding_dim], 0.0, 1.0, dtype, rng)?;
        debug!("Embedding({}, {}, {}) created", num_embeddings, embedding_dim, dtype);
        Ok(Embedding {
            weight: Parameter::new("weight", weight),
            num_embeddings,
            embedding_dim,
            record: ComputationRecord::default(),
        })
    }

    pub fn num_embeddings(&self) -> usize {
        self.num_embeddings
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    /// Validates and converts the raw index values.
    /// Converts the stored index values to rows of the table.
    ///
    /// A whole number past the table is reported as that row against
    /// `[num_embeddings]`. A negative or fractional value has no row, so the
    /// error carries its coordinate within the input and the input shape.
    fn lookup_indices(&self, input: &Tensor) -> Result<Vec<usize>, JnnError> {
        let strides = calculate_strides(input.shape());
        input
            .to_vec_f64()?
            .into_iter()
            .enumerate()
            .map(|(pos, v)| {
                if v.fract() != 0.0 || v < 0.0 || !v.is_finite() {
                    debug!("Embedding: value {} at flat position {} is not an index", v, pos);
                    let coord = strides.iter().zip(input.shape()).map(|(&s, &d)| (pos / s) % d).collect();
                    return Err(JnnError::IndexOutOfRange {
                        index: coord,
                        shape: input.shape().to_vec(),
                    });
                }
                if v >= self.num_embeddings as f64 {
                    return Err(JnnError::IndexOutOfRange {
                        index: vec![v as usize],
                        shape: vec![self.num_embeddings],
                    });
                }
                Ok(v as usize)
            })
            .collect()
    }
}

impl Module for Embedding {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        let indices = self.lookup_indices(input)?;
        let dim = self.embedding_dim;
        let mut output_shape = input.shape().to_vec();
        output_shape.push(dim);

        let output = with_dtype!(self.weight.dtype(), T => {
            let table = self.weight.contiguous_data::<T>()?;
            let mut out: Vec<T> = Vec::with_capacity(indices.len() * dim);
            for &idx in &indices {
                out.extend_from_slice(&table[idx * dim..(idx + 1) * dim]);
            }
            Tensor::from_typed(out, output_shape.clone())?
        });

        self.record.save(EmbeddingRecord {
            indices,
            input_shape: input.shape().to_vec(),
            output_shape,
        });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        let rec = self.record.get("Embedding")?;
        check_grad_shape(grad_output, &rec.output_shape, "Embedding backward")?;
        let dim = self.embedding_dim;
        let dtype = self.weight.dtype();
        if grad_output.dtype() != dtype {
            return Err(JnnError::DataTypeMismatch {
                expected: dtype,
                actual: grad_output.dtype(),
                operation: "Embedding backward".to_string(),
            });
        }

        let grad_weight = with_dtype!(dtype, T => {
            let grad = grad_output.contiguous_data::<T>()?;
            let mut acc: Vec<T> = vec![<T as num_traits::Zero>::zero(); self.num_embeddings * dim];
            for (row, &idx) in rec.indices.iter().enumerate() {
                let src = &grad[row * dim..(row + 1) * dim];
                for (a, &g) in acc[idx * dim..(idx + 1) * dim].iter_mut().zip(src) {
                    *a += g;
                }
            }
            Tensor::from_typed(acc, vec![self.num_embeddings, dim])?
        });
        // Indices are not differentiable.
        let grad_input = crate::tensor::zeros(&rec.input_shape, dtype)?;

        self.weight.accumulate_grad(&grad_weight)?;
        self.record.consume();
        Ok(grad_input)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Embedding
    }

    fn describe(&self) -> ModuleConfig {
        ModuleConfig::new()
            .with("num_embeddings", self.num_embeddings)
            .with("embedding_dim", self.embedding_dim)
    }

    fn state(&self) -> ModuleState {
        self.record.state()
    }

    fn local_parameters(&self) -> Vec<&Parameter> {
        vec![&self.weight]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.weight]
    }

    fn zero_grad(&mut self) {
        self.weight.zero_grad();
        self.record.settle();
    }
}

#[cfg(test)]
#[path = "embedding_test.rs"]
mod tests;
