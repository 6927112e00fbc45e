//! # jnn-core
//!
//! A small neural-network library: n-dimensional tensors, trainable
//! parameters, modules with explicit forward/backward passes, optimizers,
//! and a versioned persistence format able to rebuild a whole module tree.
//!
//! ```
//! use jnn_core::prelude::*;
//!
//! # fn main() -> Result<(), JnnError> {
//! let inputs = Tensor::new(vec![0.0, 1.0, 1.0, 0.0], vec![2, 2])?;
//! let targets = Tensor::new(vec![1.0, -1.0], vec![2, 1])?;
//!
//! let mut model = MlpBuilder::new(2, 1).hidden_size(8).build()?;
//! let mut loss_fn = MSELoss::new(Reduction::Mean);
//! let mut optimizer = OptimizerConfig::adam(0.01).build()?;
//!
//! let prediction = model.forward(&inputs)?;
//! let loss = loss_fn.forward(&prediction, &targets)?;
//! model.zero_grad();
//! model.backward(&loss_fn.backward()?)?;
//! optimizer.step(&mut model.parameters_mut())?;
//! assert!(loss.item()?.is_finite());
//!
//! let path = std::env::temp_dir().join("jnn_core_doc_model.json");
//! jnn_core::serialization::save(&model, &path, SaveOptions::default())?;
//! let restored = jnn_core::serialization::load(&path)?;
//! assert_eq!(restored.num_parameters(), model.num_parameters());
//! # let _ = std::fs::remove_file(&path);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod serialization;
pub mod tensor;
pub mod tensor_data;
pub mod types;

pub use error::JnnError;
pub use nn::{Module, Parameter};
pub use tensor::Tensor;
pub use types::DType;

// Re-export traits required by public functions/structs
pub use num_traits;

/// The items most programs need.
pub mod prelude {
    pub use crate::error::JnnError;
    pub use crate::model::{MlpBuilder, Sequential};
    pub use crate::nn::{
        Activation, ActivationKind, CrossEntropyLoss, Embedding, LayerNorm, Linear, MSELoss, Module, Parameter,
        Reduction,
    };
    pub use crate::optim::{AdamOptimizer, Optimizer, OptimizerConfig, SgdOptimizer};
    pub use crate::serialization::SaveOptions;
    pub use crate::tensor::Tensor;
    pub use crate::types::DType;
}
