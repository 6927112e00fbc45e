//! Neural-network building blocks: parameters, the `Module` trait, layers,
//! losses and initialisers.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::{Activation, ActivationKind, Embedding, LayerNorm, Linear};
pub use losses::{CrossEntropyLoss, MSELoss, Reduction};
pub use module::{ConfigValue, Module, ModuleConfig, ModuleKind, ModuleState};
pub use parameter::Parameter;
