//! Containers that compose modules into models.

pub mod mlp;
pub mod sequential;

pub use mlp::MlpBuilder;
pub use sequential::Sequential;
