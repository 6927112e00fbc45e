use crate::types::DType;
use thiserror::Error;

/// Custom error type for the jNN framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum JnnError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of range: index {index:?} for shape {shape:?}")]
    IndexOutOfRange {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Invalid dimension {dim} for tensor of rank {rank}")]
    InvalidDimension { dim: usize, rank: usize },

    #[error("Data type mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Illegal state in {module}: {reason}")]
    IllegalState { module: String, reason: String },

    #[error("Unknown module kind '{0}'")]
    UnknownModuleKind(String),

    #[error("Unsupported document version {found}, this build reads up to major version {supported}")]
    UnsupportedVersion { found: String, supported: u32 },

    #[error("Malformed module document: {0}")]
    MalformedDocument(String),

    #[error("I/O failure on '{path}': {reason}")]
    IoError { path: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl JnnError {
    /// Shorthand for the common "backward without forward" failure.
    pub(crate) fn no_record(module: &str) -> Self {
        JnnError::IllegalState {
            module: module.to_string(),
            reason: "backward called without a preceding forward".to_string(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        JnnError::IoError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
