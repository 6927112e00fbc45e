//! Name-keyed parameter snapshots.

use std::collections::HashMap;

use crate::error::JnnError;
use crate::nn::module::Module;
use crate::tensor::Tensor;

/// Copies of every parameter value, keyed by hierarchical name
/// (`"0.weight"`), in traversal order.
pub fn state_dict(module: &dyn Module) -> Result<Vec<(String, Tensor)>, JnnError> {
    module
        .named_parameters()
        .into_iter()
        .map(|(name, p)| p.value().contiguous().map(|t| (name, t)))
        .collect()
}

/// Copies values from `state` into the existing parameters of `module`.
///
/// Every parameter must be present in `state` with its exact shape and
/// dtype, and `state` must not hold unknown names. Nothing is written unless
/// the whole state validates.
///
/// # Errors
/// `MalformedDocument` for missing or unexpected keys, `ShapeMismatch` /
/// `DataTypeMismatch` for incompatible tensors.
pub fn load_state_dict(module: &mut dyn Module, state: &[(String, Tensor)]) -> Result<(), JnnError> {
    let by_name: HashMap<&str, &Tensor> = state.iter().map(|(n, t)| (n.as_str(), t)).collect();
    let mut values = Vec::new();
    for (name, param) in module.named_parameters() {
        let tensor = by_name
            .get(name.as_str())
            .ok_or_else(|| JnnError::MalformedDocument(format!("missing key '{}' in state dict", name)))?;
        if tensor.shape() != param.shape() {
            return Err(JnnError::ShapeMismatch {
                expected: param.shape().to_vec(),
                actual: tensor.shape().to_vec(),
                operation: format!("load_state_dict '{}'", name),
            });
        }
        if tensor.dtype() != param.dtype() {
            return Err(JnnError::DataTypeMismatch {
                expected: param.dtype(),
                actual: tensor.dtype(),
                operation: format!("load_state_dict '{}'", name),
            });
        }
        values.push(tensor.contiguous()?);
    }
    if values.len() != by_name.len() {
        let known: Vec<String> = module.named_parameters().into_iter().map(|(n, _)| n).collect();
        let unexpected: Vec<&str> = by_name
            .keys()
            .copied()
            .filter(|k| !known.iter().any(|n| n == k))
            .collect();
        return Err(JnnError::MalformedDocument(format!(
            "unexpected keys in state dict: {:?}",
            unexpected
        )));
    }
    for (param, value) in module.parameters_mut().into_iter().zip(values) {
        param.set_value(value)?;
    }
    Ok(())
}
