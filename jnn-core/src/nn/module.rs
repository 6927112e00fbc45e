use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::JnnError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// Variant tag of a module, as written in persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Linear,
    Activation,
    LayerNorm,
    Embedding,
    Sequential,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 5] = [
        ModuleKind::Linear,
        ModuleKind::Activation,
        ModuleKind::LayerNorm,
        ModuleKind::Embedding,
        ModuleKind::Sequential,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ModuleKind::Linear => "linear",
            ModuleKind::Activation => "activation",
            ModuleKind::LayerNorm => "layer_norm",
            ModuleKind::Embedding => "embedding",
            ModuleKind::Sequential => "sequential",
        }
    }

    /// Parses a document tag.
    ///
    /// # Errors
    /// `UnknownModuleKind` for any tag this build does not implement.
    pub fn from_tag(tag: &str) -> Result<Self, JnnError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.tag() == tag)
            .ok_or_else(|| JnnError::UnknownModuleKind(tag.to_string()))
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A primitive configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<usize> for ConfigValue {
    fn from(v: usize) -> Self {
        ConfigValue::Int(v as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Str(v.to_string())
    }
}

/// Static configuration of one module: enough to rebuild it without its
/// parameter values. Keys are kept sorted so documents are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleConfig(BTreeMap<String, ConfigValue>);

impl ModuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    pub fn get_usize(&self, key: &str) -> Result<usize, JnnError> {
        match self.get(key) {
            Some(ConfigValue::Int(v)) if *v >= 0 => Ok(*v as usize),
            other => Err(bad_field(key, "non-negative integer", other)),
        }
    }

    /// Reads a float; integer values are accepted and widened.
    pub fn get_f64(&self, key: &str) -> Result<f64, JnnError> {
        match self.get(key) {
            Some(ConfigValue::Float(v)) => Ok(*v),
            Some(ConfigValue::Int(v)) => Ok(*v as f64),
            other => Err(bad_field(key, "number", other)),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, JnnError> {
        match self.get(key) {
            Some(ConfigValue::Bool(v)) => Ok(*v),
            other => Err(bad_field(key, "boolean", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, JnnError> {
        match self.get(key) {
            Some(ConfigValue::Str(v)) => Ok(v),
            other => Err(bad_field(key, "string", other)),
        }
    }
}

fn bad_field(key: &str, expected: &str, found: Option<&ConfigValue>) -> JnnError {
    match found {
        None => JnnError::MalformedDocument(format!("missing config field '{}'", key)),
        Some(v) => JnnError::MalformedDocument(format!(
            "config field '{}' should be a {}, found {:?}",
            key, expected, v
        )),
    }
}

/// Where a module is in its forward/backward cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleState {
    #[default]
    Idle,
    ForwardDone,
    BackwardDone,
}

/// The single backward-context slot of a module.
///
/// `save` overwrites any pending record (the last forward wins); the record
/// is consumed by the backward pass, so a second backward without a new
/// forward fails with `IllegalState`.
#[derive(Debug)]
pub(crate) struct ComputationRecord<R> {
    slot: Option<R>,
    state: ModuleState,
}

impl<R> Default for ComputationRecord<R> {
    fn default() -> Self {
        ComputationRecord {
            slot: None,
            state: ModuleState::Idle,
        }
    }
}

impl<R> ComputationRecord<R> {
    pub(crate) fn save(&mut self, record: R) {
        self.slot = Some(record);
        self.state = ModuleState::ForwardDone;
    }

    /// Borrows the pending record without consuming it.
    pub(crate) fn get(&self, module: &str) -> Result<&R, JnnError> {
        self.slot.as_ref().ok_or_else(|| JnnError::no_record(module))
    }

    /// Marks the backward pass complete and drops the record.
    pub(crate) fn consume(&mut self) {
        self.slot = None;
        self.state = ModuleState::BackwardDone;
    }

    /// Returns a finished cycle to `Idle`. A record saved by a forward that
    /// has not been backpropagated yet is kept.
    pub(crate) fn settle(&mut self) {
        if self.slot.is_none() {
            self.state = ModuleState::Idle;
        }
    }

    pub(crate) fn state(&self) -> ModuleState {
        self.state
    }
}

/// The base trait for all neural network modules (layers, containers, etc.).
///
/// A module computes `forward` and, from the record that forward saved, the
/// matching `backward`: it accumulates its parameters' gradients and returns
/// the gradient with respect to its input. Modules form a strict tree;
/// parameter traversal follows attach order, depth-first.
pub trait Module: fmt::Debug + Send {
    /// Computes the output and saves what `backward` needs, replacing any
    /// record left by an earlier forward.
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError>;

    /// Consumes the saved record, accumulates parameter gradients and returns
    /// the gradient with respect to the forward input.
    ///
    /// # Errors
    /// `IllegalState` if there is no record (no forward since the last
    /// backward or reset). `ShapeMismatch` if `grad_output` does not have the
    /// forward output's shape.
    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError>;

    fn kind(&self) -> ModuleKind;

    /// Static configuration used by the serializer to rebuild this module.
    fn describe(&self) -> ModuleConfig;

    fn state(&self) -> ModuleState;

    /// Parameters owned directly by this module, excluding children.
    fn local_parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    /// Direct children, in attach order.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// All parameters of the subtree: own parameters first, then each
    /// child's, depth-first.
    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = self.local_parameters();
        for child in self.children() {
            params.extend(child.parameters());
        }
        params
    }

    /// Mutable counterpart of [`parameters`](Self::parameters), same order.
    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// Parameters with hierarchical names: children are prefixed by their
    /// position (`"0.weight"`, `"2.1.bias"`).
    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut named: Vec<(String, &Parameter)> = self
            .local_parameters()
            .into_iter()
            .map(|p| (p.name().to_string(), p))
            .collect();
        for (i, child) in self.children().into_iter().enumerate() {
            for (name, p) in child.named_parameters() {
                named.push((format!("{}.{}", i, name), p));
            }
        }
        named
    }

    /// Drops every parameter gradient. A module whose last backward has
    /// completed returns to `Idle`; a pending forward record is left intact, so
    /// `forward`, `zero_grad`, `backward` is a valid sequence.
    fn zero_grad(&mut self);

    /// Total number of scalar parameters in the subtree.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }
}

#[cfg(test)]
#[path = "module_test.rs"]
mod tests;
