use std::fmt;

use log::debug;

use crate::error::JnnError;
use crate::nn::module::{ComputationRecord, Module, ModuleConfig, ModuleKind, ModuleState};
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// An ordered chain of child modules.
///
/// `forward` feeds each child's output to the next child; `backward` walks
/// the children in reverse, handing each one the gradient produced by its
/// successor. Children are owned outright, so the module tree can never
/// contain a cycle. An empty `Sequential` is the identity.
#[derive(Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
    record: ComputationRecord<()>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child.
    pub fn push(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Inserts a child at `index`, shifting later children back.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index > len()`.
    pub fn insert(&mut self, index: usize, module: Box<dyn Module>) -> Result<(), JnnError> {
        if index > self.modules.len() {
            return Err(JnnError::IndexOutOfRange {
                index: vec![index],
                shape: vec![self.modules.len()],
            });
        }
        self.modules.insert(index, module);
        Ok(())
    }

    /// Detaches and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Box<dyn Module>, JnnError> {
        if index >= self.modules.len() {
            return Err(JnnError::IndexOutOfRange {
                index: vec![index],
                shape: vec![self.modules.len()],
            });
        }
        Ok(self.modules.remove(index))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Module> {
        self.modules.get(index).map(|m| m.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Module + 'static)> {
        self.modules.get_mut(index).map(|m| m.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Module> {
        self.modules.iter().map(|m| m.as_ref())
    }
}

impl fmt::Debug for Sequential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.iter()).finish()
    }
}

impl Module for Sequential {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        let mut current = input.contiguous()?;
        for module in self.modules.iter_mut() {
            current = module.forward(&current)?;
        }
        self.record.save(());
        Ok(current)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        self.record.get("Sequential")?;
        let mut grad = grad_output.contiguous()?;
        for module in self.modules.iter_mut().rev() {
            grad = module.backward(&grad)?;
        }
        self.record.consume();
        Ok(grad)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Sequential
    }

    fn describe(&self) -> ModuleConfig {
        ModuleConfig::new()
    }

    fn state(&self) -> ModuleState {
        self.record.state()
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.iter().collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.modules
            .iter_mut()
            .flat_map(|m| m.parameters_mut())
            .collect()
    }

    fn zero_grad(&mut self) {
        for module in self.modules.iter_mut() {
            module.zero_grad();
        }
        self.record.settle();
    }
}

impl FromIterator<Box<dyn Module>> for Sequential {
    fn from_iter<I: IntoIterator<Item = Box<dyn Module>>>(iter: I) -> Self {
        let modules: Vec<Box<dyn Module>> = iter.into_iter().collect();
        debug!("Sequential created with {} children", modules.len());
        Sequential {
            modules,
            record: ComputationRecord::default(),
        }
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
