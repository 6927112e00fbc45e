use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::warn;

use crate::error::JnnError;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// Per-parameter optimizer state that is tied to the parameter's layout.
pub(crate) trait ParamState {
    fn fits(&self, param: &Parameter) -> bool;
}

/// A single buffer shaped like its parameter (SGD momentum).
impl ParamState for Tensor {
    fn fits(&self, param: &Parameter) -> bool {
        self.shape() == param.shape() && self.dtype() == param.dtype()
    }
}

/// Optimizer state keyed by parameter position.
#[derive(Debug)]
pub(crate) struct StateSlots<S> {
    slots: HashMap<usize, S>,
}

impl<S> Default for StateSlots<S> {
    fn default() -> Self {
        StateSlots { slots: HashMap::new() }
    }
}

impl<S: ParamState> StateSlots<S> {
    /// Returns the slot for `index`, creating it with `init` when missing.
    ///
    /// A slot whose layout no longer fits `param` (the caller passed a
    /// different parameter list) is discarded and recreated.
    pub(crate) fn slot<F>(&mut self, index: usize, param: &Parameter, init: F) -> Result<&mut S, JnnError>
    where
        F: FnOnce() -> Result<S, JnnError>,
    {
        match self.slots.entry(index) {
            Entry::Occupied(mut e) => {
                if !e.get().fits(param) {
                    warn!(
                        "Optimizer state for parameter #{} ('{}') no longer matches shape {:?}; resetting it",
                        index,
                        param.name(),
                        param.shape()
                    );
                    e.insert(init()?);
                }
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => Ok(e.insert(init()?)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
