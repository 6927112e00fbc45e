use std::sync::{Arc, Mutex};

use super::*;
use crate::nn::{Activation, Linear};
use crate::types::DType;

/// Adds a constant and logs every call into a shared journal.
#[derive(Debug)]
struct Tracer {
    label: &'static str,
    shift: f64,
    journal: Arc<Mutex<Vec<String>>>,
    record: ComputationRecord<()>,
}

impl Tracer {
    fn new(label: &'static str, shift: f64, journal: &Arc<Mutex<Vec<String>>>) -> Self {
        Tracer {
            label,
            shift,
            journal: Arc::clone(journal),
            record: ComputationRecord::default(),
        }
    }
}

impl Module for Tracer {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        self.journal.lock().unwrap().push(format!("fwd {}", self.label));
        self.record.save(());
        input.add_scalar(self.shift)
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        self.record.get(self.label)?;
        self.journal
            .lock()
            .unwrap()
            .push(format!("bwd {} {}", self.label, grad_output.item()?));
        self.record.consume();
        // Doubling makes the gradient chain visible in the journal.
        grad_output.mul_scalar(2.0)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Activation
    }

    fn describe(&self) -> ModuleConfig {
        ModuleConfig::new()
    }

    fn state(&self) -> ModuleState {
        self.record.state()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }

    fn zero_grad(&mut self) {
        self.record.settle();
    }
}

fn scalar(v: f64) -> Tensor {
    Tensor::new_f64(vec![v], vec![1]).unwrap()
}

#[test]
fn test_backward_runs_in_reverse_order() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let mut seq = Sequential::new()
        .with(Tracer::new("A", 1.0, &journal))
        .with(Tracer::new("B", 10.0, &journal))
        .with(Tracer::new("C", 100.0, &journal));

    let out = seq.forward(&scalar(0.0)).unwrap();
    assert_eq!(out.item().unwrap(), 111.0);
    let grad = seq.backward(&scalar(1.0)).unwrap();
    assert_eq!(grad.item().unwrap(), 8.0);

    let log = journal.lock().unwrap().clone();
    assert_eq!(
        log,
        vec!["fwd A", "fwd B", "fwd C", "bwd C 1", "bwd B 2", "bwd A 4"]
    );
}

#[test]
fn test_empty_is_identity() {
    let mut seq = Sequential::new();
    assert!(seq.is_empty());
    let x = Tensor::new_f64(vec![1.0, -2.0], vec![2]).unwrap();
    assert_eq!(seq.forward(&x).unwrap(), x);
    assert_eq!(seq.backward(&x).unwrap(), x);
    assert_eq!(seq.num_parameters(), 0);
}

#[test]
fn test_backward_without_forward() {
    let mut seq = Sequential::new().with(Activation::relu());
    assert!(matches!(seq.backward(&scalar(1.0)), Err(JnnError::IllegalState { .. })));
    seq.forward(&scalar(1.0)).unwrap();
    seq.backward(&scalar(1.0)).unwrap();
    assert_eq!(seq.state(), ModuleState::BackwardDone);
    assert!(seq.backward(&scalar(1.0)).is_err());
}

#[test]
fn test_parameter_order_and_names() {
    let seq = Sequential::new()
        .with(Linear::new(3, 4, true, DType::F32).unwrap())
        .with(Activation::tanh())
        .with(Sequential::new().with(Linear::new(4, 2, false, DType::F32).unwrap()));

    let shapes: Vec<Vec<usize>> = seq.parameters().iter().map(|p| p.shape().to_vec()).collect();
    assert_eq!(shapes, vec![vec![3, 4], vec![4], vec![4, 2]]);
    let names: Vec<String> = seq.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["0.weight", "0.bias", "2.0.weight"]);
    assert_eq!(seq.num_parameters(), 12 + 4 + 8);
}

#[test]
fn test_parameters_mut_matches_parameters() {
    let mut seq = Sequential::new()
        .with(Linear::new(2, 2, true, DType::F64).unwrap())
        .with(Linear::new(2, 1, true, DType::F64).unwrap());
    let names: Vec<String> = seq.parameters().iter().map(|p| p.name().to_string()).collect();
    let names_mut: Vec<String> = seq.parameters_mut().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, names_mut);
}

#[test]
fn test_insert_remove_get() {
    let mut seq = Sequential::new().with(Activation::relu()).with(Activation::sigmoid());
    seq.insert(1, Box::new(Activation::tanh())).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.get(1).unwrap().describe().get_str("function").unwrap(), "tanh");
    let removed = seq.remove(0).unwrap();
    assert_eq!(removed.describe().get_str("function").unwrap(), "relu");
    assert!(seq.remove(5).is_err());
    assert!(seq.insert(9, Box::new(Activation::relu())).is_err());
    assert!(seq.get(2).is_none());
}

#[test]
fn test_zero_grad_recurses() {
    let mut seq = Sequential::new().with(Linear::new(2, 1, true, DType::F64).unwrap());
    let x = Tensor::new_f64(vec![1.0, 2.0], vec![1, 2]).unwrap();
    seq.forward(&x).unwrap();
    seq.backward(&Tensor::new_f64(vec![1.0], vec![1, 1]).unwrap()).unwrap();
    assert!(seq.parameters().iter().all(|p| p.grad().is_some()));
    seq.zero_grad();
    assert!(seq.parameters().iter().all(|p| p.grad().is_none()));
    assert_eq!(seq.state(), ModuleState::Idle);
    assert_eq!(seq.get(0).unwrap().state(), ModuleState::Idle);
}

#[test]
fn test_zero_grad_between_forward_and_backward() {
    let mut seq = Sequential::new()
        .with(Linear::new(2, 3, true, DType::F64).unwrap())
        .with(Activation::tanh())
        .with(Linear::new(3, 1, true, DType::F64).unwrap());
    let x = Tensor::new_f64(vec![1.0, 2.0], vec![1, 2]).unwrap();
    let g = Tensor::new_f64(vec![1.0], vec![1, 1]).unwrap();

    seq.forward(&x).unwrap();
    seq.backward(&g).unwrap();
    let first: Vec<Tensor> = seq.parameters().iter().map(|p| p.grad().unwrap().clone()).collect();

    seq.forward(&x).unwrap();
    seq.zero_grad();
    assert!(seq.parameters().iter().all(|p| p.grad().is_none()));
    assert_eq!(seq.state(), ModuleState::ForwardDone);
    seq.backward(&g).unwrap();
    assert_eq!(seq.state(), ModuleState::BackwardDone);

    // The old gradients were dropped, so one backward reproduces them exactly.
    let second: Vec<Tensor> = seq.parameters().iter().map(|p| p.grad().unwrap().clone()).collect();
    assert_eq!(first, second);
}
