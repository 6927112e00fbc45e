use jnn_core::model::MlpBuilder;
use jnn_core::nn::losses::cross_entropy::one_hot;
use jnn_core::nn::{ActivationKind, CrossEntropyLoss, MSELoss, Reduction};
use jnn_core::optim::{clip_grad_norm_, Optimizer, OptimizerConfig};
use jnn_core::{DType, Module, Tensor};

mod common;
use common::{seeded, t64};

/// Runs `epochs` full-batch MSE steps and returns the first and last loss.
fn fit_regression(config: OptimizerConfig, epochs: usize) -> (f64, f64) {
    let mut model = MlpBuilder::new(1, 1)
        .hidden_size(16)
        .activation(ActivationKind::Tanh)
        .dtype(DType::F64)
        .build_with_rng(&mut seeded(7))
        .unwrap();
    let xs: Vec<f64> = (0..16).map(|i| -1.0 + i as f64 / 7.5).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
    let inputs = t64(xs, vec![16, 1]);
    let targets = t64(ys, vec![16, 1]);

    let mut loss_fn = MSELoss::new(Reduction::Mean);
    let mut optimizer = config.build().unwrap();
    let mut first = None;
    let mut last = 0.0;
    for _ in 0..epochs {
        let prediction = model.forward(&inputs).unwrap();
        last = loss_fn.forward(&prediction, &targets).unwrap().item().unwrap();
        first.get_or_insert(last);
        model.zero_grad();
        model.backward(&loss_fn.backward().unwrap()).unwrap();
        optimizer.step(&mut model.parameters_mut()).unwrap();
    }
    (first.unwrap(), last)
}

#[test]
fn test_sgd_reduces_regression_loss() {
    let config = OptimizerConfig::Sgd {
        lr: 0.1,
        momentum: 0.9,
        weight_decay: 0.0,
        nesterov: false,
    };
    let (first, last) = fit_regression(config, 200);
    assert!(last < first * 0.2, "loss went from {} to {}", first, last);
}

#[test]
fn test_adam_reduces_regression_loss() {
    let (first, last) = fit_regression(OptimizerConfig::adam(0.01), 200);
    assert!(last < first * 0.2, "loss went from {} to {}", first, last);
}

#[test]
fn test_classifier_learns_separable_data() {
    let mut model = MlpBuilder::new(2, 2)
        .hidden_size(8)
        .dtype(DType::F64)
        .build_with_rng(&mut seeded(3))
        .unwrap();
    let points = vec![
        (-1.0, -1.0, 0),
        (-0.8, -0.6, 0),
        (-0.5, -0.9, 0),
        (1.0, 1.0, 1),
        (0.7, 0.9, 1),
        (0.9, 0.4, 1),
    ];
    let inputs = Tensor::new_f64(
        points.iter().flat_map(|&(a, b, _)| [a, b]).collect(),
        vec![points.len(), 2],
    )
    .unwrap();
    let classes: Vec<usize> = points.iter().map(|p| p.2).collect();
    let targets = one_hot(&classes, 2, DType::F64).unwrap();

    let mut loss_fn = CrossEntropyLoss::new(Reduction::Mean);
    let mut optimizer = OptimizerConfig::adam(0.05).build().unwrap();
    for _ in 0..100 {
        let logits = model.forward(&inputs).unwrap();
        loss_fn.forward(&logits, &targets).unwrap();
        model.zero_grad();
        model.backward(&loss_fn.backward().unwrap()).unwrap();
        clip_grad_norm_(model.parameters_mut(), 5.0).unwrap();
        optimizer.step(&mut model.parameters_mut()).unwrap();
    }

    let logits = model.forward(&inputs).unwrap().get_f64_data().unwrap();
    for (row, &class) in logits.chunks(2).zip(&classes) {
        let predicted = if row[1] > row[0] { 1 } else { 0 };
        assert_eq!(predicted, class);
    }
    assert_eq!(optimizer.steps(), 100);
}
