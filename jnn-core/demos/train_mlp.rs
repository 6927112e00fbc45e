//! # Training a small MLP
//!
//! Fits `y = sin(x)` on `[-2, 2]` with a two-hidden-layer perceptron.
//!
//! ## Steps shown
//! 1. Building the network with [`MlpBuilder`].
//! 2. Picking an optimizer from an [`OptimizerConfig`] (parsed from JSON here).
//! 3. The manual loop: `forward`, loss, `zero_grad`, `backward`, clipping, `step`.
//!
//! Run with `cargo run --example train_mlp`.

use jnn_core::model::MlpBuilder;
use jnn_core::nn::{ActivationKind, MSELoss, Reduction};
use jnn_core::optim::{clip_grad_norm_, OptimizerConfig};
use jnn_core::{DType, JnnError, Module, Tensor};

const SAMPLES: usize = 64;
const EPOCHS: usize = 300;

fn main() -> Result<(), JnnError> {
    let xs: Vec<f64> = (0..SAMPLES)
        .map(|i| -2.0 + 4.0 * i as f64 / (SAMPLES - 1) as f64)
        .collect();
    let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let inputs = Tensor::new_f64(xs, vec![SAMPLES, 1])?;
    let targets = Tensor::new_f64(ys, vec![SAMPLES, 1])?;

    let mut model = MlpBuilder::new(1, 1)
        .hidden_size(24)
        .hidden_layers(1)
        .activation(ActivationKind::Tanh)
        .dtype(DType::F64)
        .build()?;
    println!("{} parameters", model.num_parameters());

    let config: OptimizerConfig = serde_json::from_str(r#"{"type": "adam", "lr": 0.01}"#)
        .map_err(|e| JnnError::ConfigurationError(e.to_string()))?;
    let mut optimizer = config.build()?;
    let mut loss_fn = MSELoss::new(Reduction::Mean);

    for epoch in 0..EPOCHS {
        let prediction = model.forward(&inputs)?;
        let loss = loss_fn.forward(&prediction, &targets)?.item()?;

        model.zero_grad();
        model.backward(&loss_fn.backward()?)?;
        let norm = clip_grad_norm_(model.parameters_mut(), 1.0)?;
        optimizer.step(&mut model.parameters_mut())?;

        if epoch % 50 == 0 || epoch == EPOCHS - 1 {
            println!("epoch {:>3}  loss {:.6}  grad norm {:.4}", epoch, loss, norm);
        }
    }

    let probe = Tensor::new_f64(vec![-1.0, 0.0, 1.0], vec![3, 1])?;
    let out = model.forward(&probe)?.get_f64_data()?;
    for (x, y) in [-1.0f64, 0.0, 1.0].iter().zip(out) {
        println!("sin({:>4}) ~ {:.4} (exact {:.4})", x, y, x.sin());
    }
    Ok(())
}
