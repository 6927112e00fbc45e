//! # Saving and loading a module tree
//!
//! Builds a model, writes it to a JSON document on disk, reads it back and
//! checks that both trees compute the same output.
//!
//! Run with `cargo run --example save_and_load`.

use jnn_core::model::Sequential;
use jnn_core::nn::{Activation, LayerNorm, Linear};
use jnn_core::serialization::{self, SaveOptions};
use jnn_core::{DType, JnnError, Module, Tensor};

fn main() -> Result<(), JnnError> {
    let mut model = Sequential::new()
        .with(Linear::new(4, 8, true, DType::F32)?)
        .with(LayerNorm::new(8, 1e-5, true, DType::F32)?)
        .with(Activation::gelu())
        .with(Linear::new(8, 2, true, DType::F32)?);

    let path = std::env::temp_dir().join("jnn_save_and_load_demo.json");
    serialization::save(&model, &path, SaveOptions::pretty())?;
    println!("wrote {}", path.display());

    let document = serialization::load_document(&path)?;
    println!(
        "format {} v{}, root kind `{}` with {} children",
        document.format,
        document.version,
        document.root.kind,
        document.root.children.len()
    );

    let mut restored = serialization::load(&path)?;
    for (name, param) in restored.named_parameters() {
        println!("  {:<10} {:?}", name, param.shape());
    }

    let x = Tensor::new(vec![0.5, -1.0, 2.0, 0.0, 1.5, 0.25, -0.75, 1.0], vec![2, 4])?;
    let a = model.forward(&x)?;
    let b = restored.forward(&x)?;
    println!("outputs identical: {}", a == b);

    std::fs::remove_file(&path).map_err(|e| JnnError::IoError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
