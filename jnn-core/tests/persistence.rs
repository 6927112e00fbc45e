use jnn_core::model::{MlpBuilder, Sequential};
use jnn_core::nn::{ActivationKind, Embedding, LayerNorm};
use jnn_core::serialization::{self, deserialize, from_json, serialize, to_json, SaveOptions};
use jnn_core::{DType, JnnError, Module};

mod common;
use common::seeded;

fn parameter_bits(module: &dyn Module) -> Vec<(String, Vec<usize>, Vec<u64>)> {
    module
        .named_parameters()
        .into_iter()
        .map(|(name, p)| {
            let bits = p.to_vec_f64().unwrap().into_iter().map(f64::to_bits).collect();
            (name, p.shape().to_vec(), bits)
        })
        .collect()
}

fn build_models() -> Vec<Box<dyn Module>> {
    vec![
        Box::new(
            MlpBuilder::new(3, 2)
                .hidden_layers(2)
                .activation(ActivationKind::LeakyReLU { alpha: 0.05 })
                .build_with_rng(&mut seeded(1))
                .unwrap(),
        ),
        Box::new(
            MlpBuilder::new(4, 4)
                .dtype(DType::F64)
                .bias(false)
                .build_with_rng(&mut seeded(2))
                .unwrap(),
        ),
        Box::new(
            Sequential::new()
                .with(Embedding::with_rng(10, 4, DType::F32, &mut seeded(3)).unwrap())
                .with(LayerNorm::new(4, 1e-6, false, DType::F32).unwrap()),
        ),
    ]
}

#[test]
fn test_round_trip_law() {
    for model in build_models() {
        assert!(model.num_parameters() > 0);
        let rebuilt = deserialize(&serialize(model.as_ref()).unwrap()).unwrap();
        assert_eq!(parameter_bits(model.as_ref()), parameter_bits(rebuilt.as_ref()));
        assert_eq!(model.kind(), rebuilt.kind());
    }
}

#[test]
fn test_idempotence_and_reserialization() {
    for model in build_models() {
        let a = to_json(&serialize(model.as_ref()).unwrap(), false).unwrap();
        let b = to_json(&serialize(model.as_ref()).unwrap(), false).unwrap();
        assert_eq!(a, b);
        let rebuilt = deserialize(&from_json(&a).unwrap()).unwrap();
        assert_eq!(to_json(&serialize(rebuilt.as_ref()).unwrap(), false).unwrap(), a);
    }
}

#[test]
fn test_rebuilt_model_computes_the_same_output() {
    let mut model = MlpBuilder::new(2, 3).build_with_rng(&mut seeded(11)).unwrap();
    let path = std::env::temp_dir().join(format!("jnn_it_same_output_{}.json", std::process::id()));
    serialization::save(&model, &path, SaveOptions::default()).unwrap();
    let mut loaded = serialization::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let x = jnn_core::Tensor::new(vec![0.3, -1.2, 2.0, 0.1], vec![2, 2]).unwrap();
    assert_eq!(model.forward(&x).unwrap(), loaded.forward(&x).unwrap());
}

#[test]
fn test_unknown_root_kind() {
    let text = r#"{
        "format": "jnn-module",
        "version": {"major": 1, "minor": 0},
        "root": {"kind": "transformer", "config": {}, "parameters": []}
    }"#;
    let doc = from_json(text).unwrap();
    assert!(matches!(deserialize(&doc), Err(JnnError::UnknownModuleKind(k)) if k == "transformer"));
}

#[test]
fn test_handwritten_document() {
    let text = r#"{
        "format": "jnn-module",
        "version": {"major": 1, "minor": 2},
        "root": {
            "kind": "sequential",
            "config": {},
            "children": [
                {"kind": "linear", "config": {"in_features": 2, "out_features": 1, "bias": true},
                 "parameters": [
                    {"name": "weight", "shape": [2, 1], "dtype": "f64", "values": [1, -2.5]},
                    {"name": "bias", "shape": [1], "dtype": "f64", "values": [0.5]}
                 ]},
                {"kind": "activation", "config": {"function": "relu"}}
            ]
        }
    }"#;
    let mut model = deserialize(&from_json(text).unwrap()).unwrap();
    let x = jnn_core::Tensor::new_f64(vec![3.0, 1.0, 0.0, 1.0], vec![2, 2]).unwrap();
    let y = model.forward(&x).unwrap();
    assert_eq!(y.get_f64_data().unwrap(), vec![1.0, 0.0]);
}
