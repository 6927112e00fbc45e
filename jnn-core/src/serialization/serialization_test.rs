use super::*;
use crate::model::Sequential;
use crate::nn::{Activation, Embedding, LayerNorm, Linear};
use crate::tensor::Tensor;
use crate::types::DType;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_model() -> Sequential {
    let mut rng = StdRng::seed_from_u64(42);
    Sequential::new()
        .with(Linear::with_rng(3, 4, true, DType::F32, &mut rng).unwrap())
        .with(Activation::leaky_relu(0.2))
        .with(LayerNorm::new(4, 1e-5, true, DType::F32).unwrap())
        .with(Sequential::new().with(Linear::with_rng(4, 2, false, DType::F32, &mut rng).unwrap()))
}

fn snapshot(module: &dyn Module) -> Vec<(String, Vec<usize>, Vec<u64>)> {
    module
        .named_parameters()
        .into_iter()
        .map(|(n, p)| {
            let bits = p.to_vec_f64().unwrap().iter().map(|v| v.to_bits()).collect();
            (n, p.shape().to_vec(), bits)
        })
        .collect()
}

fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("jnn_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_round_trip_reproduces_parameters() {
    let model = sample_model();
    let doc = serialize(&model).unwrap();
    let rebuilt = deserialize(&doc).unwrap();
    assert_eq!(snapshot(&model), snapshot(rebuilt.as_ref()));
    assert_eq!(serialize(rebuilt.as_ref()).unwrap(), doc);
}

#[test]
fn test_serialize_is_idempotent_byte_for_byte() {
    let model = sample_model();
    let first = to_json(&serialize(&model).unwrap(), false).unwrap();
    let second = to_json(&serialize(&model).unwrap(), false).unwrap();
    assert_eq!(first, second);
    let again = to_json(&serialize(deserialize(&from_json(&first).unwrap()).unwrap().as_ref()).unwrap(), false).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_document_layout() {
    let doc = serialize(&sample_model()).unwrap();
    assert_eq!(doc.format, FORMAT_NAME);
    assert_eq!(doc.version, DocumentVersion::CURRENT);
    assert_eq!(doc.root.kind, "sequential");
    let kinds: Vec<&str> = doc.root.children.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, vec!["linear", "activation", "layer_norm", "sequential"]);
    assert_eq!(doc.root.children[0].parameters[0].shape, vec![3, 4]);

    let json: serde_json::Value = serde_json::from_str(&to_json(&doc, true).unwrap()).unwrap();
    let act = &json["root"]["children"][1];
    assert!(act.get("children").is_none());
    assert_eq!(act["config"]["function"], "leaky_relu");
    assert_eq!(json["version"]["major"], 1);
}

#[test]
fn test_unknown_kind_fails_without_partial_tree() {
    let mut doc = serialize(&sample_model()).unwrap();
    doc.root.children[3].children[0].kind = "conv2d".to_string();
    assert_eq!(
        deserialize(&doc).unwrap_err(),
        JnnError::UnknownModuleKind("conv2d".to_string())
    );
}

#[test]
fn test_unsupported_major_version() {
    let mut doc = serialize(&Activation::relu()).unwrap();
    doc.version = DocumentVersion { major: 2, minor: 0 };
    assert!(matches!(deserialize(&doc), Err(JnnError::UnsupportedVersion { supported: 1, .. })));

    let text = r#"{"format": "jnn-module", "version": {"major": 3, "minor": 1}, "root": {"layers": []}}"#;
    assert!(matches!(from_json(text), Err(JnnError::UnsupportedVersion { .. })));

    doc.version = DocumentVersion { major: 1, minor: 7 };
    assert!(deserialize(&doc).is_ok());
}

#[test]
fn test_parameter_mismatches_are_malformed() {
    let doc = serialize(&Linear::new(2, 2, true, DType::F64).unwrap()).unwrap();

    let mut missing = doc.clone();
    missing.root.parameters.pop();
    assert!(matches!(deserialize(&missing), Err(JnnError::MalformedDocument(_))));

    let mut extra = doc.clone();
    let dup = extra.root.parameters[1].clone();
    extra.root.parameters.push(dup);
    assert!(matches!(deserialize(&extra), Err(JnnError::MalformedDocument(_))));

    let mut short = doc.clone();
    short.root.parameters[0].values.pop();
    assert!(matches!(deserialize(&short), Err(JnnError::MalformedDocument(_))));

    let mut reshaped = doc.clone();
    reshaped.root.parameters[0].shape = vec![4, 1];
    assert!(matches!(deserialize(&reshaped), Err(JnnError::ShapeMismatch { .. })));

    let mut missing_config = doc;
    missing_config.root.config = crate::nn::ModuleConfig::new();
    assert!(matches!(deserialize(&missing_config), Err(JnnError::MalformedDocument(_))));
}

#[test]
fn test_non_finite_values_survive_json() {
    let mut emb = Embedding::new(2, 2, DType::F32).unwrap();
    emb.parameters_mut()[0]
        .set_value(Tensor::new(vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.0], vec![2, 2]).unwrap())
        .unwrap();
    let text = to_json(&serialize(&emb).unwrap(), false).unwrap();
    assert!(text.contains("\"NaN\""));
    assert!(text.contains("\"-Infinity\""));

    let rebuilt = deserialize(&from_json(&text).unwrap()).unwrap();
    let values = rebuilt.parameters()[0].get_f32_data().unwrap();
    assert!(values[0].is_nan());
    assert_eq!(values[1], f32::INFINITY);
    assert_eq!(values[2], f32::NEG_INFINITY);
    assert_eq!(values[3].to_bits(), (-0.0f32).to_bits());
}

#[test]
fn test_f64_values_are_bit_exact() {
    use rand::Rng;

    let mut rng = StdRng::seed_from_u64(2024);
    let mut values: Vec<f64> = (0..511)
        .map(|i| {
            let scale = 10f64.powi((i % 13) as i32 - 6);
            (rng.gen::<f64>() - 0.5) * scale
        })
        .collect();
    // Needs correctly rounded parsing: a naive reader lands one ulp below.
    values.push(0.37414508654144507);
    let expected: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();

    let lin = Linear::from_tensors(Tensor::new_f64(values, vec![16, 32]).unwrap(), None).unwrap();
    let text = to_json(&serialize(&lin).unwrap(), false).unwrap();
    let rebuilt = deserialize(&from_json(&text).unwrap()).unwrap();

    let weight = rebuilt.parameters()[0];
    assert_eq!(weight.dtype(), DType::F64);
    let bits: Vec<u64> = weight.get_f64_data().unwrap().iter().map(|v| v.to_bits()).collect();
    assert_eq!(bits, expected);
    assert_eq!(to_json(&serialize(rebuilt.as_ref()).unwrap(), false).unwrap(), text);
}

#[test]
fn test_save_and_load_file() {
    let path = temp_file("save_load");
    let model = sample_model();
    save(&model, &path, SaveOptions::pretty()).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(snapshot(&model), snapshot(loaded.as_ref()));
    let tmp = path.with_file_name(format!(".{}.tmp", path.file_name().unwrap().to_string_lossy()));
    assert!(!tmp.exists());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_io_errors() {
    let missing = temp_file("does_not_exist");
    assert!(matches!(load(&missing), Err(JnnError::IoError { .. })));

    let bad_dir = std::env::temp_dir().join("jnn_no_such_dir").join("model.json");
    assert!(matches!(
        save(&Activation::relu(), &bad_dir, SaveOptions::default()),
        Err(JnnError::IoError { .. })
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(from_json("{not json"), Err(JnnError::MalformedDocument(_))));
    let text = r#"{"format": "other", "version": {"major": 1, "minor": 0}, "root": {"kind": "sequential"}}"#;
    let doc = from_json(text).unwrap();
    assert!(matches!(deserialize(&doc), Err(JnnError::MalformedDocument(_))));
}

#[test]
fn test_state_dict_round_trip() {
    let source = sample_model();
    let mut target = sample_model();
    // Perturb the target so the copy is observable.
    for p in target.parameters_mut() {
        p.value_mut().fill_(0.0).unwrap();
    }
    let state = state_dict(&source).unwrap();
    assert_eq!(state[0].0, "0.weight");
    load_state_dict(&mut target, &state).unwrap();
    assert_eq!(snapshot(&source), snapshot(&target));
}

#[test]
fn test_load_state_dict_errors_leave_module_untouched() {
    let mut target = Linear::new(2, 2, true, DType::F32).unwrap();
    let original = state_dict(&target).unwrap();

    let mut missing = original.clone();
    missing.pop();
    assert!(matches!(load_state_dict(&mut target, &missing), Err(JnnError::MalformedDocument(_))));

    let mut extra = original.clone();
    extra.push(("ghost".to_string(), Tensor::new(vec![1.0], vec![1]).unwrap()));
    assert!(matches!(load_state_dict(&mut target, &extra), Err(JnnError::MalformedDocument(_))));

    let mut wrong_shape = original.clone();
    wrong_shape[0].1 = Tensor::new(vec![9.0; 4], vec![4, 1]).unwrap();
    wrong_shape[1].1 = Tensor::new(vec![9.0; 2], vec![2]).unwrap();
    assert!(matches!(load_state_dict(&mut target, &wrong_shape), Err(JnnError::ShapeMismatch { .. })));
    assert_eq!(state_dict(&target).unwrap(), original);
}
