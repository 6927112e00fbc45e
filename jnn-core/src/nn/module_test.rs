use super::*;
use crate::tensor::zeros;
use crate::types::DType;

// Minimal module: identity forward, one parameter.
#[derive(Debug)]
struct MockModule {
    param: Parameter,
    record: ComputationRecord<()>,
}

impl MockModule {
    fn new(shape: &[usize]) -> Self {
        MockModule {
            param: Parameter::new("param", zeros(shape, DType::F32).unwrap()),
            record: ComputationRecord::default(),
        }
    }
}

impl Module for MockModule {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, JnnError> {
        self.record.save(());
        Ok(input.clone())
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, JnnError> {
        self.record.get("Mock")?;
        self.record.consume();
        Ok(grad_output.clone())
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

    fn local_parameters(&self) -> Vec<&Parameter> {
        vec![&self.param]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.param]
    }

    fn zero_grad(&mut self) {
        self.param.zero_grad();
        self.record.settle();
    }
}

#[test]
fn test_module_kind_tags_round_trip() {
    for kind in ModuleKind::ALL {
        assert_eq!(ModuleKind::from_tag(kind.tag()).unwrap(), kind);
    }
    assert_eq!(
        ModuleKind::from_tag("conv2d").unwrap_err(),
        JnnError::UnknownModuleKind("conv2d".to_string())
    );
}

#[test]
fn test_default_parameter_traversal() {
    let m = MockModule::new(&[2, 3]);
    assert_eq!(m.parameters().len(), 1);
    assert_eq!(m.num_parameters(), 6);
    let named = m.named_parameters();
    assert_eq!(named[0].0, "param");
    assert!(m.children().is_empty());
}

#[test]
fn test_record_lifecycle() {
    let mut m = MockModule::new(&[1]);
    let x = zeros(&[1], DType::F32).unwrap();
    assert_eq!(m.state(), ModuleState::Idle);
    assert!(matches!(m.backward(&x), Err(JnnError::IllegalState { .. })));

    m.forward(&x).unwrap();
    assert_eq!(m.state(), ModuleState::ForwardDone);
    m.backward(&x).unwrap();
    assert_eq!(m.state(), ModuleState::BackwardDone);
    assert!(matches!(m.backward(&x), Err(JnnError::IllegalState { .. })));

    m.zero_grad();
    assert_eq!(m.state(), ModuleState::Idle);

    m.forward(&x).unwrap();
    m.zero_grad();
    assert_eq!(m.state(), ModuleState::ForwardDone);
    m.backward(&x).unwrap();
    assert_eq!(m.state(), ModuleState::BackwardDone);
}

#[test]
fn test_config_getters() {
    let cfg = ModuleConfig::new()
        .with("in_features", 3usize)
        .with("eps", 1e-5)
        .with("bias", true)
        .with("function", "relu");
    assert_eq!(cfg.get_usize("in_features").unwrap(), 3);
    assert_eq!(cfg.get_f64("eps").unwrap(), 1e-5);
    assert_eq!(cfg.get_f64("in_features").unwrap(), 3.0);
    assert!(cfg.get_bool("bias").unwrap());
    assert_eq!(cfg.get_str("function").unwrap(), "relu");
    assert!(matches!(
        cfg.get_usize("missing"),
        Err(JnnError::MalformedDocument(_))
    ));
    assert!(matches!(
        cfg.get_bool("eps"),
        Err(JnnError::MalformedDocument(_))
    ));
}

#[test]
fn test_config_json_shape() {
    let cfg = ModuleConfig::new().with("b", 2usize).with("a", 0.5);
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(json, r#"{"a":0.5,"b":2}"#);
    let back: ModuleConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}
