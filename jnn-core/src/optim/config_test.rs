use super::*;

#[test]
fn test_build_from_json() {
    let cfg: OptimizerConfig = serde_json::from_str(r#"{"type": "adam", "lr": 0.001}"#).unwrap();
    assert_eq!(cfg, OptimizerConfig::adam(0.001));
    let opt = cfg.build().unwrap();
    assert_eq!(opt.learning_rate(), 0.001);

    let cfg: OptimizerConfig =
        serde_json::from_str(r#"{"type": "sgd", "lr": 0.1, "momentum": 0.9}"#).unwrap();
    assert!(matches!(cfg, OptimizerConfig::Sgd { momentum, .. } if momentum == 0.9));
}

#[test]
fn test_round_trip_json() {
    let cfg = OptimizerConfig::adamw(0.01);
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(serde_json::from_str::<OptimizerConfig>(&text).unwrap(), cfg);
}

#[test]
fn test_invalid_values_fail_on_build() {
    let bad = OptimizerConfig::Sgd {
        lr: 0.1,
        momentum: 0.0,
        weight_decay: 0.0,
        nesterov: true,
    };
    assert!(matches!(bad.build(), Err(JnnError::ConfigurationError(_))));
    assert!(OptimizerConfig::adam(0.0).build().is_err());
}
