use super::*;
use approx::assert_relative_eq;

fn input() -> Tensor {
    Tensor::new_f64(vec![-1.5, -0.2, 0.0, 0.4, 2.0, 3.1], vec![2, 3]).unwrap()
}

fn all_kinds() -> Vec<ActivationKind> {
    vec![
        ActivationKind::ReLU,
        ActivationKind::LeakyReLU { alpha: 0.1 },
        ActivationKind::Sigmoid,
        ActivationKind::Tanh,
        ActivationKind::Gelu,
        ActivationKind::Softmax,
    ]
}

#[test]
fn test_relu_module() {
    let mut m = Activation::relu();
    let y = m.forward(&input()).unwrap();
    assert_eq!(y.get_f64_data().unwrap(), vec![0.0, 0.0, 0.0, 0.4, 2.0, 3.1]);
    let g = Tensor::new_f64(vec![1.0; 6], vec![2, 3]).unwrap();
    let dx = m.backward(&g).unwrap();
    assert_eq!(dx.get_f64_data().unwrap(), vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_backward_without_forward() {
    let mut m = Activation::sigmoid();
    let g = Tensor::new_f64(vec![1.0], vec![1]).unwrap();
    assert!(matches!(m.backward(&g), Err(JnnError::IllegalState { .. })));
}

#[test]
fn test_no_parameters() {
    let m = Activation::gelu();
    assert!(m.parameters().is_empty());
    assert_eq!(m.kind(), ModuleKind::Activation);
}

#[test]
fn test_describe_round_trip() {
    for kind in all_kinds() {
        let cfg = Activation::new(kind).describe();
        let name = cfg.get_str("function").unwrap();
        let alpha = cfg.get_f64("alpha").ok();
        assert_eq!(ActivationKind::from_name(name, alpha).unwrap(), kind);
    }
    assert!(ActivationKind::from_name("swish", None).is_err());
}

#[test]
fn test_every_kind_matches_finite_difference() {
    // Loss = sum(w * y) with fixed weights, so dL/dy = w.
    let w = vec![0.3, -1.0, 0.5, 2.0, -0.7, 1.1];
    let g = Tensor::new_f64(w.clone(), vec![2, 3]).unwrap();
    // Keep away from ReLU's kink at 0.
    let x0 = vec![-1.5, -0.2, 0.05, 0.4, 2.0, 3.1];
    let h = 1e-6;

    for kind in all_kinds() {
        let mut m = Activation::new(kind);
        m.forward(&Tensor::new_f64(x0.clone(), vec![2, 3]).unwrap()).unwrap();
        let analytic = m.backward(&g).unwrap().get_f64_data().unwrap();

        let mut loss = |x: &[f64]| {
            let y = m
                .forward(&Tensor::new_f64(x.to_vec(), vec![2, 3]).unwrap())
                .unwrap()
                .get_f64_data()
                .unwrap();
            y.iter().zip(&w).map(|(a, b)| a * b).sum::<f64>()
        };
        for i in 0..6 {
            let mut plus = x0.clone();
            let mut minus = x0.clone();
            plus[i] += h;
            minus[i] -= h;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * h);
            assert_relative_eq!(analytic[i], numeric, epsilon = 1e-5);
        }
    }
}
