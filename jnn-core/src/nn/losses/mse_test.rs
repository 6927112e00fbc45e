use super::*;
use approx::assert_relative_eq;

fn t32(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).unwrap()
}

#[test]
fn test_mse_mean_forward_backward() {
    let mut mse = MSELoss::new(Reduction::Mean);
    let output = t32(vec![1.0, 2.0], vec![2]);
    let target = t32(vec![1.5, 1.0], vec![2]);
    let loss = mse.forward(&output, &target).unwrap();
    assert_eq!(loss.shape(), &[] as &[usize]);
    assert_relative_eq!(loss.item().unwrap(), 0.625, epsilon = 1e-6);

    let grad = mse.backward().unwrap();
    assert_eq!(grad.get_f32_data().unwrap(), vec![-0.5, 1.0]);
}

#[test]
fn test_mse_sum() {
    let mut mse = MSELoss::new(Reduction::Sum);
    let output = Tensor::new_f64(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let target = Tensor::new_f64(vec![0.0, 2.0, 5.0, 4.0], vec![2, 2]).unwrap();
    assert_relative_eq!(mse.forward(&output, &target).unwrap().item().unwrap(), 5.0);
    assert_eq!(mse.backward().unwrap().get_f64_data().unwrap(), vec![2.0, 0.0, -4.0, 0.0]);
}

#[test]
fn test_mse_shape_and_dtype_checks() {
    let mut mse = MSELoss::default();
    let a = t32(vec![1.0, 2.0], vec![2]);
    let b = t32(vec![1.0, 2.0, 3.0], vec![3]);
    assert!(matches!(mse.forward(&a, &b), Err(JnnError::ShapeMismatch { .. })));
    let c = Tensor::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(matches!(mse.forward(&a, &c), Err(JnnError::DataTypeMismatch { .. })));
}

#[test]
fn test_mse_backward_needs_forward() {
    let mut mse = MSELoss::new(Reduction::Mean);
    assert!(matches!(mse.backward(), Err(JnnError::IllegalState { .. })));
    let a = t32(vec![1.0], vec![1]);
    mse.forward(&a, &a).unwrap();
    assert_eq!(mse.state(), ModuleState::ForwardDone);
    mse.backward().unwrap();
    assert_eq!(mse.state(), ModuleState::BackwardDone);
    assert!(mse.backward().is_err());
}

#[test]
fn test_reduction_from_str() {
    assert_eq!("MEAN".parse::<Reduction>().unwrap(), Reduction::Mean);
    assert_eq!("sum".parse::<Reduction>().unwrap(), Reduction::Sum);
    assert!("none".parse::<Reduction>().is_err());
}
