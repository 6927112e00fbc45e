use super::*;
use crate::error::JnnError;

#[test]
fn test_relu_forward() {
    let t = Tensor::new(vec![-1.0f32, 0.0, 2.5], vec![3]).unwrap();
    assert_eq!(relu_op(&t).unwrap().get_f32_data().unwrap(), vec![0.0, 0.0, 2.5]);
}

#[test]
fn test_relu_backward_masks_gradient() {
    let x = Tensor::new_f64(vec![-1.0, 0.0, 2.5], vec![3]).unwrap();
    let g = Tensor::new_f64(vec![10.0, 10.0, 10.0], vec![3]).unwrap();
    let dx = relu_backward_op(&g, &x).unwrap();
    assert_eq!(dx.get_f64_data().unwrap(), vec![0.0, 0.0, 10.0]);
}

#[test]
fn test_relu_backward_shape_mismatch() {
    let x = Tensor::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
    let g = Tensor::new_f64(vec![1.0], vec![1]).unwrap();
    assert!(matches!(
        relu_backward_op(&g, &x),
        Err(JnnError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_leaky_relu() {
    let x = Tensor::new_f64(vec![-2.0, 3.0], vec![2]).unwrap();
    assert_eq!(leaky_relu_op(&x, 0.01).unwrap().get_f64_data().unwrap(), vec![-0.02, 3.0]);
    let g = Tensor::new_f64(vec![1.0, 1.0], vec![2]).unwrap();
    assert_eq!(
        leaky_relu_backward_op(&g, &x, 0.01).unwrap().get_f64_data().unwrap(),
        vec![0.01, 1.0]
    );
}
