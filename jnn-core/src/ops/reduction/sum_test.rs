use super::*;
use crate::error::JnnError;
use crate::tensor::Tensor;

fn matrix() -> Tensor {
    Tensor::new_f64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap()
}

#[test]
fn test_sum_all() {
    let s = sum_op(&matrix()).unwrap();
    assert_eq!(s.shape(), &[] as &[usize]);
    assert_eq!(s.item().unwrap(), 21.0);
}

#[test]
fn test_sum_axis() {
    let t = matrix();
    let s0 = sum_axis_op(&t, 0, false).unwrap();
    assert_eq!(s0.shape(), &[3]);
    assert_eq!(s0.get_f64_data().unwrap(), vec![5.0, 7.0, 9.0]);

    let s1 = sum_axis_op(&t, 1, true).unwrap();
    assert_eq!(s1.shape(), &[2, 1]);
    assert_eq!(s1.get_f64_data().unwrap(), vec![6.0, 15.0]);
}

#[test]
fn test_sum_axis_on_view() {
    let t = matrix().t().unwrap(); // [3, 2]
    let s = sum_axis_op(&t, 1, false).unwrap();
    assert_eq!(s.get_f64_data().unwrap(), vec![5.0, 7.0, 9.0]);
}

#[test]
fn test_sum_axis_invalid() {
    assert_eq!(
        sum_axis_op(&matrix(), 2, false).unwrap_err(),
        JnnError::InvalidDimension { dim: 2, rank: 2 }
    );
}

#[test]
fn test_reduce_to_shape() {
    let g = Tensor::new_f64(vec![1.0; 6], vec![2, 3]).unwrap();
    let bias_grad = reduce_to_shape_op(&g, &[3]).unwrap();
    assert_eq!(bias_grad.shape(), &[3]);
    assert_eq!(bias_grad.get_f64_data().unwrap(), vec![2.0, 2.0, 2.0]);

    let col_grad = reduce_to_shape_op(&matrix(), &[2, 1]).unwrap();
    assert_eq!(col_grad.get_f64_data().unwrap(), vec![6.0, 15.0]);

    let scalar_grad = reduce_to_shape_op(&matrix(), &[]).unwrap();
    assert_eq!(scalar_grad.item().unwrap(), 21.0);

    assert!(reduce_to_shape_op(&g, &[2]).is_err());
}
