use crate::error::JnnError;
use crate::ops::apply_unary_op;
use crate::ops::traits::JnnNumeric;
use crate::tensor::Tensor;
use crate::with_dtype;

// The scalar is converted to the tensor's dtype before the operation.

pub fn add_scalar_op(a: &Tensor, scalar: f64) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let s = T::from_f64(scalar);
        apply_unary_op::<T, _>(a, move |x| x + s)
    })
}

pub fn mul_scalar_op(a: &Tensor, scalar: f64) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let s = T::from_f64(scalar);
        apply_unary_op::<T, _>(a, move |x| x * s)
    })
}

pub fn div_scalar_op(a: &Tensor, scalar: f64) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => {
        let s = T::from_f64(scalar);
        apply_unary_op::<T, _>(a, move |x| x / s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops_keep_dtype() {
        let t = Tensor::new_f64(vec![1.0, 2.0], vec![2]).unwrap();
        assert_eq!(add_scalar_op(&t, 0.5).unwrap().get_f64_data().unwrap(), vec![1.5, 2.5]);
        assert_eq!(mul_scalar_op(&t, -2.0).unwrap().get_f64_data().unwrap(), vec![-2.0, -4.0]);
        assert_eq!(div_scalar_op(&t, 4.0).unwrap().get_f64_data().unwrap(), vec![0.25, 0.5]);
    }

    #[test]
    fn test_scalar_on_view() {
        let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        let r = mul_scalar_op(&t.t().unwrap(), 10.0).unwrap();
        assert_eq!(r.get_f32_data().unwrap(), vec![10.0, 30.0, 20.0, 40.0]);
    }
}
