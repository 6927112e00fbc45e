use crate::error::JnnError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;
use crate::with_dtype;

/// Element-wise negation.
pub fn neg_op(a: &Tensor) -> Result<Tensor, JnnError> {
    with_dtype!(a.dtype(), T => apply_unary_op::<T, _>(a, |x| -x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neg() {
        let t = Tensor::new(vec![1.0f32, -2.0, 0.0], vec![3]).unwrap();
        let r = neg_op(&t).unwrap();
        assert_eq!(r.get_f32_data().unwrap(), vec![-1.0, 2.0, -0.0]);
    }
}
