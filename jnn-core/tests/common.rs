use jnn_core::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[allow(dead_code)]
pub fn t32(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor f32 creation failed")
}

#[allow(dead_code)]
pub fn t64(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Test tensor f64 creation failed")
}

#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Element-wise comparison of two value slices within `epsilon`.
#[allow(dead_code)]
pub fn assert_all_close(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= epsilon,
            "Mismatch at index {}: left = {}, right = {}, epsilon = {}",
            i,
            a,
            e,
            epsilon
        );
    }
}
