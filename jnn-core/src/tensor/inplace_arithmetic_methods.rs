use crate::error::JnnError;
use crate::ops::math_elem::check_bounds;
use crate::ops::traits::JnnNumeric;
use crate::ops::{check_same_dtype, check_same_shape};
use crate::tensor::Tensor;
use crate::with_dtype;

/// In-place arithmetic.
///
/// These methods write into `self`'s buffer. The change is visible to every
/// tensor sharing that buffer (views, clones), which is the point: optimizers
/// and gradient accumulation update parameters without reallocating. Shape
/// and dtype of `self` never change.
impl Tensor {
    /// `self += other`. Shapes and dtypes must be identical.
    ///
    /// # Errors
    /// `ShapeMismatch` / `DataTypeMismatch` on incompatible operands.
    pub fn add_(&mut self, other: &Tensor) -> Result<(), JnnError> {
        self.zip_inplace(other, "add_", |a, b| a + b)
    }

    /// `self -= other`. Shapes and dtypes must be identical.
    pub fn sub_(&mut self, other: &Tensor) -> Result<(), JnnError> {
        self.zip_inplace(other, "sub_", |a, b| a - b)
    }

    /// Overwrites `self`'s elements with `other`'s.
    pub fn copy_from_(&mut self, other: &Tensor) -> Result<(), JnnError> {
        self.zip_inplace(other, "copy_from_", |_, b| b)
    }

    /// `self *= scalar`.
    pub fn mul_scalar_(&mut self, scalar: f64) -> Result<(), JnnError> {
        with_dtype!(self.dtype(), T => {
            let s = T::from_f64(scalar);
            self.map_inplace::<T, _>(|x| x * s)
        })
    }

    /// Sets every element to `value`.
    pub fn fill_(&mut self, value: f64) -> Result<(), JnnError> {
        with_dtype!(self.dtype(), T => {
            let v = T::from_f64(value);
            self.map_inplace::<T, _>(|_| v)
        })
    }

    /// Clamps every element into `[min, max]`.
    pub fn clamp_(&mut self, min: f64, max: f64) -> Result<(), JnnError> {
        check_bounds(min, max)?;
        with_dtype!(self.dtype(), T => {
            let (lo, hi) = (T::from_f64(min), T::from_f64(max));
            self.map_inplace::<T, _>(|x| x.max(lo).min(hi))
        })
    }

    fn map_inplace<T: JnnNumeric, F: Fn(T) -> T>(&mut self, f: F) -> Result<(), JnnError> {
        let mut guard = self.write_buffer()?;
        let slice = guard.try_as_mut_slice::<T>()?;
        for pos in self.physical_indices() {
            slice[pos] = f(slice[pos]);
        }
        Ok(())
    }

    fn zip_inplace<F>(&mut self, other: &Tensor, op_name: &str, f: F) -> Result<(), JnnError>
    where
        F: Fn(f64, f64) -> f64 + Copy,
    {
        check_same_shape(self, other, op_name)?;
        check_same_dtype(self, other, op_name)?;
        with_dtype!(self.dtype(), T => {
            // Read first: `other` may share `self`'s buffer.
            let rhs = other.contiguous_data::<T>()?;
            let mut guard = self.write_buffer()?;
            let slice = guard.try_as_mut_slice::<T>()?;
            for (pos, b) in self.physical_indices().zip(rhs) {
                slice[pos] = T::from_f64(f(slice[pos].as_f64(), b.as_f64()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "inplace_arithmetic_methods_test.rs"]
mod tests;
