use num_traits::{Float, NumAssignOps, NumCast};
use std::fmt::Debug;

use crate::buffer::Buffer;
use crate::types::DType;

/// A trait representing the element types usable in jNN tensor kernels.
///
/// Kernels are written once, generic over `T: JnnNumeric`, and dispatched on
/// the runtime [`DType`] with [`with_dtype!`](crate::with_dtype). The trait
/// also ties each element type to its [`Buffer`] variant.
pub trait JnnNumeric:
    Float
    + NumAssignOps
    + PartialOrd
    + Debug
    + Copy
    + Send
    + Sync
    + 'static
{
    /// The runtime tag for this element type.
    const DTYPE: DType;

    fn slice_of(buffer: &Buffer) -> Option<&[Self]>;

    fn slice_of_mut(buffer: &mut Buffer) -> Option<&mut [Self]>;

    fn into_buffer(data: Vec<Self>) -> Buffer;

    /// Lossless for f32/f64 -> f64.
    fn as_f64(self) -> f64;

    /// Rounds to nearest for f64 -> f32.
    fn from_f64(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }
}

impl JnnNumeric for f32 {
    const DTYPE: DType = DType::F32;

    fn slice_of(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::F32(v) => Some(v),
            _ => None,
        }
    }

    fn slice_of_mut(buffer: &mut Buffer) -> Option<&mut [Self]> {
        match buffer {
            Buffer::F32(v) => Some(v),
            _ => None,
        }
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::F32(data)
    }

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl JnnNumeric for f64 {
    const DTYPE: DType = DType::F64;

    fn slice_of(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::F64(v) => Some(v),
            _ => None,
        }
    }

    fn slice_of_mut(buffer: &mut Buffer) -> Option<&mut [Self]> {
        match buffer {
            Buffer::F64(v) => Some(v),
            _ => None,
        }
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::F64(data)
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Runs `$body` with `$T` bound to the element type matching `$dtype`.
#[macro_export]
macro_rules! with_dtype {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::types::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::types::DType::F64 => {
                type $T = f64;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_numeric<T: JnnNumeric>(value: T) -> f64 {
        value.as_f64()
    }

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f32 as JnnNumeric>::DTYPE, DType::F32);
        assert_eq!(<f64 as JnnNumeric>::DTYPE, DType::F64);
    }

    #[test]
    fn test_f32_round_trip_through_f64_is_exact() {
        let v = 0.1f32;
        assert_eq!(f32::from_f64(process_numeric(v)).to_bits(), v.to_bits());
    }

    #[test]
    fn test_with_dtype_dispatch() {
        let size = with_dtype!(DType::F64, T => std::mem::size_of::<T>());
        assert_eq!(size, 8);
        let size = with_dtype!(DType::F32, T => std::mem::size_of::<T>());
        assert_eq!(size, 4);
    }
}
