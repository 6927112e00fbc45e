// src/ops/view/mod.rs

//! View operations: new metadata over the same buffer, no element copies
//! (except `reshape` of a non-contiguous input, which goes through
//! [`contiguous_op`]).

pub mod contiguous;
pub mod reshape;
pub mod slice;
pub mod squeeze_unsqueeze;
pub mod transpose;

pub(crate) use contiguous::contiguous_op;
pub(crate) use reshape::reshape_op;
pub(crate) use slice::slice_op;
pub(crate) use squeeze_unsqueeze::{squeeze_op, unsqueeze_op};
pub(crate) use transpose::transpose_op;

use std::sync::Arc;

use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Builds a view of `tensor`'s buffer with the given layout.
pub(crate) fn make_view(tensor: &Tensor, offset: usize, shape: Vec<usize>, strides: Vec<usize>) -> Tensor {
    let td = TensorData::new_view(
        Arc::clone(&tensor.data.buffer),
        tensor.dtype(),
        offset,
        shape,
        strides,
    );
    Tensor::from_data(td)
}
