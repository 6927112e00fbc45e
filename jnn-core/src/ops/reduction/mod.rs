pub mod max;
pub mod mean;
pub mod sum;
pub mod utils;

pub use max::max_axis_op;
pub use mean::{mean_axis_op, mean_op};
pub use sum::{reduce_to_shape_op, sum_axis_op, sum_op};
