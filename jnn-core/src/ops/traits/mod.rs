pub mod numeric;

pub use numeric::JnnNumeric;
