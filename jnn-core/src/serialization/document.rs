//! The persisted document model.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::JnnError;
use crate::nn::module::ModuleConfig;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use crate::types::DType;

/// Value of the root `format` field.
pub const FORMAT_NAME: &str = "jnn-module";

/// Version of the document layout.
///
/// Readers accept any minor version of a major version they implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersion {
    pub major: u32,
    pub minor: u32,
}

impl DocumentVersion {
    pub const CURRENT: DocumentVersion = DocumentVersion { major: 1, minor: 0 };
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A whole persisted module tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub format: String,
    pub version: DocumentVersion,
    pub root: ModuleDocument,
}

impl ModelDocument {
    /// Wraps `root` with the current format tag and version.
    pub fn new(root: ModuleDocument) -> Self {
        ModelDocument {
            format: FORMAT_NAME.to_string(),
            version: DocumentVersion::CURRENT,
            root,
        }
    }
}

/// One node of the module tree.
///
/// `children` is only populated for containers and omitted from the
/// output when empty. Order of `children` and `parameters` is attach order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDocument {
    pub kind: String,
    #[serde(default)]
    pub config: ModuleConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ModuleDocument>,
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
}

/// A parameter's name, layout and row-major values.
///
/// Values are widened to f64 for storage, which is exact for both dtypes.
/// Non-finite values are written as the strings `"NaN"`, `"Infinity"` and
/// `"-Infinity"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDocument {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: DType,
    #[serde(serialize_with = "serialize_values", deserialize_with = "deserialize_values")]
    pub values: Vec<f64>,
}

impl ParameterDocument {
    pub fn from_parameter(param: &Parameter) -> Result<Self, JnnError> {
        Ok(ParameterDocument {
            name: param.name().to_string(),
            shape: param.shape().to_vec(),
            dtype: param.dtype(),
            values: param.to_vec_f64()?,
        })
    }

    /// Rebuilds the stored tensor in its recorded dtype.
    ///
    /// # Errors
    /// `MalformedDocument` if the number of values does not match the shape.
    pub fn to_tensor(&self) -> Result<Tensor, JnnError> {
        let expected: usize = self.shape.iter().product();
        if self.values.len() != expected {
            return Err(JnnError::MalformedDocument(format!(
                "parameter '{}' has {} values for shape {:?}",
                self.name,
                self.values.len(),
                self.shape
            )));
        }
        Tensor::new_f64(self.values.clone(), self.shape.clone())?.to_dtype(self.dtype)
    }
}

impl PartialEq for ParameterDocument {
    /// Values compare bitwise, so NaN equals NaN.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.shape == other.shape
            && self.dtype == other.dtype
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// One stored element.
struct Encoded(f64);

impl Serialize for Encoded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v == f64::INFINITY {
            serializer.serialize_str("Infinity")
        } else if v == f64::NEG_INFINITY {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for Encoded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EncodedVisitor;

        impl<'de> Visitor<'de> for EncodedVisitor {
            type Value = Encoded;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or one of \"NaN\", \"Infinity\", \"-Infinity\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Encoded, E> {
                Ok(Encoded(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Encoded, E> {
                Ok(Encoded(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Encoded, E> {
                Ok(Encoded(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Encoded, E> {
                match v {
                    "NaN" => Ok(Encoded(f64::NAN)),
                    "Infinity" => Ok(Encoded(f64::INFINITY)),
                    "-Infinity" => Ok(Encoded(f64::NEG_INFINITY)),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(EncodedVisitor)
    }
}

fn serialize_values<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|&v| Encoded(v)))
}

fn deserialize_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let encoded = Vec::<Encoded>::deserialize(deserializer)?;
    Ok(encoded.into_iter().map(|e| e.0).collect())
}
