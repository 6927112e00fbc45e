//! JSON encoding of [`ModelDocument`]s.

use serde_json::Value;

use crate::error::JnnError;
use crate::serialization::check_version;
use crate::serialization::document::{DocumentVersion, ModelDocument};

/// Encodes `document`; `pretty` selects indented output.
pub fn to_json(document: &ModelDocument, pretty: bool) -> Result<String, JnnError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    encoded.map_err(|e| JnnError::MalformedDocument(format!("cannot encode document: {}", e)))
}

/// Decodes a document.
///
/// The version is checked before the rest of the layout, so a document
/// from a newer major version fails with `UnsupportedVersion` rather than
/// a parse error.
pub fn from_json(text: &str) -> Result<ModelDocument, JnnError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| JnnError::MalformedDocument(format!("invalid JSON: {}", e)))?;
    if let Some(version) = value.get("version") {
        let version: DocumentVersion = serde_json::from_value(version.clone())
            .map_err(|e| JnnError::MalformedDocument(format!("invalid version field: {}", e)))?;
        check_version(version)?;
    }
    serde_json::from_value(value).map_err(|e| JnnError::MalformedDocument(e.to_string()))
}
