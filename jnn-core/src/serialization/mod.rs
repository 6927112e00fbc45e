//! Module persistence.
//!
//! A module tree is converted to a [`ModelDocument`] (kind tag, config,
//! children and parameter values per node, in attach order) and back. The
//! document is stored as JSON. Parameter values are stored exactly, so a
//! round trip reproduces every parameter bit for bit in its dtype.

pub mod codec;
pub mod document;
pub mod io;
mod registry;
pub mod state_dict;

pub use codec::{from_json, to_json};
pub use document::{DocumentVersion, ModelDocument, ModuleDocument, ParameterDocument, FORMAT_NAME};
pub use io::{load, load_document, save, SaveOptions};
pub use state_dict::{load_state_dict, state_dict};

use log::debug;

use crate::error::JnnError;
use crate::nn::module::Module;

/// Captures the module tree, depth-first in attach order.
pub fn serialize(module: &dyn Module) -> Result<ModelDocument, JnnError> {
    let root = module_document(module)?;
    debug!(
        "Serialized '{}' tree with {} parameters",
        root.kind,
        module.parameters().len()
    );
    Ok(ModelDocument::new(root))
}

fn module_document(module: &dyn Module) -> Result<ModuleDocument, JnnError> {
    let parameters = module
        .local_parameters()
        .into_iter()
        .map(ParameterDocument::from_parameter)
        .collect::<Result<Vec<_>, _>>()?;
    let children = module
        .children()
        .into_iter()
        .map(module_document)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModuleDocument {
        kind: module.kind().tag().to_string(),
        config: module.describe(),
        children,
        parameters,
    })
}

/// Rebuilds a module tree from `document`.
///
/// # Errors
/// - `UnsupportedVersion` if the document's major version is newer than
///   [`DocumentVersion::CURRENT`].
/// - `MalformedDocument` for a foreign `format` tag, missing config fields
///   or parameters that do not match the module's.
/// - `UnknownModuleKind` for a `kind` tag this build does not know.
///
/// No partially built tree is ever returned.
pub fn deserialize(document: &ModelDocument) -> Result<Box<dyn Module>, JnnError> {
    check_version(document.version)?;
    if document.format != FORMAT_NAME {
        return Err(JnnError::MalformedDocument(format!(
            "unexpected format '{}', expected '{}'",
            document.format, FORMAT_NAME
        )));
    }
    let module = registry::build_module(&document.root)?;
    debug!(
        "Deserialized '{}' tree (document version {})",
        document.root.kind, document.version
    );
    Ok(module)
}

pub(crate) fn check_version(version: DocumentVersion) -> Result<(), JnnError> {
    if version.major > DocumentVersion::CURRENT.major {
        return Err(JnnError::UnsupportedVersion {
            found: version.to_string(),
            supported: DocumentVersion::CURRENT.major,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "serialization_test.rs"]
mod tests;
