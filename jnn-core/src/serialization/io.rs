//! Saving and loading module trees to files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::JnnError;
use crate::nn::module::Module;
use crate::serialization::codec::{from_json, to_json};
use crate::serialization::document::ModelDocument;
use crate::serialization::{deserialize, serialize};

/// Options for [`save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Indented JSON instead of a single line.
    pub pretty: bool,
}

impl SaveOptions {
    pub fn pretty() -> Self {
        SaveOptions { pretty: true }
    }
}

/// Writes `module` to `path`.
///
/// The document goes to a sibling temporary file that is renamed over
/// `path` once fully written, so `path` holds either the old or the new
/// content. The temporary file is removed if anything fails.
///
/// # Errors
/// `IoError` for any file-system failure.
pub fn save(module: &dyn Module, path: impl AsRef<Path>, options: SaveOptions) -> Result<(), JnnError> {
    let path = path.as_ref();
    let text = to_json(&serialize(module)?, options.pretty)?;
    let tmp = temp_path(path);

    if let Err(err) = write_file(&tmp, text.as_bytes()).and_then(|_| {
        fs::rename(&tmp, path).map_err(|e| JnnError::io(path, e))
    }) {
        if tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                warn!("Could not remove temporary file {}: {}", tmp.display(), e);
            }
        }
        return Err(err);
    }
    debug!("Saved module to {} ({} bytes)", path.display(), text.len());
    Ok(())
}

/// Reads the document stored at `path` without building modules.
pub fn load_document(path: impl AsRef<Path>) -> Result<ModelDocument, JnnError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| JnnError::io(path, e))?;
    let mut text = String::new();
    BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(|e| JnnError::io(path, e))?;
    from_json(&text)
}

/// Reads and rebuilds the module tree stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Box<dyn Module>, JnnError> {
    let path = path.as_ref();
    let module = deserialize(&load_document(path)?)?;
    debug!("Loaded module from {}", path.display());
    Ok(module)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), JnnError> {
    let file = File::create(path).map_err(|e| JnnError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| JnnError::io(path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| JnnError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| JnnError::io(path, e))
}

/// `dir/.name.tmp` next to `path`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
