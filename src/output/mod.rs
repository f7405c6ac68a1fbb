//! Output writers for the two conversion targets.

pub mod geojson;
pub mod rbox;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::GeolabelError;

pub use geojson::{assemble, write_geojson, Feature, FeatureCollection, GEOJSON_EXTENSION};
pub use rbox::{serialize_rbox, RboxRecord, RBOX_EXTENSION};

/// Write `contents` to `path` via a temporary file in the same directory.
///
/// The destination either receives the whole content or is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), GeolabelError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(GeolabelError::Io)?;
    staged.write_all(contents).map_err(GeolabelError::Io)?;
    staged.flush().map_err(GeolabelError::Io)?;
    staged
        .persist(path)
        .map_err(|err| GeolabelError::Io(err.error))?;
    Ok(())
}
