//! Annotation XML handling: parsing, box discovery and extraction.
//!
//! Works on LabelImg/roLabelImg style files but does not validate a schema;
//! only the box tag names and their coordinate leaves matter.

pub mod extract;
pub mod walker;

use std::path::{Path, PathBuf};

use roxmltree::Document;

pub use extract::{
    extract_polygons, extract_rbox_records, read_bndbox, read_robndbox, PolygonOptions,
    RboxAccumulator,
};
pub use walker::{find_boxes, visit_preorder, BoxKind};

use crate::error::GeolabelError;
use crate::ir::{Pixel, Polygon};
use crate::output::RboxRecord;

/// Parse annotation XML, attaching `path` to any error.
pub fn parse_annotation<'input>(
    xml: &'input str,
    path: &Path,
) -> Result<Document<'input>, GeolabelError> {
    Document::parse(xml).map_err(|source| GeolabelError::XmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })
}

/// Extract pixel-space rings from an in-memory XML string.
pub fn polygons_from_str(
    xml: &str,
    options: &PolygonOptions,
) -> Result<Vec<Polygon<Pixel>>, GeolabelError> {
    let path = Path::new("<memory>");
    let document = parse_annotation(xml, path)?;
    extract_polygons(document.root_element(), options, path)
}

/// Extract `.rbox` records from an in-memory XML string.
pub fn rbox_records_from_str(xml: &str) -> Result<Vec<RboxRecord>, GeolabelError> {
    let path = Path::new("<memory>");
    let document = parse_annotation(xml, path)?;
    extract_rbox_records(document.root_element(), path)
}

/// Parse annotation XML from bytes and run both extractors.
///
/// The input must be valid UTF-8. Primarily useful for fuzzing.
pub fn from_annotation_slice(bytes: &[u8]) -> Result<(), GeolabelError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| GeolabelError::XmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    polygons_from_str(xml, &PolygonOptions::default())?;
    rbox_records_from_str(xml)?;
    Ok(())
}
