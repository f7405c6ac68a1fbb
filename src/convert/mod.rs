//! Per-file conversion pipelines and the directory walk around them.
//!
//! Two targets are supported:
//!
//! - **GeoJSON**: `<stem>.xml` boxes + `<stem>.tif` geotransform →
//!   `<stem>.geojson`.
//! - **rbox**: `<stem>.xml` rotated boxes → `<stem>.rbox`.
//!
//! Files are processed one at a time. In a walk, a failing file is logged
//! once, recorded in the [`WalkReport`] and skipped; the walk goes on.

pub mod report;

pub use report::{SkippedFile, WalkReport};

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::annotation::{extract_polygons, extract_rbox_records, parse_annotation, PolygonOptions};
use crate::error::GeolabelError;
use crate::georef::{read_raster_metadata, RasterMetadata};
use crate::output::{
    assemble, serialize_rbox, write_atomic, write_geojson, FeatureCollection, GEOJSON_EXTENSION,
    RBOX_EXTENSION,
};

const XML_EXTENSION: &str = "xml";
const RASTER_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// Conversion target for the walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    GeoJson,
    Rbox,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::GeoJson => GEOJSON_EXTENSION,
            Target::Rbox => RBOX_EXTENSION,
        }
    }
}

/// Strip any extension from a user-supplied file name.
///
/// `scene.tif`, `scene.xml` and `scene` all name the same pair of inputs.
pub fn stem_path(file: &Path) -> PathBuf {
    file.with_extension("")
}

/// `<stem>.<extension>`, keeping any dots already inside the stem.
///
/// `Path::with_extension` would replace the `.v2` of `tile.v2`.
pub fn sibling_path(stem: &Path, extension: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Build the GeoJSON collection for one annotation/raster pair.
pub fn build_feature_collection(
    xml_path: &Path,
    meta: &RasterMetadata,
    options: &PolygonOptions,
) -> Result<FeatureCollection, GeolabelError> {
    let xml = fs::read_to_string(xml_path).map_err(|source| GeolabelError::XmlParse {
        path: xml_path.to_path_buf(),
        message: source.to_string(),
    })?;
    let document = parse_annotation(&xml, xml_path)?;
    let polygons = extract_polygons(document.root_element(), options, xml_path)?;

    let name = xml_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(assemble(
        name,
        polygons
            .iter()
            .map(|polygon| meta.polygon_to_geographic(polygon)),
    ))
}

/// Convert `<stem>.xml` + `<stem>.tif` into `<stem>.geojson`.
///
/// `file` may carry any extension; it is reduced to its stem first.
/// Returns the path of the written file.
pub fn convert_geojson(file: &Path, options: &PolygonOptions) -> Result<PathBuf, GeolabelError> {
    let stem = stem_path(file);
    let raster_path =
        find_raster(&stem).unwrap_or_else(|| sibling_path(&stem, RASTER_EXTENSIONS[0]));
    convert_geojson_pair(&sibling_path(&stem, XML_EXTENSION), &raster_path, options)
}

/// Convert an explicit annotation/raster pair; output lands next to the XML.
pub fn convert_geojson_pair(
    xml_path: &Path,
    raster_path: &Path,
    options: &PolygonOptions,
) -> Result<PathBuf, GeolabelError> {
    let meta = read_raster_metadata(raster_path)?;
    log::debug!(
        "{}: origin ({}, {}), pixel size ({}, {})",
        raster_path.display(),
        meta.x0,
        meta.y0,
        meta.sx,
        meta.sy
    );

    let collection = build_feature_collection(xml_path, &meta, options)?;
    let output_path = xml_path.with_extension(GEOJSON_EXTENSION);
    write_geojson(&output_path, &collection)?;
    log::info!(
        "Wrote {} feature(s) to {}",
        collection.len(),
        output_path.display()
    );
    Ok(output_path)
}

/// Convert one annotation file into `.rbox` text next to it.
///
/// Returns the path of the written file.
pub fn convert_rbox(xml_path: &Path) -> Result<PathBuf, GeolabelError> {
    let xml = fs::read_to_string(xml_path).map_err(|source| GeolabelError::XmlParse {
        path: xml_path.to_path_buf(),
        message: source.to_string(),
    })?;
    let document = parse_annotation(&xml, xml_path)?;
    let records = extract_rbox_records(document.root_element(), xml_path)?;

    let output_path = xml_path.with_extension(RBOX_EXTENSION);
    write_atomic(&output_path, serialize_rbox(&records).as_bytes())?;
    log::info!("Wrote {} box(es) to {}", records.len(), output_path.display());
    Ok(output_path)
}

/// Convert every `.xml` under `root` that has a sibling raster.
pub fn walk_geojson(root: &Path, options: &PolygonOptions) -> Result<WalkReport, GeolabelError> {
    let mut report = WalkReport::new(Target::GeoJson.name());

    for xml_path in collect_xml_files(root)? {
        let Some(raster_path) = find_raster(&stem_path(&xml_path)) else {
            log::debug!("Skipping {}: no sibling .tif", xml_path.display());
            continue;
        };

        match convert_geojson_pair(&xml_path, &raster_path, options) {
            Ok(output) => report.record_converted(output),
            Err(err) => {
                log::error!("{err}");
                report.record_skipped(xml_path, err.to_string());
            }
        }
    }

    Ok(report)
}

/// Convert every `.xml` under `root` into `.rbox`.
pub fn walk_rbox(root: &Path) -> Result<WalkReport, GeolabelError> {
    let mut report = WalkReport::new(Target::Rbox.name());

    for xml_path in collect_xml_files(root)? {
        match convert_rbox(&xml_path) {
            Ok(output) => report.record_converted(output),
            Err(err) => {
                log::error!("{err}");
                report.record_skipped(xml_path, err.to_string());
            }
        }
    }

    Ok(report)
}

/// All `.xml` files under `root`, recursively, in a stable order.
pub fn collect_xml_files(root: &Path) -> Result<Vec<PathBuf>, GeolabelError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| GeolabelError::Walk {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), XML_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn find_raster(stem: &Path) -> Option<PathBuf> {
    RASTER_EXTENSIONS
        .iter()
        .map(|ext| sibling_path(stem, ext))
        .find(|candidate| candidate.is_file())
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
