//! GeoTIFF geotransform reader.
//!
//! Reads the affine transform of a raster without decoding any pixels.
//! Uses the pure Rust `tiff` crate, so no GDAL installation is needed.
//!
//! Sources are tried in order:
//!
//! 1. `ModelTransformationTag` (34264): a row-major 4x4 matrix.
//! 2. `ModelTiepointTag` (33922) with `ModelPixelScaleTag` (33550).
//! 3. A world file next to the raster (`.tfw`, `.tifw`, `.wld`).
//!
//! Tag-based transforms of rasters whose `GTRasterTypeGeoKey` is
//! `PixelIsPoint` are shifted by half a pixel so the origin names the
//! corner of the top-left pixel, as GDAL reports it.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tiff::decoder::Decoder;
use tiff::tags::Tag;

use super::RasterMetadata;
use crate::error::GeolabelError;

const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
const MODEL_TIEPOINT_TAG: u16 = 33922;
const MODEL_TRANSFORMATION_TAG: u16 = 34264;
const GEO_KEY_DIRECTORY_TAG: u16 = 34735;

const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const RASTER_PIXEL_IS_POINT: u16 = 2;

const WORLD_FILE_EXTENSIONS: [&str; 3] = ["tfw", "tifw", "wld"];

/// Read origin and pixel size from a georeferenced raster.
///
/// Fails with [`GeolabelError::RasterOpen`] if the file cannot be opened or
/// is not a TIFF, and with [`GeolabelError::MissingGeoTransform`] if no
/// transform source is present.
pub fn read_raster_metadata(path: &Path) -> Result<RasterMetadata, GeolabelError> {
    read_geotransform(path).map(RasterMetadata::from_geotransform)
}

/// Read the six-element geotransform `[x0, sx, row_rot, y0, col_rot, sy]`.
pub fn read_geotransform(path: &Path) -> Result<[f64; 6], GeolabelError> {
    let raster_open = |message: String| GeolabelError::RasterOpen {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|source| raster_open(source.to_string()))?;
    let mut decoder =
        Decoder::new(BufReader::new(file)).map_err(|source| raster_open(source.to_string()))?;

    let pixel_is_point = decoder
        .get_tag_u16_vec(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY_TAG))
        .map(|keys| raster_is_pixel_is_point(&keys))
        .unwrap_or(false);
    let anchor = |gt: [f64; 6]| {
        if pixel_is_point {
            log::debug!("{}: PixelIsPoint raster, shifting origin", path.display());
            shift_to_pixel_corner(gt)
        } else {
            gt
        }
    };

    let transformation = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TRANSFORMATION_TAG))
        .ok();
    if let Some(gt) = transformation.as_deref().and_then(geotransform_from_matrix) {
        log::debug!("{}: geotransform from ModelTransformationTag", path.display());
        return Ok(anchor(gt));
    }

    let pixel_scale = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG))
        .ok();
    let tiepoint = decoder.get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG)).ok();
    if let (Some(scale), Some(tiepoint)) = (pixel_scale, tiepoint) {
        if let Some(gt) = geotransform_from_tiepoint(&tiepoint, &scale) {
            log::debug!("{}: geotransform from ModelTiepoint/ModelPixelScale", path.display());
            return Ok(anchor(gt));
        }
    }

    if let Some(world_file) = find_world_file(path) {
        log::debug!("{}: geotransform from {}", path.display(), world_file.display());
        let contents = fs::read_to_string(&world_file)?;
        return parse_world_file(&contents).ok_or_else(|| GeolabelError::RasterOpen {
            path: world_file.clone(),
            message: "world file must hold six numeric lines".to_string(),
        });
    }

    Err(GeolabelError::MissingGeoTransform {
        path: path.to_path_buf(),
    })
}

/// ModelTransformation is row-major:
/// `[a b 0 d | e f 0 h | 0 0 0 0 | 0 0 0 1]` with `X = a*I + b*J + d`.
fn geotransform_from_matrix(matrix: &[f64]) -> Option<[f64; 6]> {
    if matrix.len() < 8 {
        return None;
    }
    Some([matrix[3], matrix[0], matrix[1], matrix[7], matrix[4], matrix[5]])
}

/// ModelTiepoint: `[I, J, K, X, Y, Z]`; ModelPixelScale: `[ScaleX, ScaleY, ScaleZ]`.
///
/// GeoTIFF stores ScaleY as a positive number for north-up rasters.
fn geotransform_from_tiepoint(tiepoint: &[f64], scale: &[f64]) -> Option<[f64; 6]> {
    if tiepoint.len() < 6 || scale.len() < 2 {
        return None;
    }
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
    let (scale_x, scale_y) = (scale[0], scale[1]);
    Some([x - i * scale_x, scale_x, 0.0, y + j * scale_y, 0.0, -scale_y])
}

/// GeoKeyDirectory: a `[version, revision, minor, count]` header followed
/// by `count` entries of `[key, location, count, value]`. A location of 0
/// means the value is stored inline.
fn raster_is_pixel_is_point(keys: &[u16]) -> bool {
    let Some(header) = keys.get(..4) else {
        return false;
    };
    let count = usize::from(header[3]);
    keys[4..]
        .chunks_exact(4)
        .take(count)
        .any(|entry| {
            entry[0] == GT_RASTER_TYPE_GEO_KEY
                && entry[1] == 0
                && entry[3] == RASTER_PIXEL_IS_POINT
        })
}

/// Move the origin from the centre of the top-left pixel to its corner.
fn shift_to_pixel_corner(gt: [f64; 6]) -> [f64; 6] {
    let [x0, a, b, y0, d, e] = gt;
    [x0 - a / 2.0 - b / 2.0, a, b, y0 - d / 2.0 - e / 2.0, d, e]
}

fn find_world_file(raster: &Path) -> Option<PathBuf> {
    WORLD_FILE_EXTENSIONS
        .iter()
        .map(|ext| raster.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// World files hold `A D B E C F`, one per line, referenced to the centre
/// of the top-left pixel. Shift by half a pixel to reach the corner.
fn parse_world_file(contents: &str) -> Option<[f64; 6]> {
    let values: Vec<f64> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if values.len() != 6 {
        return None;
    }
    let (a, d, b, e, c, f) = (values[0], values[1], values[2], values[3], values[4], values[5]);
    Some([c - a / 2.0 - b / 2.0, a, b, f - d / 2.0 - e / 2.0, d, e])
}
