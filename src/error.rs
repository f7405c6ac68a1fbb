use std::path::PathBuf;
use thiserror::Error;

/// The main error type for geolabel operations.
#[derive(Debug, Error)]
pub enum GeolabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open raster {path}: {message}")]
    RasterOpen { path: PathBuf, message: String },

    #[error("Raster {path} has no geotransform (no ModelTransformation, ModelTiepoint/ModelPixelScale or world file)")]
    MissingGeoTransform { path: PathBuf },

    #[error("Could not open xml file {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("Failed to extract bounding box from {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Failed to write GeoJSON to {path}: {source}")]
    GeoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Failed to read CSV from {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed while traversing {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("External command '{program}' failed: {message}")]
    ExternalCommand { program: String, message: String },
}

impl GeolabelError {
    pub(crate) fn extraction(path: &std::path::Path, message: impl Into<String>) -> Self {
        GeolabelError::Extraction {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
