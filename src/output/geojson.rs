//! GeoJSON `FeatureCollection` assembly.
//!
//! Every box becomes one `Polygon` feature with empty properties. Features
//! keep the document order of the boxes they came from; downstream tools
//! match features to boxes by position, since no box id is carried.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::write_atomic;
use crate::error::GeolabelError;
use crate::ir::{Geographic, Polygon};

/// Extension of files written by the GeoJSON pipeline.
pub const GEOJSON_EXTENSION: &str = "geojson";

/// A named GeoJSON `FeatureCollection`.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub name: String,
    pub features: Vec<Feature>,
}

/// A polygon feature with an empty `properties` object.
#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub properties: Map<String, Value>,
    pub geometry: PolygonGeometry,
}

/// GeoJSON `Polygon` geometry holding a single exterior ring.
#[derive(Clone, Debug, Serialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: Vec<Polygon<Geographic>>,
}

impl Feature {
    pub fn polygon(ring: Polygon<Geographic>) -> Self {
        Self {
            kind: "Feature",
            properties: Map::new(),
            geometry: PolygonGeometry {
                kind: "Polygon",
                coordinates: vec![ring],
            },
        }
    }
}

impl FeatureCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: "FeatureCollection",
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, ring: Polygon<Geographic>) {
        self.features.push(Feature::polygon(ring));
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Wrap polygons into a collection, preserving their order.
pub fn assemble(
    name: impl Into<String>,
    polygons: impl IntoIterator<Item = Polygon<Geographic>>,
) -> FeatureCollection {
    let mut collection = FeatureCollection::new(name);
    for ring in polygons {
        collection.push(ring);
    }
    collection
}

/// Serialize a collection to compact GeoJSON text.
pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string(collection)
}

/// Write a collection to `path`, replacing any previous file atomically.
pub fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<(), GeolabelError> {
    let text = to_geojson_string(collection).map_err(|source| GeolabelError::GeoJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, text.as_bytes())
}
