//! Polygon rings built from box corners.

use serde::{Serialize, Serializer};

use super::coord::Coord;

/// Whether an emitted ring repeats its first vertex at the end.
///
/// GeoJSON (RFC 7946) asks for closed rings; the historical `.geojson`
/// output of this tool wrote open four-point rings, which is kept as the
/// default so existing consumers see identical files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RingClosure {
    /// Four vertices, first not repeated.
    #[default]
    Open,
    /// Five vertices, first repeated at the end.
    Closed,
}

/// An ordered ring of vertices in a single coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<TSpace> {
    vertices: Vec<Coord<TSpace>>,
}

impl<TSpace> Polygon<TSpace> {
    /// Builds a ring from corners, keeping their order.
    pub fn from_corners(corners: impl IntoIterator<Item = Coord<TSpace>>, closure: RingClosure) -> Self
    where
        TSpace: Copy,
    {
        let mut vertices: Vec<Coord<TSpace>> = corners.into_iter().collect();
        if closure == RingClosure::Closed {
            if let Some(first) = vertices.first().copied() {
                vertices.push(first);
            }
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coord<TSpace>] {
        &self.vertices
    }

    /// Applies `f` to every vertex, producing a polygon in another space.
    pub fn map<TOther>(&self, f: impl Fn(Coord<TSpace>) -> Coord<TOther>) -> Polygon<TOther>
    where
        TSpace: Copy,
    {
        Polygon {
            vertices: self.vertices.iter().copied().map(f).collect(),
        }
    }
}

// Serialized as a single linear ring: `[[x, y], ...]`.
impl<TSpace> Serialize for Polygon<TSpace> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vertices.serialize(serializer)
    }
}
