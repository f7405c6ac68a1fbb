//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to keep pixel
//! coordinates from an annotation file apart from the geographic coordinates
//! produced by the georeferencer.

use std::fmt;

/// Marker type for pixel coordinates.
///
/// Pixel coordinates are absolute positions within the annotated raster,
/// with (0, 0) at the top-left corner and y growing downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for geographic coordinates.
///
/// Values are in the raster's native georeferenced units (degrees for a
/// geographic CRS, metres for a projected one). No reprojection is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geographic {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Geographic {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
