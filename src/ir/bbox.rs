//! Axis-aligned bounding boxes in XYXY format.

use super::coord::Coord;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// Note: This type does NOT enforce that min <= max. A `bndbox` whose
/// corners are swapped still produces a four-corner polygon; the ring just
/// winds the other way.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Returns the four corners in the canonical winding:
    /// `(xmin, ymin) (xmax, ymin) (xmax, ymax) (xmin, ymax)`.
    ///
    /// With y growing downwards this walks the box clockwise on screen.
    pub fn corners(&self) -> [Coord<TSpace>; 4] {
        [
            Coord::new(self.min.x, self.min.y),
            Coord::new(self.max.x, self.min.y),
            Coord::new(self.max.x, self.max.y),
            Coord::new(self.min.x, self.max.y),
        ]
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Builds the box from a center point and a size.
    #[inline]
    pub fn from_center(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }
}
