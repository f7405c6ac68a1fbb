//! Affine georeferencing of pixel coordinates.
//!
//! A raster's geotransform is the six-element array
//! `[x0, sx, row_rot, y0, col_rot, sy]`. Only the origin and the per-axis
//! pixel size are applied; the rotation/shear terms are read but unused.

pub mod geotiff;

pub use geotiff::read_raster_metadata;

use crate::ir::{Coord, Geographic, Pixel, Polygon};

/// Origin and pixel size of a georeferenced raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterMetadata {
    /// Geographic x of the top-left pixel corner.
    pub x0: f64,
    /// Geographic y of the top-left pixel corner.
    pub y0: f64,
    /// Geographic units per pixel along x.
    pub sx: f64,
    /// Geographic units per pixel along y (negative for north-up rasters).
    pub sy: f64,
}

impl RasterMetadata {
    pub fn new(x0: f64, y0: f64, sx: f64, sy: f64) -> Self {
        Self { x0, y0, sx, sy }
    }

    /// Identity transform: pixel coordinates pass through unchanged.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Builds metadata from a six-element geotransform.
    ///
    /// Indices 0, 1, 3 and 5 are consumed.
    pub fn from_geotransform(gt: [f64; 6]) -> Self {
        Self::new(gt[0], gt[3], gt[1], gt[5])
    }

    /// Maps a pixel position to `(x*sx + x0, y*sy + y0)`.
    #[inline]
    pub fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx + self.x0, y * self.sy + self.y0)
    }

    /// Typed variant of [`to_geographic`](Self::to_geographic).
    #[inline]
    pub fn coord_to_geographic(&self, pixel: Coord<Pixel>) -> Coord<Geographic> {
        let (x, y) = self.to_geographic(pixel.x, pixel.y);
        Coord::new(x, y)
    }

    /// Georeferences every vertex of a pixel-space ring.
    pub fn polygon_to_geographic(&self, polygon: &Polygon<Pixel>) -> Polygon<Geographic> {
        polygon.map(|vertex| self.coord_to_geographic(vertex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BBoxXYXY, RingClosure};

    #[test]
    fn origin_maps_exactly() {
        let meta = RasterMetadata::new(-77.5, 38.25, 0.0001, -0.0001);
        assert_eq!(meta.to_geographic(0.0, 0.0), (-77.5, 38.25));
    }

    #[test]
    fn applies_pixel_size_per_axis() {
        let meta = RasterMetadata::new(500_000.0, 4_200_000.0, 0.5, -0.5);
        assert_eq!(meta.to_geographic(10.0, 20.0), (500_005.0, 4_199_990.0));
    }

    #[test]
    fn geotransform_ignores_rotation_terms() {
        let meta = RasterMetadata::from_geotransform([100.0, 2.0, 0.3, 50.0, 0.7, -2.0]);
        assert_eq!(meta, RasterMetadata::new(100.0, 50.0, 2.0, -2.0));
    }

    #[test]
    fn transform_is_affine_not_linear() {
        let meta = RasterMetadata::new(3.0, 4.0, 2.0, 2.0);
        let (ax, _) = meta.to_geographic(1.0, 0.0);
        let (bx, _) = meta.to_geographic(2.0, 0.0);
        let (sum_x, _) = meta.to_geographic(3.0, 0.0);
        assert_ne!(sum_x, ax + bx);
        assert_eq!(sum_x, ax + bx - meta.x0);
    }

    #[test]
    fn identity_polygon_is_unchanged() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0);
        let ring = Polygon::from_corners(bbox.corners(), RingClosure::Open);
        let geo = RasterMetadata::identity().polygon_to_geographic(&ring);
        let xy: Vec<(f64, f64)> = geo.vertices().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            xy,
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        );
    }
}
