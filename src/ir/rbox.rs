//! Rotated bounding boxes (`robndbox`).

use super::bbox::BBoxXYXY;
use super::coord::Coord;

/// A rotated box: center, size and rotation in radians.
///
/// The angle is kept exactly as the labelling tool stored it; conversion to
/// the `.rbox` degree convention lives in [`normalize_angle`](super::normalize_angle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotatedBox<TSpace> {
    pub center: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
    pub angle_rad: f64,
}

impl<TSpace> RotatedBox<TSpace> {
    pub fn new(cx: f64, cy: f64, width: f64, height: f64, angle_rad: f64) -> Self {
        Self {
            center: Coord::new(cx, cy),
            width,
            height,
            angle_rad,
        }
    }

    /// The box with its rotation dropped.
    pub fn unrotated(&self) -> BBoxXYXY<TSpace> {
        BBoxXYXY::from_center(self.center.x, self.center.y, self.width, self.height)
    }

    /// Corners of the un-rotated box, `(cx±w/2, cy±h/2)`, in the same winding
    /// as [`BBoxXYXY::corners`]. The stored angle is ignored.
    pub fn corners_unrotated(&self) -> [Coord<TSpace>; 4] {
        self.unrotated().corners()
    }

    /// Corners with the stored angle applied about the center.
    pub fn corners_rotated(&self) -> [Coord<TSpace>; 4]
    where
        TSpace: Copy,
    {
        self.corners_unrotated()
            .map(|corner| corner.rotated_about(self.center, self.angle_rad))
    }
}
