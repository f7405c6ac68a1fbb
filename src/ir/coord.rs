//! Typed coordinate values using PhantomData for compile-time safety.

use serde::{Serialize, Serializer};
use std::marker::PhantomData;

/// A 2D coordinate with a type-level marker for the coordinate space.
///
/// The `TSpace` parameter should be either [`Pixel`](super::Pixel) or
/// [`Geographic`](super::Geographic), so a pixel position can never be
/// written into a GeoJSON ring without passing through the georeferencer.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates this point about `center` by `angle_rad`.
    ///
    /// Uses the image-space convention of rotated-box labelling tools
    /// (y grows downwards, positive angles turn counter-clockwise on screen).
    pub fn rotated_about(&self, center: Coord<TSpace>, angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self::new(
            center.x + cos * dx + sin * dy,
            center.y - sin * dx + cos * dy,
        )
    }
}

impl<TSpace> std::fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coord")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

// Serialized as a GeoJSON position: `[x, y]`.
impl<TSpace> Serialize for Coord<TSpace> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Pixel;

    #[test]
    fn test_coord_creation() {
        let coord: Coord<Pixel> = Coord::new(10.0, 20.0);
        assert_eq!(coord.x, 10.0);
        assert_eq!(coord.y, 20.0);
    }

    #[test]
    fn test_coord_is_finite() {
        let finite: Coord<Pixel> = Coord::new(10.0, 20.0);
        assert!(finite.is_finite());

        let nan: Coord<Pixel> = Coord::new(f64::NAN, 20.0);
        assert!(!nan.is_finite());

        let inf: Coord<Pixel> = Coord::new(10.0, f64::INFINITY);
        assert!(!inf.is_finite());
    }

    #[test]
    fn test_coord_serializes_as_position() {
        let coord: Coord<Pixel> = Coord::new(1.5, -2.0);
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[1.5,-2.0]");
    }

    #[test]
    fn test_rotation_by_zero_is_identity() {
        let center: Coord<Pixel> = Coord::new(5.0, 5.0);
        let point: Coord<Pixel> = Coord::new(7.0, 6.0);
        assert_eq!(point.rotated_about(center, 0.0), point);
    }

    #[test]
    fn test_quarter_turn_rotation() {
        let center: Coord<Pixel> = Coord::new(0.0, 0.0);
        let point: Coord<Pixel> = Coord::new(1.0, 0.0);
        let turned = point.rotated_about(center, std::f64::consts::FRAC_PI_2);
        assert!((turned.x - 0.0).abs() < 1e-12);
        assert!((turned.y - -1.0).abs() < 1e-12);
    }
}
