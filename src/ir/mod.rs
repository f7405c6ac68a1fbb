//! Geometry types shared by both conversion pipelines.
//!
//! Annotation files describe boxes in pixel space; GeoJSON output needs them
//! in the raster's geographic space. The types here carry that distinction
//! in the type system so the two cannot be mixed by accident.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: [`Coord`], [`BBoxXYXY`], [`RotatedBox`] and
//!    [`Polygon`] are parameterised by a space marker ([`Pixel`] or
//!    [`Geographic`]).
//!
//! 2. **Fixed Winding**: every box yields its corners as
//!    `(xmin, ymin) (xmax, ymin) (xmax, ymax) (xmin, ymax)`.
//!
//! 3. **Permissive Construction**: swapped or degenerate boxes are still
//!    representable; nothing here rejects them.
//!
//! # Example
//!
//! ```
//! use geolabel::ir::{BBoxXYXY, Pixel, Polygon, RingClosure};
//!
//! let bbox = BBoxXYXY::<Pixel>::from_xyxy(0.0, 0.0, 10.0, 10.0);
//! let ring = Polygon::from_corners(bbox.corners(), RingClosure::Open);
//! assert_eq!(ring.vertices().len(), 4);
//! ```

mod angle;
mod bbox;
mod coord;
mod polygon;
mod rbox;
mod space;

pub use angle::{format_angle, normalize_angle, round_decimal, ANGLE_DECIMALS};
pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use polygon::{Polygon, RingClosure};
pub use rbox::RotatedBox;
pub use space::{Geographic, Pixel};
