//! `.rbox` text output: one `cx cy w h 1 angle` line per rotated box.

use std::fmt;

use crate::ir::format_angle;

/// Value of the constant field written between `h` and the angle.
pub const RBOX_CONSTANT_FIELD: &str = "1";

/// Extension of files written by the rbox pipeline.
pub const RBOX_EXTENSION: &str = "rbox";

/// One rotated box as it appears in a `.rbox` file.
///
/// Center and size keep the exact text found in the annotation file (after
/// it has been checked to be numeric) so output bytes follow the input.
#[derive(Clone, Debug, PartialEq)]
pub struct RboxRecord {
    pub cx: String,
    pub cy: String,
    pub w: String,
    pub h: String,
    /// Angle already normalized to `.rbox` degrees.
    pub angle_deg: f64,
}

impl fmt::Display for RboxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.cx,
            self.cy,
            self.w,
            self.h,
            RBOX_CONSTANT_FIELD,
            format_angle(self.angle_deg)
        )
    }
}

/// Render records as newline-terminated lines, in the given order.
pub fn serialize_rbox(records: &[RboxRecord]) -> String {
    records.iter().map(|record| format!("{record}\n")).collect()
}
