//! Rotation angle conversion for the `.rbox` format.

/// Decimal places kept by [`normalize_angle`].
pub const ANGLE_DECIMALS: usize = 6;

/// Converts a labelling-tool angle (radians) into `.rbox` degrees:
/// `round(180 - degrees(angle_rad), 6)`.
///
/// No clamping is applied; negative results and results above 360 pass
/// through unchanged.
pub fn normalize_angle(angle_rad: f64) -> f64 {
    round_decimal(180.0 - angle_rad.to_degrees(), ANGLE_DECIMALS)
}

/// Correctly rounded decimal rounding (half-even on exact ties).
///
/// Goes through the exact decimal expansion produced by the formatter rather
/// than `(x * 1e6).round() / 1e6`, which double-rounds.
pub fn round_decimal(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Renders an angle the way `.rbox` files carry it: shortest round-trip
/// digits, always with a fractional part (`180.0`, `-0.5`, `1e-05`).
pub fn format_angle(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_scientific(value);
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

fn format_scientific(value: f64) -> String {
    let raw = format!("{value:e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
