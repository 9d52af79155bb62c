//! Inch/millimeter conversion helpers.
//!
//! Pure scale-factor conversions shared by the aperture macro primitives
//! and the Excellon tool parsers. Nothing here tracks which unit a value
//! is currently in; callers own that state.

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Converts a millimeter value to inches.
#[must_use]
pub fn inch(value: f64) -> f64 {
    value / MM_PER_INCH
}

/// Converts an inch value to millimeters.
#[must_use]
pub fn metric(value: f64) -> f64 {
    value * MM_PER_INCH
}

/// Converts a millimeter coordinate pair to inches.
#[must_use]
pub fn inch_pair(pair: (f64, f64)) -> (f64, f64) {
    (inch(pair.0), inch(pair.1))
}

/// Converts an inch coordinate pair to millimeters.
#[must_use]
pub fn metric_pair(pair: (f64, f64)) -> (f64, f64) {
    (metric(pair.0), metric(pair.1))
}
