//! Excellon tool definition types.

use serde::Serialize;

/// Whether a drilled hole carries conductive plating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Plated {
    /// Hole is plated.
    Yes,
    /// Hole is not plated.
    No,
    /// Plating left to the fabricator.
    Optional,
    /// The source line did not say.
    Unknown,
}

/// Unit system the caller works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Units {
    /// Inches.
    Inch,
    /// Millimeters.
    Metric,
}

/// Read-only settings collaborator. Only the working unit system is
/// consulted, and only by the tool-definition parser's final conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Target unit system for parsed tool sizes.
    pub units: Units,
}

impl Default for Settings {
    fn default() -> Self {
        Self { units: Units::Inch }
    }
}

/// Normalized drill tool record produced by the Excellon parsers, keyed
/// by `number` in the caller-visible mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolRecord {
    /// Tool number (T1, T2, ...).
    pub number: u32,
    /// Drill diameter, in the working unit.
    pub diameter: f64,
    /// Plating state.
    pub plated: Plated,
    /// Feed rate; only tool reports carry one.
    pub feed_rate: Option<u32>,
    /// Spindle speed in RPM; only tool reports carry one.
    pub rpm: Option<u32>,
}
