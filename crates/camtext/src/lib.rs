#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `camtext` — decoding and re-encoding of two PCB fabrication
//! micro-formats: Gerber aperture macro primitive statements, and
//! Excellon drill tool definitions (vendor Allegro lines and PADS tool
//! reports).
//!
//! Both subsystems are pure text-to-data transforms over in-memory
//! strings; there is no I/O and no shared state, so independent parses
//! are safe to run concurrently.

pub mod am;
pub mod error;
pub mod excellon;
pub mod units;

use std::collections::HashMap;

pub use am::{parse_macro_body, AmPrimitive};
pub use error::PrimitiveError;
pub use excellon::{Plated, Settings, ToolRecord, Units};

/// Parses an Excellon tool-definition blob into a mapping from tool
/// number to [`ToolRecord`], with sizes converted to the unit system in
/// `settings`. Unrecognized lines are ignored; later definitions for a
/// tool number overwrite earlier ones.
pub fn parse_tool_definitions(data: &str, settings: Settings) -> HashMap<u32, ToolRecord> {
    excellon::tools::parse(data, settings)
}

/// Parses a PADS tool report blob into a mapping from tool number to
/// [`ToolRecord`], including feed rate and spindle speed. Sizes are taken
/// in the caller's working unit as-is.
pub fn parse_tool_report(data: &str) -> HashMap<u32, ToolRecord> {
    excellon::report::parse(data)
}
