//! Excellon tool-definition line recognizer.
//!
//! Vendor drill files describe tools in several overlapping textual
//! encodings: an inline Allegro tool-size line, and Allegro `Holesize`
//! comment lines in single- and dual-id forms for both mils and
//! millimeters. Each input line is tried against the patterns in a fixed
//! order and the first match wins; the order must not change, since the
//! encodings overlap and reordering could classify a line differently.

use std::collections::HashMap;

use lazy_regex::{lazy_regex, Lazy};
use regex::{Captures, Regex};

use crate::units::MM_PER_INCH;

use super::types::{Plated, Settings, ToolRecord, Units};

/// Mils (thousandths of an inch) per millimeter.
const MILS_PER_MM: f64 = 39.370_078_740_2;

static ALLEGRO_TOOL: Lazy<Regex> = lazy_regex!(
    r"^(?P<size>[0-9/.]+)\s+(?P<plated>P|N)\s+T(?P<toolid>[0-9]{2})\s+(?P<xtol>[0-9/.]+)\s+(?P<ytol>[0-9/.]+)"
);
static ALLEGRO_COMMENT_MILS: Lazy<Regex> = lazy_regex!(
    r"^Holesize (?P<toolid>[0-9]{1,2})\. = (?P<size>[0-9/.]+) Tolerance = \+(?P<xtol>[0-9/.]+)/-(?P<ytol>[0-9/.]+) (?P<plated>PLATED|NON_PLATED|OPTIONAL) MILS Quantity = [0-9]+"
);
static ALLEGRO_DUAL_COMMENT_MILS: Lazy<Regex> = lazy_regex!(
    r"^T(?P<toolid>[0-9]{1,2}) Holesize (?P<toolid2>[0-9]{1,2})\. = (?P<size>[0-9/.]+) Tolerance = \+(?P<xtol>[0-9/.]+)/-(?P<ytol>[0-9/.]+) (?P<plated>PLATED|NON_PLATED|OPTIONAL) MILS Quantity = [0-9]+"
);
static ALLEGRO_COMMENT_MM: Lazy<Regex> = lazy_regex!(
    r"^Holesize (?P<toolid>[0-9]{1,2})\. = (?P<size>[0-9/.]+) Tolerance = \+(?P<xtol>[0-9/.]+)/-(?P<ytol>[0-9/.]+) (?P<plated>PLATED|NON_PLATED|OPTIONAL) MM Quantity = [0-9]+"
);
static ALLEGRO_DUAL_COMMENT_MM: Lazy<Regex> = lazy_regex!(
    r"^T(?P<toolid>[0-9]{1,2}) Holesize (?P<toolid2>[0-9]{1,2})\. = (?P<size>[0-9/.]+) Tolerance = \+(?P<xtol>[0-9/.]+)/-(?P<ytol>[0-9/.]+) (?P<plated>PLATED|NON_PLATED|OPTIONAL) MM Quantity = [0-9]+"
);

/// Unit a matched pattern reports its sizes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceUnit {
    Mils,
    Millimeters,
}

/// Accumulating recognizer for tool-definition lines.
///
/// Feed lines with [`Self::read_line`]; unrecognized lines are ignored.
/// Later definitions for a tool number overwrite earlier ones.
#[derive(Debug)]
pub struct ToolDefinitionParser {
    settings: Settings,
    tools: HashMap<u32, ToolRecord>,
}

impl ToolDefinitionParser {
    /// Creates a recognizer targeting the unit system in `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            tools: HashMap::new(),
        }
    }

    /// Classifies one input line. The line is stripped, then tried against
    /// the patterns in fixed order; the first match produces a
    /// [`ToolRecord`] stored under its tool number.
    pub fn read_line(&mut self, line: &str) {
        let line = line.trim();
        for (pattern, unit) in [
            (&*ALLEGRO_TOOL, SourceUnit::Mils),
            (&*ALLEGRO_COMMENT_MILS, SourceUnit::Mils),
            (&*ALLEGRO_DUAL_COMMENT_MILS, SourceUnit::Mils),
            (&*ALLEGRO_COMMENT_MM, SourceUnit::Millimeters),
            (&*ALLEGRO_DUAL_COMMENT_MM, SourceUnit::Millimeters),
        ] {
            let Some(captures) = pattern.captures(line) else {
                continue;
            };
            let Some((number, size, plated)) = read_captures(&captures) else {
                continue;
            };
            let diameter = self.convert_length(size, unit);
            self.tools.insert(
                number,
                ToolRecord {
                    number,
                    diameter,
                    plated,
                    feed_rate: None,
                    rpm: None,
                },
            );
            break;
        }
    }

    /// Finalizes into the tool-number keyed mapping.
    pub fn finish(self) -> HashMap<u32, ToolRecord> {
        self.tools
    }

    /// Normalizes a matched length to millimeters, then to the configured
    /// working unit.
    fn convert_length(&self, value: f64, unit: SourceUnit) -> f64 {
        let millimeters = match unit {
            SourceUnit::Mils => value / MILS_PER_MM,
            SourceUnit::Millimeters => value,
        };
        match self.settings.units {
            Units::Inch => millimeters / MM_PER_INCH,
            Units::Metric => millimeters,
        }
    }
}

/// Pulls the shared capture groups out of a match. The tolerance fields
/// are parsed to validate the line but are not kept on the record. A
/// `None` means a group failed numeric parsing and the line should fall
/// through to the next pattern.
fn read_captures(captures: &Captures<'_>) -> Option<(u32, f64, Plated)> {
    let number = captures.name("toolid")?.as_str().parse::<u32>().ok()?;
    let size = captures.name("size")?.as_str().parse::<f64>().ok()?;
    let _xtol: f64 = captures.name("xtol")?.as_str().parse().ok()?;
    let _ytol: f64 = captures.name("ytol")?.as_str().parse().ok()?;
    let plated = match captures.name("plated")?.as_str() {
        "PLATED" | "P" => Plated::Yes,
        "NON_PLATED" | "N" => Plated::No,
        "OPTIONAL" => Plated::Optional,
        _ => Plated::Unknown,
    };
    Some((number, size, plated))
}

/// Parses a tool-definition text blob into a tool-number keyed mapping.
pub fn parse(data: &str, settings: Settings) -> HashMap<u32, ToolRecord> {
    let mut parser = ToolDefinitionParser::new(settings);
    for line in data.lines() {
        parser.read_line(line);
    }
    parser.finish()
}
