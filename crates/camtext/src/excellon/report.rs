//! PADS drill tool report parser.
//!
//! Tool reports arrive in assorted encodings, so the parser keys on the
//! shape of the `====`-separator header line rather than on any label
//! text, then reads the fixed six-column rows that follow.

use std::collections::HashMap;

use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;

use super::types::{Plated, ToolRecord};

static TABLE_HEADER: Lazy<Regex> = lazy_regex!(r"^====\s+====\s+====\s+====\s+=====\s+===");

/// Scanner state: before the table header has been seen, or inside the
/// table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingHeader,
    InTable,
}

/// Two-state line scanner accumulating tool rows.
///
/// Rows that do not split into exactly six columns, or whose numeric
/// columns fail to parse, are treated as report-format noise: skipped and
/// recorded as warnings, never surfaced as errors.
#[derive(Debug)]
pub struct ReportParser {
    state: ScanState,
    tools: HashMap<u32, ToolRecord>,
    warnings: Vec<String>,
}

impl ReportParser {
    /// Creates a scanner in the header-seeking state.
    pub fn new() -> Self {
        Self {
            state: ScanState::SeekingHeader,
            tools: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Scans one input line. Blank lines are always skipped; in table
    /// state, `=`-prefixed rule lines are skipped and anything else is
    /// read as a tool row.
    pub fn read_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match self.state {
            ScanState::SeekingHeader => {
                if TABLE_HEADER.is_match(line) {
                    self.state = ScanState::InTable;
                }
            }
            ScanState::InTable => {
                if line.starts_with('=') {
                    return;
                }
                let columns: Vec<&str> = line.split_whitespace().collect();
                if columns.len() != 6 {
                    self.warnings.push(format!(
                        "skipped report row with {} columns: `{line}`",
                        columns.len()
                    ));
                    return;
                }
                match read_row(&columns) {
                    Some(tool) => {
                        self.tools.insert(tool.number, tool);
                    }
                    None => {
                        self.warnings
                            .push(format!("skipped unparseable report row: `{line}`"));
                    }
                }
            }
        }
    }

    /// Rows skipped as noise while scanning.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Finalizes into the tool-number keyed mapping.
    pub fn finish(self) -> HashMap<u32, ToolRecord> {
        self.tools
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the six fixed columns `toolid, size, plated, feedrate, speed,
/// count`. The size is taken in the caller's working unit; the trailing
/// count must be numeric but is not kept.
fn read_row(columns: &[&str]) -> Option<ToolRecord> {
    let mut fields = columns.iter();
    let number = fields.next()?.parse::<u32>().ok()?;
    let diameter = fields.next()?.parse::<f64>().ok()?;
    let plated = match fields.next().copied() {
        Some("x") => Plated::Yes,
        Some("-") => Plated::No,
        _ => Plated::Unknown,
    };
    let feed_rate = fields.next()?.parse::<u32>().ok()?;
    let rpm = fields.next()?.parse::<u32>().ok()?;
    let _count: u32 = fields.next()?.parse().ok()?;
    Some(ToolRecord {
        number,
        diameter,
        plated,
        feed_rate: Some(feed_rate),
        rpm: Some(rpm),
    })
}

/// Parses a tool report text blob into a tool-number keyed mapping.
pub fn parse(data: &str) -> HashMap<u32, ToolRecord> {
    let mut parser = ReportParser::new();
    for line in data.lines() {
        parser.read_line(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    const HEADER: &str = "====  ====  ====  ====  =====  ===";

    #[test]
    fn rows_before_the_header_are_ignored() {
        let data = "1   0.0157   x   80   60000   1\n";
        let tools = parse(data);
        assert!(tools.is_empty(), "rows before the header must not parse");
    }

    #[test]
    fn header_then_row_yields_full_record() {
        let data = format!("{HEADER}\n1   0.0157   x   80   60000   1\n");
        let tools = parse(&data);
        let tool = tools.get(&1);
        assert!(tool.is_some(), "expected tool 1 from table row");
        if let Some(tool) = tool {
            assert_eq!(tool.number, 1);
            assert!((tool.diameter - 0.0157).abs() < EPSILON);
            assert_eq!(tool.plated, Plated::Yes);
            assert_eq!(tool.feed_rate, Some(80));
            assert_eq!(tool.rpm, Some(60_000));
        }
    }

    #[test]
    fn plated_markers_map_to_states() {
        let data = format!(
            "{HEADER}\n1  0.0157  x  80  60000  1\n2  0.0236  -  80  60000  2\n3  0.0354  ?  80  60000  3\n"
        );
        let tools = parse(&data);
        assert_eq!(tools.get(&1).map(|t| t.plated), Some(Plated::Yes));
        assert_eq!(tools.get(&2).map(|t| t.plated), Some(Plated::No));
        assert_eq!(tools.get(&3).map(|t| t.plated), Some(Plated::Unknown));
    }

    #[test]
    fn malformed_row_is_skipped_not_raised() {
        let data = format!("{HEADER}\n1  0.0157  x  80\n2  0.0236  x  80  60000  2\n");
        let mut parser = ReportParser::new();
        for line in data.lines() {
            parser.read_line(line);
        }
        assert_eq!(parser.warnings().len(), 1);
        let tools = parser.finish();
        assert!(tools.get(&1).is_none(), "four-column row must be skipped");
        assert!(tools.get(&2).is_some(), "later rows still parse");
    }

    #[test]
    fn rule_lines_inside_the_table_are_skipped() {
        let data = format!("{HEADER}\n=======================\n1  0.0157  x  80  60000  1\n");
        let tools = parse(&data);
        assert_eq!(tools.len(), 1);
    }

    #[test]
    fn blank_lines_are_always_skipped() {
        let data = format!("\n\n{HEADER}\n\n1  0.0157  x  80  60000  1\n\n");
        let tools = parse(&data);
        assert_eq!(tools.len(), 1);
    }

    #[test]
    fn duplicate_tool_number_last_row_wins() {
        let data = format!("{HEADER}\n1  0.0157  x  80  60000  1\n1  0.0236  -  90  50000  1\n");
        let tools = parse(&data);
        assert_eq!(tools.len(), 1);
        let tool = tools.get(&1);
        assert!(tool.is_some());
        if let Some(tool) = tool {
            assert!((tool.diameter - 0.0236).abs() < EPSILON);
            assert_eq!(tool.plated, Plated::No);
            assert_eq!(tool.feed_rate, Some(90));
        }
    }
}
