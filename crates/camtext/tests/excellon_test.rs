//! Integration tests for Excellon tool-definition and tool-report parsing.

use camtext::{parse_tool_definitions, parse_tool_report, Plated, Settings, Units};

const EPSILON: f64 = 1e-12;
const MILS_PER_MM: f64 = 39.370_078_740_2;

/// A mixed Allegro blob → one record per tool number, inline and comment
/// forms both recognized, noise ignored.
#[test]
fn allegro_blob_yields_tool_map() {
    let data = "M48\n\
                ; Holesize report follows\n\
                0.0157 P T01 0.002 0.002\n\
                0.0236 N T02 0.002 0.002\n\
                Holesize 3. = 0.91 Tolerance = +0.08/-0.08 OPTIONAL MM Quantity = 4\n\
                %\n";
    let settings = Settings {
        units: Units::Metric,
    };
    let tools = parse_tool_definitions(data, settings);
    assert_eq!(tools.len(), 3);
    assert_eq!(tools.get(&1).map(|tool| tool.plated), Some(Plated::Yes));
    assert_eq!(tools.get(&2).map(|tool| tool.plated), Some(Plated::No));
    assert_eq!(
        tools.get(&3).map(|tool| tool.plated),
        Some(Plated::Optional)
    );

    let diameter = tools.get(&1).map_or(0.0, |tool| tool.diameter);
    assert!((diameter - 0.0157 / MILS_PER_MM).abs() < EPSILON);
    let metric_diameter = tools.get(&3).map_or(0.0, |tool| tool.diameter);
    assert!((metric_diameter - 0.91).abs() < EPSILON);
}

/// Inch settings apply one extra division by 25.4 to every matched size.
#[test]
fn inch_settings_convert_matched_sizes() {
    let settings = Settings { units: Units::Inch };
    let tools = parse_tool_definitions("0.0157 P T01 0.002 0.002\n", settings);
    let diameter = tools.get(&1).map_or(0.0, |tool| tool.diameter);
    assert!((diameter - 0.0157 / MILS_PER_MM / 25.4).abs() < EPSILON);
}

/// Full report: header detection, rule skipping, six-column rows with
/// feed rate and spindle speed, malformed rows dropped silently.
#[test]
fn pads_report_parses_table_rows() {
    let data = "Drill report\n\
                \n\
                Tool  Size     Plated  Feed  Speed  Qty\n\
                ====  ====  ====  ====  =====  ===\n\
                1   0.0157   x   80   60000   1\n\
                2   0.0236   -   80   60000   12\n\
                bad row\n\
                ==========================\n\
                3   0.0354   x   80   60000   2\n";
    let tools = parse_tool_report(data);
    assert_eq!(tools.len(), 3);

    let first = tools.get(&1);
    assert!(first.is_some(), "expected tool 1 from report");
    if let Some(tool) = first {
        assert!((tool.diameter - 0.0157).abs() < EPSILON);
        assert_eq!(tool.plated, Plated::Yes);
        assert_eq!(tool.feed_rate, Some(80));
        assert_eq!(tool.rpm, Some(60_000));
    }
    assert_eq!(tools.get(&2).map(|tool| tool.plated), Some(Plated::No));
}

/// The header-column labels themselves never parse as rows.
#[test]
fn report_without_header_yields_nothing() {
    let data = "Tool  Size  Plated  Feed  Speed  Qty\n1  0.0157  x  80  60000  1\n";
    let tools = parse_tool_report(data);
    assert!(tools.is_empty());
}
