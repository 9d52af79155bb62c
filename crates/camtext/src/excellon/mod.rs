//! Excellon drill tool-definition and tool-report parsing.

pub mod report;
pub mod tools;
pub mod types;

pub use report::ReportParser;
pub use tools::ToolDefinitionParser;
pub use types::{Plated, Settings, ToolRecord, Units};
