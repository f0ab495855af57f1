pub mod csv;
pub mod json;

use std::fmt;
use std::str::FromStr;

use crate::Result;
use crate::batch::FeatureTable;

pub use self::csv::{CsvConfig, to_csv_string, write_csv};
pub use json::{JsonConfig, JsonOutput, convert_to_json};

/// Output format for feature tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Comma separated values with a header line
    #[default]
    Csv,
    /// JSON object with columns, rows and labels
    Json,
}

impl OutputFormat {
    /// Render a table in this format with default options
    pub fn render(self, table: &FeatureTable) -> Result<String> {
        match self {
            OutputFormat::Csv => to_csv_string(table, &CsvConfig::default()),
            OutputFormat::Json => convert_to_json(table, &JsonConfig::default()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: csv, json", s)),
        }
    }
}
