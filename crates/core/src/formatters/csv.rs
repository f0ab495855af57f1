use std::io::Write;

use crate::Result;
use crate::batch::FeatureTable;

/// Configuration for CSV output
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Write a leading `id` column
    pub include_ids: bool,
    /// Write a trailing `label` column when the table has labels
    pub include_labels: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: b',', include_ids: true, include_labels: true }
    }
}

/// Write a feature table as CSV: one header line, then one line per record
pub fn write_csv<W: Write>(table: &FeatureTable, writer: W, config: &CsvConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(config.delimiter).from_writer(writer);
    let labels = table.labels().filter(|_| config.include_labels);

    let mut header: Vec<&str> = Vec::with_capacity(table.columns().len() + 2);
    if config.include_ids {
        header.push("id");
    }
    header.extend(table.columns().iter().map(String::as_str));
    if labels.is_some() {
        header.push("label");
    }
    writer.write_record(&header)?;

    for (i, row) in table.rows().iter().enumerate() {
        let mut line: Vec<String> = Vec::with_capacity(header.len());
        if config.include_ids {
            line.push(table.ids().get(i).cloned().flatten().unwrap_or_default());
        }
        line.extend(row.iter().map(f64::to_string));
        if let Some(labels) = labels {
            line.push(labels.values.get(i).copied().unwrap_or(-1).to_string());
        }
        writer.write_record(&line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render a feature table as a CSV string
pub fn to_csv_string(table: &FeatureTable, config: &CsvConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
