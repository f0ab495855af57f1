use crate::Result;
use crate::batch::FeatureTable;
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Feature names, in row order
    pub columns: &'a [String],
    /// One array of values per record
    pub rows: &'a [Vec<f64>],
    /// Record ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<&'a [Option<String>]>,
    /// Integer labels, aligned with `rows`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<&'a [i32]>,
    /// Class name of each label value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<&'a [String]>,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Include record ids
    pub include_ids: bool,
    /// Include labels and class names
    pub include_labels: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { include_ids: true, include_labels: true, pretty: false }
    }
}

/// Convert a feature table to JSON
pub fn convert_to_json(table: &FeatureTable, config: &JsonConfig) -> Result<String> {
    let labels = table.labels().filter(|_| config.include_labels);

    let output = JsonOutput {
        columns: table.columns(),
        rows: table.rows(),
        ids: if config.include_ids { Some(table.ids()) } else { None },
        labels: labels.map(|l| l.values.as_slice()),
        classes: labels.map(|l| l.classes.as_slice()),
    };

    if config.pretty { Ok(serde_json::to_string_pretty(&output)?) } else { Ok(serde_json::to_string(&output)?) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Labels;
    use crate::features::{FeatureFamily, FeatureVector};

    fn table(labels: Option<Labels>) -> FeatureTable {
        let mut vector = FeatureVector::default();
        vector.push("numChars_post_title".to_string(), FeatureFamily::Character, 16.0);
        FeatureTable::from_vectors(vec![vector], vec![Some("1".to_string())], labels).unwrap()
    }

    #[test]
    fn test_convert_to_json_with_labels() {
        let labels = Labels { classes: vec!["clickbait".to_string()], values: vec![0] };
        let json = convert_to_json(&table(Some(labels)), &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["columns"][0], "numChars_post_title");
        assert_eq!(value["rows"][0][0], 16.0);
        assert_eq!(value["labels"][0], 0);
        assert_eq!(value["classes"][0], "clickbait");
        assert_eq!(value["ids"][0], "1");
    }

    #[test]
    fn test_convert_to_json_skips_missing_parts() {
        let config = JsonConfig { include_ids: false, include_labels: true, pretty: true };
        let json = convert_to_json(&table(None), &config).unwrap();

        assert!(json.contains('\n'));
        assert!(!json.contains("labels"));
        assert!(!json.contains("ids"));
    }
}
