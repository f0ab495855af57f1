//! Clickbait datasets in the Webis JSONL layout.
//!
//! A dataset is an `instances.jsonl` file, one JSON object per line, and an
//! optional `truth.jsonl` file whose objects carry an `id` and a
//! `truthClass`. The two are joined on `id`. The column schema is the union
//! of keys seen across instance lines and is checked once, before any record
//! is processed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::field::TextField;
use crate::{HamusError, Result};

/// Columns every dataset must expose, in reporting order
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["postText", "postMedia", "targetKeywords", "targetDescription", "targetTitle", "targetParagraphs"];

/// Ground-truth column
pub const TRUTH_COLUMN: &str = "truthClass";

/// One post with its linked article and optional label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub post_text: Option<TextField>,
    #[serde(default)]
    pub post_media: Option<TextField>,
    #[serde(default)]
    pub target_title: Option<TextField>,
    #[serde(default)]
    pub target_description: Option<TextField>,
    #[serde(default)]
    pub target_keywords: Option<TextField>,
    #[serde(default)]
    pub target_paragraphs: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truth_class: Option<String>,
}

impl Record {
    /// The post title: first element of `postText`
    pub fn post_title(&self) -> Option<&str> {
        self.post_text.as_ref().and_then(TextField::first)
    }
}

/// A `truth.jsonl` line
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Truth {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: Option<String>,
    #[serde(default)]
    truth_class: Option<String>,
}

/// Accept string and numeric ids alike
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id),
        Some(other) => Some(other.to_string()),
    })
}

/// Integer class labels factorized from the ground truth
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labels {
    /// Class names; a class's index is its label
    pub classes: Vec<String>,
    /// One label per record, `-1` where the record has no class
    pub values: Vec<i32>,
}

/// Records plus the set of columns they were read with
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: BTreeSet<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Dataset built in memory; every record column counts as present
    pub fn new(records: Vec<Record>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().chain([&"id", &TRUTH_COLUMN]).map(|c| c.to_string()).collect();
        Self { columns, records }
    }

    /// Dataset with an explicit column schema
    pub fn with_columns<I, S>(columns: I, records: Vec<Record>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: columns.into_iter().map(Into::into).collect(), records }
    }

    /// Parse instance lines and optionally join truth lines onto them
    pub fn from_jsonl_str(instances: &str, truth: Option<&str>) -> Result<Self> {
        let mut columns = BTreeSet::new();
        let mut records = Vec::new();

        for (line, value) in json_lines(instances)? {
            let Value::Object(object) = &value else {
                return Err(HamusError::InvalidRecord { line, message: "expected a JSON object".to_string() });
            };
            columns.extend(object.keys().cloned());

            let record: Record = serde_json::from_value(value)
                .map_err(|e| HamusError::InvalidRecord { line, message: e.to_string() })?;
            records.push(record);
        }

        let mut dataset = Self { columns, records };
        if let Some(truth) = truth {
            dataset.join_truth(truth)?;
        }

        debug!(records = dataset.len(), columns = dataset.columns.len(), "Dataset parsed");
        Ok(dataset)
    }

    /// Read `instances.jsonl` and an optional `truth.jsonl`
    pub fn from_files(instances: &Path, truth: Option<&Path>) -> Result<Self> {
        let instances = read(instances)?;
        let truth = truth.map(read).transpose()?;
        Self::from_jsonl_str(&instances, truth.as_deref())
    }

    /// Check that every required column is present
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> =
            REQUIRED_COLUMNS.iter().filter(|c| !self.columns.contains(**c)).map(|c| c.to_string()).collect();

        if missing.is_empty() { Ok(()) } else { Err(HamusError::MissingColumns { missing }) }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Factorize the ground truth into integer labels.
    ///
    /// The first class seen is `0` and the next new one `1`. `None` when the
    /// dataset has no truth column at all.
    pub fn labels(&self) -> Result<Option<Labels>> {
        if !self.has_column(TRUTH_COLUMN) {
            return Ok(None);
        }

        let mut classes: Vec<String> = Vec::new();
        let mut values = Vec::with_capacity(self.records.len());
        let mut unlabeled = 0;

        for record in &self.records {
            let Some(class) = &record.truth_class else {
                unlabeled += 1;
                values.push(-1);
                continue;
            };

            let index = match classes.iter().position(|c| c == class) {
                Some(index) => index,
                None => {
                    classes.push(class.clone());
                    classes.len() - 1
                }
            };
            values.push(index as i32);
        }

        if classes.len() > 2 {
            return Err(HamusError::TooManyClasses { classes });
        }
        if classes.len() < 2 {
            warn!(classes = classes.len(), "Ground truth holds fewer than two classes");
        }
        if unlabeled > 0 {
            warn!(unlabeled, "Records without a truth class are labeled -1");
        }

        Ok(Some(Labels { classes, values }))
    }

    fn join_truth(&mut self, truth: &str) -> Result<()> {
        let mut classes: HashMap<String, Option<String>> = HashMap::new();
        for (line, value) in json_lines(truth)? {
            let entry: Truth =
                serde_json::from_value(value).map_err(|e| HamusError::InvalidRecord { line, message: e.to_string() })?;
            match entry.id {
                Some(id) => {
                    classes.insert(id, entry.truth_class);
                }
                None => warn!(line, "Truth line without an id ignored"),
            }
        }

        let mut matched = 0;
        for record in &mut self.records {
            if let Some(class) = record.id.as_ref().and_then(|id| classes.get(id)) {
                record.truth_class = class.clone();
                matched += 1;
            }
        }

        if matched < classes.len() {
            warn!(unmatched = classes.len() - matched, "Truth entries without a matching instance");
        }

        self.columns.insert(TRUTH_COLUMN.to_string());
        Ok(())
    }
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(HamusError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Non-blank lines decoded as JSON, numbered from 1
fn json_lines(content: &str) -> Result<Vec<(usize, Value)>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Value>(line)
                .map(|value| (i + 1, value))
                .map_err(|e| HamusError::InvalidRecord { line: i + 1, message: e.to_string() })
        })
        .collect()
}
