//! Text field values as they appear in a record.
//!
//! Dataset columns hold either one string (`targetTitle`) or a list of
//! strings (`postText`, `targetParagraphs`). [`TextField`] keeps that shape
//! explicit so every per-field measurement reduces over it the same way.

use serde::{Deserialize, Serialize};

use crate::numeric::{Measure, mean_defined};

/// A text column value: one string or a sequence of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Single(String),
    Multi(Vec<String>),
}

impl TextField {
    /// True for an empty string or an empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            TextField::Single(text) => text.is_empty(),
            TextField::Multi(items) => items.is_empty(),
        }
    }

    /// The first string of the field, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            TextField::Single(text) => Some(text.as_str()),
            TextField::Multi(items) => items.first().map(String::as_str),
        }
    }

    /// All strings of the field in order.
    pub fn items(&self) -> Vec<&str> {
        match self {
            TextField::Single(text) => vec![text.as_str()],
            TextField::Multi(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Number of strings held by the field.
    pub fn len(&self) -> usize {
        match self {
            TextField::Single(_) => 1,
            TextField::Multi(items) => items.len(),
        }
    }

    /// Reduces a per-string measurement over the field.
    ///
    /// An empty string is undefined. A sequence yields the mean of its defined
    /// items and is undefined when it is empty or no item is defined.
    pub fn reduce<F>(&self, measure: F) -> Measure
    where
        F: Fn(&str) -> Measure,
    {
        let single = |text: &str| if text.is_empty() { None } else { measure(text) };

        match self {
            TextField::Single(text) => single(text),
            TextField::Multi(items) => mean_defined(items.iter().map(|item| single(item))),
        }
    }

    /// Like [`TextField::reduce`], but any empty or undefined item makes the
    /// whole sequence undefined.
    pub fn reduce_strict<F>(&self, measure: F) -> Measure
    where
        F: Fn(&str) -> Measure,
    {
        match self {
            TextField::Single(text) if text.is_empty() => None,
            TextField::Single(text) => measure(text),
            TextField::Multi(items) if items.is_empty() => None,
            TextField::Multi(items) => {
                let mut total = 0.0;
                for item in items {
                    if item.is_empty() {
                        return None;
                    }
                    total += measure(item)?;
                }
                Some(total / items.len() as f64)
            }
        }
    }
}

impl From<&str> for TextField {
    fn from(text: &str) -> Self {
        TextField::Single(text.to_string())
    }
}

impl From<String> for TextField {
    fn from(text: String) -> Self {
        TextField::Single(text)
    }
}

impl From<Vec<String>> for TextField {
    fn from(items: Vec<String>) -> Self {
        TextField::Multi(items)
    }
}

impl From<Vec<&str>> for TextField {
    fn from(items: Vec<&str>) -> Self {
        TextField::Multi(items.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(text: &str) -> Measure {
        Some(text.len() as f64)
    }

    #[test]
    fn test_deserialize_untagged() {
        let single: TextField = serde_json::from_str(r#""hello""#).unwrap();
        let multi: TextField = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(single, TextField::from("hello"));
        assert_eq!(multi, TextField::from(vec!["a", "b"]));
    }

    #[test]
    fn test_first_and_empty() {
        assert_eq!(TextField::from(vec!["x", "y"]).first(), Some("x"));
        assert_eq!(TextField::Multi(vec![]).first(), None);
        assert!(TextField::from("").is_empty());
        assert!(!TextField::from(vec![""]).is_empty());
    }

    #[test]
    fn test_reduce_averages_defined_items() {
        let field = TextField::from(vec!["ab", "abcd"]);
        assert_eq!(field.reduce(len), Some(3.0));

        let with_empty = TextField::from(vec!["ab", ""]);
        assert_eq!(with_empty.reduce(len), Some(2.0));

        assert_eq!(TextField::from(vec!["", ""]).reduce(len), None);
        assert_eq!(TextField::Multi(vec![]).reduce(len), None);
        assert_eq!(TextField::from("").reduce(len), None);
    }

    #[test]
    fn test_reduce_strict_poisons_on_empty_item() {
        assert_eq!(TextField::from(vec!["ab", "abcd"]).reduce_strict(len), Some(3.0));
        assert_eq!(TextField::from(vec!["ab", ""]).reduce_strict(len), None);
        assert_eq!(TextField::Multi(vec![]).reduce_strict(len), None);
    }
}
