//! Text cleanup and word tokenization ahead of tagging.

use regex::Regex;
use std::sync::LazyLock;

/// Abbreviations, numbers, words with inner apostrophes or hyphens, ellipses,
/// double dashes and single punctuation marks, in that order of preference.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z]\.){2,}|\d+(?:[.,:/]\d+)*%?|\w+(?:['’\-]\w+)*|\.\.\.|--|[^\w\s]").expect("valid token regex")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Configuration for text normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Whether to drop `#` and `@` marker characters
    pub strip_markers: bool,
    /// Whether to convert curly quotes to straight ones
    pub straighten_quotes: bool,
    /// Whether to decode `&amp;` back to `&`
    pub unescape_entities: bool,
    /// Whether to trim and collapse runs of whitespace
    pub collapse_whitespace: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { strip_markers: true, straighten_quotes: true, unescape_entities: true, collapse_whitespace: true }
    }
}

/// Normalize raw field text before tokenization
pub fn normalize_text(text: &str, config: &NormalizeConfig) -> String {
    let mut processed = text.to_string();

    if config.strip_markers {
        processed = processed.replace(['#', '@'], "");
    }

    if config.straighten_quotes {
        processed = processed.replace(['‘', '’'], "'").replace(['“', '”'], "\"");
    }

    if config.unescape_entities {
        processed = processed.replace("&amp;", "&");
    }

    if config.collapse_whitespace {
        processed = WHITESPACE.replace_all(processed.trim(), " ").to_string();
    }

    processed
}

/// Normalize with the default configuration
pub fn preprocess(text: &str) -> String {
    normalize_text(text, &NormalizeConfig::default())
}

/// Split text into word and punctuation tokens
pub fn word_tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// True when the raw field starts with the retweet marker `RT `
pub fn is_retweet(raw: &str) -> bool {
    raw.starts_with("RT ")
}

/// A token that reads as a number (`12`, `2.5`, `1,000`, `50%`)
pub fn is_numeric(token: &str) -> bool {
    let digits = token.strip_suffix('%').unwrap_or(token);
    digits.chars().next().is_some_and(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':' | '/'))
}
