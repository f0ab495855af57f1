use serde::Serialize;
use std::collections::HashMap;

use crate::normalize::is_numeric;

/// A token paired with its Penn Treebank part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { word: word.into(), tag: tag.into() }
    }
}

/// Tags of punctuation classes, always removed by the annotation stage
pub const PUNCTUATION_TAGS: &[&str] = &[".", ":", ",", "''", "``", "$", "(", ")"];

/// Tag of cardinal numbers
pub const CARDINAL_TAG: &str = "CD";

/// Closed-class English words and their most frequent tag
const CLOSED_CLASS: &[(&str, &str)] = &[
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"), ("these", "DT"),
    ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"), ("any", "DT"), ("no", "DT"),
    ("all", "DT"), ("both", "DT"), ("another", "DT"), ("either", "DT"), ("neither", "DT"),
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("about", "IN"), ("against", "IN"), ("between", "IN"), ("into", "IN"),
    ("through", "IN"), ("during", "IN"), ("before", "IN"), ("after", "IN"), ("above", "IN"),
    ("below", "IN"), ("from", "IN"), ("up", "IN"), ("down", "IN"), ("out", "IN"), ("off", "IN"),
    ("over", "IN"), ("under", "IN"), ("since", "IN"), ("until", "IN"), ("upon", "IN"),
    ("within", "IN"), ("without", "IN"), ("via", "IN"), ("per", "IN"), ("than", "IN"),
    ("like", "IN"), ("as", "IN"), ("if", "IN"), ("because", "IN"), ("while", "IN"),
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"), ("yet", "CC"), ("plus", "CC"),
    ("&", "CC"), ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("her", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"), ("himself", "PRP"),
    ("herself", "PRP"), ("itself", "PRP"), ("ourselves", "PRP"), ("themselves", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("its", "PRP$"), ("our", "PRP$"),
    ("their", "PRP$"), ("who", "WP"), ("whom", "WP"), ("what", "WP"), ("whose", "WP$"),
    ("which", "WDT"), ("whichever", "WDT"), ("how", "WRB"), ("when", "WRB"), ("where", "WRB"),
    ("why", "WRB"), ("can", "MD"), ("could", "MD"), ("may", "MD"), ("might", "MD"),
    ("must", "MD"), ("shall", "MD"), ("should", "MD"), ("will", "MD"), ("would", "MD"),
    ("to", "TO"), ("there", "EX"), ("not", "RB"), ("never", "RB"), ("very", "RB"),
    ("too", "RB"), ("also", "RB"), ("just", "RB"), ("only", "RB"), ("really", "RB"),
    ("always", "RB"), ("often", "RB"), ("even", "RB"), ("still", "RB"), ("here", "RB"),
    ("now", "RB"), ("then", "RB"), ("again", "RB"), ("almost", "RB"), ("quite", "RB"),
    ("so", "RB"), ("is", "VBZ"), ("has", "VBZ"), ("does", "VBZ"), ("are", "VBP"), ("am", "VBP"),
    ("have", "VBP"), ("do", "VBP"), ("was", "VBD"), ("were", "VBD"), ("had", "VBD"),
    ("did", "VBD"), ("be", "VB"), ("been", "VBN"), ("being", "VBG"), ("oh", "UH"), ("wow", "UH"),
    ("hey", "UH"), ("ok", "UH"), ("good", "JJ"), ("bad", "JJ"), ("great", "JJ"), ("new", "JJ"),
    ("old", "JJ"), ("big", "JJ"), ("small", "JJ"), ("little", "JJ"), ("many", "JJ"),
    ("much", "JJ"), ("other", "JJ"), ("same", "JJ"), ("last", "JJ"), ("first", "JJ"),
    ("next", "JJ"), ("few", "JJ"), ("own", "JJ"), ("more", "JJR"), ("better", "JJR"),
    ("worse", "JJR"), ("less", "JJR"), ("most", "JJS"), ("best", "JJS"), ("worst", "JJS"),
    ("one", "CD"), ("two", "CD"), ("three", "CD"), ("four", "CD"), ("five", "CD"), ("six", "CD"),
    ("seven", "CD"), ("eight", "CD"), ("nine", "CD"), ("ten", "CD"), ("hundred", "CD"),
    ("thousand", "CD"), ("million", "CD"), ("billion", "CD"),
];

/// Adjective-forming suffixes, longest first
const ADJECTIVE_SUFFIXES: &[&str] = &["ical", "able", "ible", "less", "ous", "ful", "ive", "ish", "ary", "ic", "al"];

/// Rule-based Penn Treebank tagger
///
/// Closed-class words come from a fixed lexicon; open-class words are tagged
/// from capitalization, suffix and the previous tag. Case matters: a
/// capitalized word away from the start of a sentence is a proper noun.
#[derive(Debug, Clone)]
pub struct RuleTagger {
    lexicon: HashMap<&'static str, &'static str>,
}

impl RuleTagger {
    pub fn new() -> Self {
        Self { lexicon: CLOSED_CLASS.iter().copied().collect() }
    }

    /// Tag a token sequence, one tag per token
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedWord> {
        let mut tagged: Vec<TaggedWord> = Vec::with_capacity(tokens.len());
        let mut open_quote = false;

        for (i, token) in tokens.iter().enumerate() {
            let previous = tagged.last().map(|t| t.tag.as_str());
            let sentence_start = i == 0 || previous == Some(".");

            let tag = if token == "\"" {
                open_quote = !open_quote;
                if open_quote { "``" } else { "''" }
            } else {
                self.tag_token(token, previous, sentence_start)
            };

            tagged.push(TaggedWord::new(token.as_str(), tag));
        }

        tagged
    }

    fn tag_token(&self, token: &str, previous: Option<&str>, sentence_start: bool) -> &'static str {
        let lower = token.to_lowercase();
        if let Some(tag) = self.lexicon.get(lower.as_str()).copied() {
            return tag;
        }

        if let Some(tag) = punctuation_tag(token) {
            return tag;
        }

        if is_numeric(token) {
            return CARDINAL_TAG;
        }

        let capitalized = token.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_start {
            return if lower.ends_with('s') && token.chars().count() > 3 && !is_all_caps(token) {
                "NNPS"
            } else {
                "NNP"
            };
        }

        suffix_tag(&lower, previous)
    }
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new()
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "$" | "£" | "€" => "$",
        "'" | "`" => "''",
        "#" => "#",
        _ if !token.is_empty() && token.chars().all(|c| !c.is_alphanumeric()) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn suffix_tag(lower: &str, previous: Option<&str>) -> &'static str {
    let len = lower.chars().count();

    if matches!(previous, Some("TO") | Some("MD")) {
        return "VB";
    }
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        return match previous {
            Some("VBZ") | Some("VBP") | Some("VBD") | Some("VB") | Some("VBN") => "VBN",
            _ => "VBD",
        };
    }
    if len > 3 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 4 && lower.ends_with("est") {
        return "JJS";
    }
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return "JJ";
    }
    if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
        return if previous == Some("PRP") { "VBZ" } else { "NNS" };
    }
    "NN"
}
