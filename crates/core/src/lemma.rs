//! Suffix-substitution lemmatizer in the style of WordNet's morphy.

use serde::Serialize;

/// Coarse lexical category used for lemmatization and dictionary lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WordCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordCategory {
    /// Map a Penn Treebank tag to its category (nouns when unmapped)
    pub fn from_tag(tag: &str) -> Self {
        match tag.get(..2) {
            Some("JJ") => WordCategory::Adjective,
            Some("VB") => WordCategory::Verb,
            Some("RB") => WordCategory::Adverb,
            _ => WordCategory::Noun,
        }
    }
}

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// Irregular forms that no suffix rule recovers
const EXCEPTIONS: &[(&str, WordCategory, &str)] = &[
    ("was", WordCategory::Verb, "be"),
    ("were", WordCategory::Verb, "be"),
    ("is", WordCategory::Verb, "be"),
    ("are", WordCategory::Verb, "be"),
    ("am", WordCategory::Verb, "be"),
    ("been", WordCategory::Verb, "be"),
    ("has", WordCategory::Verb, "have"),
    ("had", WordCategory::Verb, "have"),
    ("did", WordCategory::Verb, "do"),
    ("done", WordCategory::Verb, "do"),
    ("went", WordCategory::Verb, "go"),
    ("gone", WordCategory::Verb, "go"),
    ("made", WordCategory::Verb, "make"),
    ("said", WordCategory::Verb, "say"),
    ("took", WordCategory::Verb, "take"),
    ("saw", WordCategory::Verb, "see"),
    ("seen", WordCategory::Verb, "see"),
    ("got", WordCategory::Verb, "get"),
    ("came", WordCategory::Verb, "come"),
    ("knew", WordCategory::Verb, "know"),
    ("known", WordCategory::Verb, "know"),
    ("thought", WordCategory::Verb, "think"),
    ("children", WordCategory::Noun, "child"),
    ("people", WordCategory::Noun, "person"),
    ("mice", WordCategory::Noun, "mouse"),
    ("feet", WordCategory::Noun, "foot"),
    ("teeth", WordCategory::Noun, "tooth"),
    ("better", WordCategory::Adjective, "good"),
    ("best", WordCategory::Adjective, "good"),
    ("worse", WordCategory::Adjective, "bad"),
    ("worst", WordCategory::Adjective, "bad"),
];

/// Lemmatizer working against an optional dictionary lookup
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Lemmatize a lowercased word.
    ///
    /// With a dictionary, every candidate produced by the suffix rules is
    /// checked and the shortest attested one wins, falling back to the word
    /// itself. Without one, the first rule that applies is trusted, limited to
    /// the unambiguous plural and participle endings.
    pub fn lemmatize(&self, word: &str, category: WordCategory, dictionary: Option<&dyn Fn(&str) -> bool>) -> String {
        let word = word.to_lowercase();

        if let Some((_, _, lemma)) = EXCEPTIONS.iter().find(|(form, cat, _)| *form == word && *cat == category) {
            return lemma.to_string();
        }

        match dictionary {
            Some(known) => {
                let mut candidates = substitutions(&word, category);
                candidates.push(word.clone());
                candidates
                    .into_iter()
                    .filter(|candidate| !candidate.is_empty() && known(candidate))
                    .min_by_key(|candidate| candidate.chars().count())
                    .unwrap_or(word)
            }
            None => heuristic(&word, category).unwrap_or(word),
        }
    }
}

fn rules(category: WordCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        WordCategory::Noun => NOUN_RULES,
        WordCategory::Verb => VERB_RULES,
        WordCategory::Adjective => ADJECTIVE_RULES,
        WordCategory::Adverb => &[],
    }
}

fn substitutions(word: &str, category: WordCategory) -> Vec<String> {
    rules(category)
        .iter()
        .filter_map(|(suffix, replacement)| {
            word.strip_suffix(suffix).map(|stem| format!("{}{}", stem, replacement))
        })
        .collect()
}

fn heuristic(word: &str, category: WordCategory) -> Option<String> {
    if word.chars().count() <= 3 {
        return None;
    }

    match category {
        WordCategory::Noun | WordCategory::Verb if word.ends_with("ies") => {
            word.strip_suffix("ies").map(|stem| format!("{}y", stem))
        }
        WordCategory::Noun | WordCategory::Verb if word.ends_with('s') && !word.ends_with("ss") => {
            word.strip_suffix('s').map(str::to_string)
        }
        WordCategory::Verb if word.chars().count() > 5 && word.ends_with("ing") => {
            word.strip_suffix("ing").map(str::to_string)
        }
        WordCategory::Verb if word.chars().count() > 4 && word.ends_with("ed") => {
            word.strip_suffix("ed").map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn dictionary() -> HashSet<&'static str> {
        ["cat", "box", "church", "man", "city", "run", "make", "walk", "big", "large", "bus"].into_iter().collect()
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(WordCategory::from_tag("NNS"), WordCategory::Noun);
        assert_eq!(WordCategory::from_tag("VBG"), WordCategory::Verb);
        assert_eq!(WordCategory::from_tag("JJS"), WordCategory::Adjective);
        assert_eq!(WordCategory::from_tag("RB"), WordCategory::Adverb);
        assert_eq!(WordCategory::from_tag("PRP"), WordCategory::Noun);
        assert_eq!(WordCategory::from_tag("."), WordCategory::Noun);
    }

    #[test]
    fn test_lemmatize_with_dictionary() {
        let words = dictionary();
        let known = |w: &str| words.contains(w);
        let lem = Lemmatizer::new();

        assert_eq!(lem.lemmatize("cats", WordCategory::Noun, Some(&known)), "cat");
        assert_eq!(lem.lemmatize("boxes", WordCategory::Noun, Some(&known)), "box");
        assert_eq!(lem.lemmatize("churches", WordCategory::Noun, Some(&known)), "church");
        assert_eq!(lem.lemmatize("men", WordCategory::Noun, Some(&known)), "man");
        assert_eq!(lem.lemmatize("cities", WordCategory::Noun, Some(&known)), "city");
        assert_eq!(lem.lemmatize("making", WordCategory::Verb, Some(&known)), "make");
        assert_eq!(lem.lemmatize("walked", WordCategory::Verb, Some(&known)), "walk");
        assert_eq!(lem.lemmatize("larger", WordCategory::Adjective, Some(&known)), "large");
        assert_eq!(lem.lemmatize("bus", WordCategory::Noun, Some(&known)), "bus");
        assert_eq!(lem.lemmatize("Unknown", WordCategory::Noun, Some(&known)), "unknown");
    }

    #[test]
    fn test_lemmatize_exceptions() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemmatize("went", WordCategory::Verb, None), "go");
        assert_eq!(lem.lemmatize("children", WordCategory::Noun, None), "child");
        assert_eq!(lem.lemmatize("went", WordCategory::Noun, None), "went");
    }

    #[test]
    fn test_lemmatize_heuristic() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemmatize("ways", WordCategory::Noun, None), "way");
        assert_eq!(lem.lemmatize("stories", WordCategory::Noun, None), "story");
        assert_eq!(lem.lemmatize("glass", WordCategory::Noun, None), "glass");
        assert_eq!(lem.lemmatize("walking", WordCategory::Verb, None), "walk");
        assert_eq!(lem.lemmatize("bus", WordCategory::Noun, None), "bus");
        assert_eq!(lem.lemmatize("quickly", WordCategory::Adverb, None), "quickly");
    }
}
