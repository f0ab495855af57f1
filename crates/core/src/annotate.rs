//! Linguistic annotation of text fields.
//!
//! [`WordTools`] runs one string through normalization, tokenization, tagging,
//! stopword splitting and dictionary lookup, producing an [`Annotation`]. A
//! multi-valued field becomes a [`ProcessedText::Multi`] holding one
//! annotation per item, so that per-field counts average over items instead
//! of summing them.

use std::collections::HashSet;
use std::hash::Hash;

use crate::field::TextField;
use crate::lemma::WordCategory;
use crate::normalize::preprocess;
use crate::numeric::{Measure, mean_defined};
use crate::resources::LanguageModel;
use crate::tagger::{CARDINAL_TAG, PUNCTUATION_TAGS, TaggedWord};

/// Configuration for the annotation stage
#[derive(Debug, Clone, Copy)]
pub struct AnnotateConfig {
    /// Keep cardinal numbers among the words
    pub keep_digits: bool,
    /// Drop stopwords from `words` and `pos` (they stay in `stopwords`)
    pub remove_stopwords: bool,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self { keep_digits: true, remove_stopwords: false }
    }
}

/// Annotation of a single string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    /// Tokens that survived punctuation, digit and stopword filtering
    pub words: Vec<String>,
    /// Lemmas of `words` attested in the dictionary
    pub formal_words: Vec<String>,
    /// Stopwords found in the text
    pub stopwords: Vec<String>,
    /// Tagged tokens aligned with `words`
    pub pos: Vec<TaggedWord>,
    pub bigrams: Vec<Vec<String>>,
    pub trigrams: Vec<Vec<String>>,
    pub tag_bigrams: Vec<Vec<String>>,
    pub tag_trigrams: Vec<Vec<String>>,
}

impl Annotation {
    /// Nothing at all was found in the text
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.stopwords.is_empty()
    }
}

/// Annotation of a whole field
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessedText {
    Single(Annotation),
    Multi(Vec<Annotation>),
}

impl Default for ProcessedText {
    fn default() -> Self {
        ProcessedText::Single(Annotation::default())
    }
}

impl ProcessedText {
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            ProcessedText::Single(annotation) => std::slice::from_ref(annotation),
            ProcessedText::Multi(annotations) => annotations,
        }
    }

    /// Words of every item, concatenated
    pub fn words(&self) -> Vec<&str> {
        self.annotations().iter().flat_map(|a| a.words.iter().map(String::as_str)).collect()
    }

    /// Tagged tokens of every item, concatenated
    pub fn pos(&self) -> Vec<&TaggedWord> {
        self.annotations().iter().flat_map(|a| a.pos.iter()).collect()
    }

    /// Reduce a per-annotation count over the field.
    ///
    /// An empty annotation is undefined; a multi-valued field averages its
    /// defined items.
    pub fn reduce<F>(&self, count: F) -> Measure
    where
        F: Fn(&Annotation) -> usize,
    {
        let single = |a: &Annotation| if a.is_empty() { None } else { Some(count(a) as f64) };

        match self {
            ProcessedText::Single(annotation) => single(annotation),
            ProcessedText::Multi(annotations) => mean_defined(annotations.iter().map(single)),
        }
    }

    pub fn count_words(&self) -> Measure {
        self.reduce(|a| a.words.len())
    }

    pub fn count_formal_words(&self) -> Measure {
        self.reduce(|a| a.formal_words.len())
    }

    pub fn count_stopwords(&self) -> Measure {
        self.reduce(|a| a.stopwords.len())
    }

    pub fn count_uppercase(&self) -> Measure {
        self.reduce(|a| casing_counts(&a.words).0)
    }

    pub fn count_titlecase(&self) -> Measure {
        self.reduce(|a| casing_counts(&a.words).1)
    }

    /// Number of tagged tokens whose tag is in `tags`
    pub fn count_tags(&self, tags: &HashSet<String>) -> Measure {
        self.reduce(|a| a.pos.iter().filter(|t| tags.contains(&t.tag)).count())
    }

    /// Lowercased set of the field's words
    pub fn word_set(&self) -> HashSet<String> {
        self.words().into_iter().map(str::to_lowercase).collect()
    }

    /// Lowercased set of the field's word bigrams
    pub fn bigram_set(&self) -> HashSet<(String, String)> {
        self.annotations()
            .iter()
            .flat_map(|a| a.bigrams.iter())
            .map(|pair| (pair[0].to_lowercase(), pair[1].to_lowercase()))
            .collect()
    }
}

/// Annotation pipeline over a language model
pub struct WordTools<'a> {
    model: &'a dyn LanguageModel,
    config: AnnotateConfig,
}

impl<'a> WordTools<'a> {
    pub fn new(model: &'a dyn LanguageModel, config: AnnotateConfig) -> Self {
        Self { model, config }
    }

    /// Annotate one string
    pub fn process(&self, sentence: &str) -> Annotation {
        let tokens = self.model.tokenize(&preprocess(sentence));
        let tagged = self.model.tag(&tokens);

        let pos: Vec<TaggedWord> = tagged
            .into_iter()
            .filter(|t| !PUNCTUATION_TAGS.contains(&t.tag.as_str()))
            .filter(|t| self.config.keep_digits || t.tag != CARDINAL_TAG)
            .collect();

        let (stopwords, pos) = self.split_stopwords(pos);
        let words: Vec<String> = pos.iter().map(|t| t.word.clone()).collect();

        let formal_words = pos
            .iter()
            .map(|t| self.model.lemmatize(&t.word, WordCategory::from_tag(&t.tag)))
            .filter(|lemma| self.model.has_sense(lemma))
            .collect();

        let tags: Vec<String> = pos.iter().map(|t| t.tag.clone()).collect();

        Annotation {
            bigrams: ngrams(&words, 2),
            trigrams: ngrams(&words, 3),
            tag_bigrams: ngrams(&tags, 2),
            tag_trigrams: ngrams(&tags, 3),
            words,
            formal_words,
            stopwords,
            pos,
        }
    }

    /// Annotate a field, one annotation per item for sequences
    pub fn process_field(&self, field: Option<&TextField>) -> ProcessedText {
        match field {
            None => ProcessedText::default(),
            Some(TextField::Single(text)) => ProcessedText::Single(self.process(text)),
            Some(TextField::Multi(items)) => ProcessedText::Multi(items.iter().map(|item| self.process(item)).collect()),
        }
    }

    /// Compound sentiment of a field.
    ///
    /// Sequences average their items, but a single item that is empty after
    /// normalization makes the whole field undefined.
    pub fn sentiment(&self, field: Option<&TextField>) -> Measure {
        field?.reduce_strict(|text| {
            let text = preprocess(text);
            if text.is_empty() { None } else { Some(self.model.sentiment(&text)) }
        })
    }

    fn split_stopwords(&self, pos: Vec<TaggedWord>) -> (Vec<String>, Vec<TaggedWord>) {
        let stopwords = pos.iter().filter(|t| self.model.is_stopword(&t.word)).map(|t| t.word.clone()).collect();

        let kept = if self.config.remove_stopwords {
            pos.into_iter().filter(|t| !self.model.is_stopword(&t.word)).collect()
        } else {
            pos
        };

        (stopwords, kept)
    }
}

/// Contiguous windows of size `n`; shorter inputs yield none
pub fn ngrams<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    if n == 0 {
        return Vec::new();
    }
    items.windows(n).map(<[T]>::to_vec).collect()
}

/// Counts of fully uppercase and of title-cased words.
///
/// The buckets are exclusive: `NASA` is uppercase only, `Nasa` title-cased
/// only, `nasa` and `2017` neither.
pub fn casing_counts<S: AsRef<str>>(words: &[S]) -> (usize, usize) {
    words.iter().fold((0, 0), |(upper, title), word| {
        let word = word.as_ref();
        if is_uppercase(word) {
            (upper + 1, title)
        } else if word.chars().next().is_some_and(char::is_uppercase) {
            (upper, title + 1)
        } else {
            (upper, title)
        }
    })
}

/// At least one cased character, and every cased character uppercase
fn is_uppercase(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Jaccard overlap `|a ∩ b| / |a ∪ b|`, `0` when either side is empty
pub fn similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    if intersection == 0 {
        return 0.0;
    }

    intersection as f64 / a.union(b).count() as f64
}
