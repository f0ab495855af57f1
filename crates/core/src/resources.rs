//! Linguistic resources shared by every record of a batch.
//!
//! [`LinguisticResources`] bundles the tokenizer, tagger, lemmatizer,
//! stopword list, lexical dictionary and sentiment lexicon. It is built once,
//! either fully loaded or not at all, and is read-only afterwards, so one
//! instance can be shared across worker threads behind an `Arc`.
//!
//! The annotation stage only sees the [`LanguageModel`] trait, which lets
//! tests substitute a deterministic mock.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use stop_words::{LANGUAGE, get};
use tracing::{debug, info, warn};

use crate::lemma::{Lemmatizer, WordCategory};
use crate::normalize::word_tokenize;
use crate::sentiment::SentimentLexicon;
use crate::tagger::{RuleTagger, TaggedWord};
use crate::{HamusError, Result};

/// WordNet index files read when the dictionary path is a directory
const WORDNET_INDEX_FILES: &[&str] = &["index.noun", "index.verb", "index.adj", "index.adv"];

/// Natural-language collaborator used by the annotation stage.
///
/// Implementations must be pure: the same input always yields the same
/// output, and no call mutates shared state.
pub trait LanguageModel: Send + Sync {
    /// Split normalized text into tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Assign one part-of-speech tag per token.
    fn tag(&self, tokens: &[String]) -> Vec<TaggedWord>;

    /// Reduce a token to its dictionary base form.
    fn lemmatize(&self, token: &str, category: WordCategory) -> String;

    /// Whether a lemma has at least one sense in the reference dictionary.
    fn has_sense(&self, lemma: &str) -> bool;

    /// Compound sentiment score in `[-1, 1]`.
    fn sentiment(&self, text: &str) -> f64;

    /// Whether a token is an English stopword.
    fn is_stopword(&self, token: &str) -> bool;
}

/// Locations of optional resource files.
///
/// Any path left unset is looked up in the search directory, and the
/// built-in resource is used when nothing is found there either.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// WordNet dictionary directory (with `index.*` files) or a lemma-per-line file
    pub dictionary: Option<PathBuf>,
    /// Sentiment lexicon in the VADER layout
    pub lexicon: Option<PathBuf>,
    /// Extra stopwords, one per line, added to the English list
    pub stopwords: Option<PathBuf>,
    /// Directory searched for `wordnet/` and `vader_lexicon.txt`
    pub search_dir: Option<PathBuf>,
}

impl ResourceConfig {
    /// Default search directory (~/.config/hamus)
    pub fn default_search_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("hamus"))
    }

    fn resolve(&self, explicit: &Option<PathBuf>, name: &str) -> Option<PathBuf> {
        if explicit.is_some() {
            return explicit.clone();
        }

        self.search_dir
            .clone()
            .or_else(Self::default_search_dir)
            .map(|dir| dir.join(name))
            .filter(|path| path.exists())
    }
}

/// Set of lemmas attested in a lexical dictionary
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    lemmas: HashSet<String>,
}

impl Dictionary {
    /// Parse dictionary lines: the first field of each line is a lemma.
    ///
    /// Lines starting with whitespace (the WordNet license header) are
    /// skipped; underscores in multi-word lemmas become spaces.
    pub fn parse(content: &str) -> Self {
        let lemmas = content
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with(char::is_whitespace) && !line.starts_with('#'))
            .filter_map(|line| line.split_whitespace().next())
            .map(|lemma| lemma.replace('_', " ").to_lowercase())
            .collect();

        Self { lemmas }
    }

    /// Load a lemma file, or every WordNet index file of a directory
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HamusError::FileNotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Ok(Self::parse(&fs::read_to_string(path)?));
        }

        let mut dictionary = Self::default();
        for name in WORDNET_INDEX_FILES {
            let file = path.join(name);
            if file.exists() {
                dictionary.lemmas.extend(Self::parse(&fs::read_to_string(&file)?).lemmas);
            }
        }

        if dictionary.lemmas.is_empty() {
            return Err(HamusError::ResourceError(format!(
                "no WordNet index files found in {}",
                path.display()
            )));
        }

        Ok(dictionary)
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// The built-in English language model
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    tagger: RuleTagger,
    lemmatizer: Lemmatizer,
    stopwords: HashSet<String>,
    dictionary: Option<Dictionary>,
    lexicon: SentimentLexicon,
}

impl LinguisticResources {
    /// Resources built only from what ships with the crate.
    ///
    /// Without a dictionary, a lemma counts as attested when it is made of
    /// letters only.
    pub fn builtin() -> Self {
        Self {
            tagger: RuleTagger::new(),
            lemmatizer: Lemmatizer::new(),
            stopwords: english_stopwords(),
            dictionary: None,
            lexicon: SentimentLexicon::builtin(),
        }
    }

    /// Load every configured resource, failing if any configured file is unusable
    pub fn load(config: &ResourceConfig) -> Result<Self> {
        let mut resources = Self::builtin();

        match config.resolve(&config.dictionary, "wordnet") {
            Some(path) => resources.dictionary = Some(Dictionary::from_path(&path)?),
            None => warn!("No dictionary configured, formal words fall back to alphabetic lemmas"),
        }

        if let Some(path) = config.resolve(&config.lexicon, "vader_lexicon.txt") {
            resources.lexicon = SentimentLexicon::from_file(&path)?;
        }

        if let Some(path) = &config.stopwords {
            if !path.exists() {
                return Err(HamusError::FileNotFound(path.clone()));
            }
            let extra = fs::read_to_string(path)?;
            resources
                .stopwords
                .extend(extra.lines().map(str::trim).filter(|w| !w.is_empty()).map(str::to_lowercase));
        }

        info!(
            dictionary = resources.dictionary.as_ref().map_or(0, Dictionary::len),
            lexicon = resources.lexicon.len(),
            stopwords = resources.stopwords.len(),
            "Linguistic resources loaded"
        );

        Ok(resources)
    }

    /// Replace the dictionary
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        debug!(lemmas = dictionary.len(), "Dictionary attached");
        self.dictionary = Some(dictionary);
        self
    }

    /// Replace the sentiment lexicon
    pub fn with_lexicon(mut self, lexicon: SentimentLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }
}

/// The NLTK English stopword list, lowercased
fn english_stopwords() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().map(|word| word.to_lowercase()).collect()
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageModel for LinguisticResources {
    fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokenize(text)
    }

    fn tag(&self, tokens: &[String]) -> Vec<TaggedWord> {
        self.tagger.tag(tokens)
    }

    fn lemmatize(&self, token: &str, category: WordCategory) -> String {
        match &self.dictionary {
            Some(dictionary) => {
                let known = |lemma: &str| dictionary.contains(lemma);
                self.lemmatizer.lemmatize(token, category, Some(&known))
            }
            None => self.lemmatizer.lemmatize(token, category, None),
        }
    }

    fn has_sense(&self, lemma: &str) -> bool {
        match &self.dictionary {
            Some(dictionary) => dictionary.contains(&lemma.to_lowercase()),
            None => !lemma.is_empty() && lemma.chars().all(char::is_alphabetic),
        }
    }

    fn sentiment(&self, text: &str) -> f64 {
        self.lexicon.compound(text)
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }
}
