//! Per-record feature extraction.
//!
//! A record goes through three phases and never returns to an earlier one:
//!
//! 1. **Validate**: the dataset's column schema is checked once per batch
//!    (see [`crate::Dataset::validate`]).
//! 2. **Derive**: every logical text field is measured (characters, words,
//!    formal words, stopwords, casing, tags, sentiment).
//! 3. **Combine**: per-field measurements become `<metric>_<field>`
//!    features, and every unordered pair of fields becomes ratio and
//!    difference features keyed `<metric>_<fieldA>_<fieldB>`.
//!
//! Field order is fixed by [`Field::ALL`], so feature names come out in the
//! same order for every record and every run. A disabled [`FeatureFamily`]
//! writes none of its keys.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

use crate::annotate::{AnnotateConfig, ProcessedText, WordTools, similarity};
use crate::batch::{FeatureTable, extract_batch};
use crate::dataset::{Dataset, Record};
use crate::field::TextField;
use crate::normalize::is_retweet;
use crate::numeric::{Measure, count, count_occurrences, diff, diff_raw, ratio, ratio_raw, value};
use crate::ocr::ImageText;
use crate::resources::LanguageModel;
use crate::{HamusError, Result};

/// A group of related features enabled or disabled as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FeatureFamily {
    /// Character, question mark and retweet features
    Character,
    /// Word, formal word, stopword, casing and overlap features
    Word,
    /// Part-of-speech tag counts
    Pos,
    /// Compound sentiment scores
    Sentiment,
}

impl FeatureFamily {
    pub const ALL: [FeatureFamily; 4] =
        [FeatureFamily::Character, FeatureFamily::Word, FeatureFamily::Pos, FeatureFamily::Sentiment];

    pub fn name(self) -> &'static str {
        match self {
            FeatureFamily::Character => "character",
            FeatureFamily::Word => "word",
            FeatureFamily::Pos => "pos",
            FeatureFamily::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for FeatureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" | "characters" | "chars" => Ok(Self::Character),
            "word" | "words" => Ok(Self::Word),
            "pos" | "tags" => Ok(Self::Pos),
            "sentiment" => Ok(Self::Sentiment),
            _ => Err(format!("Invalid feature family: {}. Valid options: character, word, pos, sentiment", s)),
        }
    }
}

/// Logical text fields of a record, in feature-name order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PostTitle,
    PostImage,
    ArticleKeywords,
    ArticleDescription,
    ArticleTitle,
    ArticleParagraphs,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::PostTitle,
        Field::PostImage,
        Field::ArticleKeywords,
        Field::ArticleDescription,
        Field::ArticleTitle,
        Field::ArticleParagraphs,
    ];

    /// Name used inside feature keys
    pub fn key(self) -> &'static str {
        match self {
            Field::PostTitle => "post_title",
            Field::PostImage => "post_image",
            Field::ArticleKeywords => "article_kw",
            Field::ArticleDescription => "article_desc",
            Field::ArticleTitle => "article_title",
            Field::ArticleParagraphs => "article_par",
        }
    }
}

/// One value per [`Field`]
#[derive(Debug, Clone)]
pub struct PerField<T>([T; 6]);

impl<T> PerField<T> {
    pub fn from_fn<F: FnMut(Field) -> T>(f: F) -> Self {
        PerField(Field::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &T)> {
        Field::ALL.into_iter().zip(self.0.iter())
    }

    /// Every unordered pair of distinct fields, first field first
    pub fn pairs(&self) -> impl Iterator<Item = ((Field, &T), (Field, &T))> {
        (0..Field::ALL.len()).flat_map(move |i| {
            ((i + 1)..Field::ALL.len()).map(move |j| ((Field::ALL[i], &self.0[i]), (Field::ALL[j], &self.0[j])))
        })
    }
}

impl<T> Index<Field> for PerField<T> {
    type Output = T;

    fn index(&self, field: Field) -> &T {
        &self.0[field as usize]
    }
}

/// A named group of POS tags counted together
#[derive(Debug, Clone, PartialEq)]
pub struct PosCategory {
    pub name: String,
    pub tags: HashSet<String>,
}

impl PosCategory {
    pub fn new(name: &str, tags: &[&str]) -> Self {
        Self { name: name.to_string(), tags: tags.iter().map(|t| t.to_string()).collect() }
    }

    /// Nouns, proper nouns, verbs, adjectives, adverbs, pronouns,
    /// determiners, wh-words and cardinals
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("NN", &["NN", "NNS"]),
            Self::new("NNP", &["NNP", "NNPS"]),
            Self::new("VB", &["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"]),
            Self::new("JJ", &["JJ", "JJR", "JJS"]),
            Self::new("RB", &["RB", "RBR", "RBS"]),
            Self::new("PRP", &["PRP", "PRP$"]),
            Self::new("DT", &["DT"]),
            Self::new("WH", &["WDT", "WP", "WP$", "WRB"]),
            Self::new("CD", &["CD"]),
        ]
    }
}

/// One named feature value
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub family: FeatureFamily,
    pub value: f64,
}

/// Ordered feature name to value mapping for one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    features: Vec<Feature>,
}

impl FeatureVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.iter().find(|f| f.name == name).map(|f| f.value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn values(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.value).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Names of the features written by one family
    pub fn family_names(&self, family: FeatureFamily) -> Vec<&str> {
        self.features.iter().filter(|f| f.family == family).map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub(crate) fn push(&mut self, name: String, family: FeatureFamily, value: f64) {
        self.features.push(Feature { name, family, value });
    }

    /// Whether this vector holds exactly `names`, in that order
    pub fn has_names(&self, names: &[String]) -> bool {
        self.features.len() == names.len() && self.features.iter().zip(names).all(|(f, n)| &f.name == n)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.features.len()))?;
        for feature in &self.features {
            map.serialize_entry(&feature.name, &feature.value)?;
        }
        map.end()
    }
}

/// Accumulates features for the family currently being written
struct FeatureWriter {
    vector: FeatureVector,
    family: FeatureFamily,
}

impl FeatureWriter {
    fn new() -> Self {
        Self { vector: FeatureVector::default(), family: FeatureFamily::Character }
    }

    fn push(&mut self, name: String, value: f64) {
        self.vector.push(name, self.family, value);
    }

    fn per_field<T>(&mut self, metric: &str, values: &PerField<T>, flatten: impl Fn(&T) -> f64) {
        for (field, v) in values.iter() {
            self.push(format!("{}_{}", metric, field.key()), flatten(v));
        }
    }

    fn combine<T>(&mut self, metric: &str, values: &PerField<T>, op: impl Fn(&T, &T) -> f64) {
        for ((a, va), (b, vb)) in values.pairs() {
            self.push(format!("{}_{}_{}", metric, a.key(), b.key()), op(va, vb));
        }
    }

    fn measures(&mut self, metric: &str, values: &PerField<Measure>) {
        self.per_field(metric, values, |m| value(*m));
    }

    fn ratio_and_diff(&mut self, suffix: &str, values: &PerField<Measure>) {
        self.combine(&format!("ratio{}", suffix), values, |a, b| value(ratio(*a, *b)));
        self.combine(&format!("diff{}", suffix), values, |a, b| value(diff(*a, *b)));
    }
}

/// Configuration for feature extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Families to compute (default: all)
    pub families: BTreeSet<FeatureFamily>,
    /// Annotation switches
    pub annotate: AnnotateConfig,
    /// Tag categories counted by the POS family
    pub pos_categories: Vec<PosCategory>,
    /// Worker threads for batch extraction (default: rayon's global pool)
    pub threads: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            families: FeatureFamily::ALL.into_iter().collect(),
            annotate: AnnotateConfig::default(),
            pos_categories: PosCategory::defaults(),
            threads: None,
        }
    }
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hamus_core::{ExtractorConfig, FeatureFamily};
    ///
    /// let config = ExtractorConfig::builder()
    ///     .disable(FeatureFamily::Sentiment)
    ///     .remove_stopwords(true)
    ///     .build();
    /// assert!(!config.families.contains(&FeatureFamily::Sentiment));
    /// ```
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    pub fn is_enabled(&self, family: FeatureFamily) -> bool {
        self.families.contains(&family)
    }
}

/// Builder for ExtractorConfig.
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets exactly which families are computed.
    pub fn families<I: IntoIterator<Item = FeatureFamily>>(mut self, families: I) -> Self {
        self.config.families = families.into_iter().collect();
        self
    }

    /// Enables one family.
    pub fn enable(mut self, family: FeatureFamily) -> Self {
        self.config.families.insert(family);
        self
    }

    /// Disables one family.
    pub fn disable(mut self, family: FeatureFamily) -> Self {
        self.config.families.remove(&family);
        self
    }

    /// Sets whether cardinal numbers count as words.
    pub fn keep_digits(mut self, value: bool) -> Self {
        self.config.annotate.keep_digits = value;
        self
    }

    /// Sets whether stopwords are dropped from word and tag counts.
    pub fn remove_stopwords(mut self, value: bool) -> Self {
        self.config.annotate.remove_stopwords = value;
        self
    }

    /// Sets the tag categories of the POS family.
    pub fn pos_categories(mut self, categories: Vec<PosCategory>) -> Self {
        self.config.pos_categories = categories;
        self
    }

    /// Sets the number of worker threads.
    pub fn threads(mut self, value: usize) -> Self {
        self.config.threads = Some(value);
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns records into feature vectors.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use hamus_core::{FeatureExtractor, ImageText, LinguisticResources, Record, TextField};
///
/// let extractor = FeatureExtractor::new(Arc::new(LinguisticResources::builtin()), ImageText::disabled());
/// let record = Record { post_text: Some(TextField::from(vec!["Is this clickbait?"])), ..Default::default() };
///
/// let features = extractor.extract_record(&record);
/// assert_eq!(features.get("numQuestionMarks_post_title"), Some(1.0));
/// ```
pub struct FeatureExtractor {
    config: ExtractorConfig,
    model: Arc<dyn LanguageModel>,
    images: ImageText,
    dataset: Option<Dataset>,
}

impl FeatureExtractor {
    /// Creates an extractor with the default configuration.
    pub fn new(model: Arc<dyn LanguageModel>, images: ImageText) -> Self {
        Self::with_config(ExtractorConfig::default(), model, images)
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig, model: Arc<dyn LanguageModel>, images: ImageText) -> Self {
        Self { config, model, images, dataset: None }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Attach the dataset to extract from, checking its schema.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<()> {
        dataset.validate()?;
        self.dataset = Some(dataset);
        Ok(())
    }

    /// Extract the features and labels of the attached dataset.
    pub fn extract_features(&self) -> Result<FeatureTable> {
        let dataset = self.dataset.as_ref().ok_or(HamusError::NoDataset)?;
        extract_batch(self, dataset)
    }

    /// Validate a dataset and extract its features and labels.
    pub fn extract_dataset(&self, dataset: &Dataset) -> Result<FeatureTable> {
        dataset.validate()?;
        extract_batch(self, dataset)
    }

    /// Derive and combine the features of one record.
    pub fn extract_record(&self, record: &Record) -> FeatureVector {
        let mut writer = FeatureWriter::new();
        if self.config.families.is_empty() {
            return writer.vector;
        }

        let post_title = record.post_title().map(TextField::from);
        let post_image = TextField::Single(self.images.text_for(record.post_media.as_ref()));
        let fields = PerField::from_fn(|field| match field {
            Field::PostTitle => post_title.as_ref(),
            Field::PostImage => Some(&post_image),
            Field::ArticleKeywords => record.target_keywords.as_ref(),
            Field::ArticleDescription => record.target_description.as_ref(),
            Field::ArticleTitle => record.target_title.as_ref(),
            Field::ArticleParagraphs => record.target_paragraphs.as_ref(),
        });

        let tools = WordTools::new(self.model.as_ref(), self.config.annotate);

        if self.config.is_enabled(FeatureFamily::Character) {
            writer.family = FeatureFamily::Character;
            character_features(&mut writer, &fields, record.post_title());
        }

        if self.config.is_enabled(FeatureFamily::Word) || self.config.is_enabled(FeatureFamily::Pos) {
            let processed = PerField::from_fn(|field| tools.process_field(fields[field]));

            if self.config.is_enabled(FeatureFamily::Word) {
                writer.family = FeatureFamily::Word;
                word_features(&mut writer, &processed);
            }

            if self.config.is_enabled(FeatureFamily::Pos) {
                writer.family = FeatureFamily::Pos;
                pos_features(&mut writer, &processed, &self.config.pos_categories);
            }
        }

        if self.config.is_enabled(FeatureFamily::Sentiment) {
            writer.family = FeatureFamily::Sentiment;
            let sentiment = PerField::from_fn(|field| tools.sentiment(fields[field]));
            writer.measures("sentiment", &sentiment);
        }

        writer.vector
    }
}

fn character_features(writer: &mut FeatureWriter, fields: &PerField<Option<&TextField>>, raw_title: Option<&str>) {
    let chars = PerField::from_fn(|field| count(fields[field]));
    let question_marks = PerField::from_fn(|field| count_occurrences(fields[field], "?"));

    writer.measures("numChars", &chars);
    writer.per_field("numQuestionMarks", &question_marks, |n| *n);
    writer.push(
        format!("isRetweet_{}", Field::PostTitle.key()),
        if raw_title.is_some_and(is_retweet) { 1.0 } else { 0.0 },
    );
    writer.ratio_and_diff("Chars", &chars);
}

fn word_features(writer: &mut FeatureWriter, processed: &PerField<ProcessedText>) {
    let words = PerField::from_fn(|field| processed[field].count_words());
    let formal_words = PerField::from_fn(|field| processed[field].count_formal_words());
    let stopwords = PerField::from_fn(|field| processed[field].count_stopwords());
    let uppercase = PerField::from_fn(|field| processed[field].count_uppercase());
    let titlecase = PerField::from_fn(|field| processed[field].count_titlecase());

    writer.measures("numWords", &words);
    writer.measures("numFormalWords", &formal_words);
    writer.measures("numStopWords", &stopwords);
    writer.measures("numUppercaseWords", &uppercase);
    writer.measures("numTitlecaseWords", &titlecase);

    writer.ratio_and_diff("Words", &words);
    writer.ratio_and_diff("FormalWords", &formal_words);
    writer.ratio_and_diff("StopWords", &stopwords);

    let word_sets = PerField::from_fn(|field| processed[field].word_set());
    writer.combine("simWords", &word_sets, similarity);

    let bigram_sets = PerField::from_fn(|field| processed[field].bigram_set());
    writer.combine("simBigrams", &bigram_sets, similarity);
}

fn pos_features(writer: &mut FeatureWriter, processed: &PerField<ProcessedText>, categories: &[PosCategory]) {
    for category in categories {
        let tags = PerField::from_fn(|field| processed[field].count_tags(&category.tags));

        writer.measures(&format!("numTags_{}", category.name), &tags);
        writer.combine(&format!("ratioTags_{}", category.name), &tags, |a, b| ratio_raw(*a, *b));
        writer.combine(&format!("diffTags_{}", category.name), &tags, |a, b| diff_raw(*a, *b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::LinguisticResources;

    fn extractor(config: ExtractorConfig) -> FeatureExtractor {
        FeatureExtractor::with_config(config, Arc::new(LinguisticResources::builtin()), ImageText::disabled())
    }

    fn sample() -> Record {
        Record {
            id: Some("1".to_string()),
            post_text: Some(TextField::from(vec!["Is this clickbait?"])),
            post_media: Some(TextField::Multi(vec![])),
            target_title: Some(TextField::from("Clickbait Detector Explained")),
            target_description: Some(TextField::from("")),
            target_keywords: Some(TextField::from("")),
            target_paragraphs: Some(TextField::from(vec!["para one", "para two"])),
            truth_class: Some("clickbait".to_string()),
        }
    }

    #[test]
    fn test_pairs_are_combinations_in_field_order() {
        let values = PerField::from_fn(|field| field.key());
        let pairs: Vec<(&str, &str)> = values.pairs().map(|((_, a), (_, b))| (*a, *b)).collect();

        assert_eq!(pairs.len(), 15);
        assert_eq!(pairs[0], ("post_title", "post_image"));
        assert_eq!(pairs[14], ("article_title", "article_par"));
        assert!(!pairs.contains(&("post_image", "post_title")));
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("Chars".parse::<FeatureFamily>(), Ok(FeatureFamily::Character));
        assert_eq!("tags".parse::<FeatureFamily>(), Ok(FeatureFamily::Pos));
        assert!("colors".parse::<FeatureFamily>().is_err());
    }

    #[test]
    fn test_sample_record_character_features() {
        let features = extractor(ExtractorConfig::default()).extract_record(&sample());

        assert_eq!(features.get("numChars_post_title"), Some(16.0));
        assert_eq!(features.get("numQuestionMarks_post_title"), Some(1.0));
        assert_eq!(features.get("numChars_post_image"), Some(-1.0));
        assert_eq!(features.get("numChars_article_desc"), Some(-1.0));
        assert_eq!(features.get("numChars_article_par"), Some(7.0));
        assert_eq!(features.get("isRetweet_post_title"), Some(0.0));
        assert_eq!(features.get("ratioChars_post_title_article_par"), Some(16.0 / 7.0));
        assert_eq!(features.get("diffChars_post_title_article_par"), Some(9.0));
        assert_eq!(features.get("ratioChars_post_title_post_image"), Some(-1.0));
    }

    #[test]
    fn test_sample_record_word_features() {
        let features = extractor(ExtractorConfig::default()).extract_record(&sample());

        assert_eq!(features.get("numWords_post_title"), Some(3.0));
        assert_eq!(features.get("numWords_article_par"), Some(2.0));
        assert_eq!(features.get("numStopWords_post_title"), Some(2.0));
        assert_eq!(features.get("numTitlecaseWords_article_title"), Some(3.0));
        assert_eq!(features.get("numUppercaseWords_article_title"), Some(0.0));
        assert_eq!(features.get("numWords_post_image"), Some(-1.0));
        assert_eq!(features.get("simWords_post_title_article_title"), Some(1.0 / 5.0));
        assert_eq!(features.get("simWords_post_title_post_image"), Some(0.0));
    }

    #[test]
    fn test_tag_combinations_use_raw_variant() {
        let features = extractor(ExtractorConfig::default()).extract_record(&sample());

        assert_eq!(features.get("numTags_NNP_article_title"), Some(2.0));
        assert_eq!(features.get("numTags_NNP_post_image"), Some(-1.0));
        assert_eq!(features.get("ratioTags_NNP_post_title_article_title"), Some(0.0));
        assert_eq!(features.get("diffTags_NNP_post_image_article_title"), Some(0.0));
    }

    #[test]
    fn test_blank_post_text_is_undefined_everywhere() {
        let record = Record { post_text: Some(TextField::from(vec!["   "])), ..sample() };
        let features = extractor(ExtractorConfig::default()).extract_record(&record);

        assert_eq!(features.get("numWords_post_title"), Some(-1.0));
        assert_eq!(features.get("sentiment_post_title"), Some(-1.0));
    }

    #[test]
    fn test_retweet_flag() {
        let record = Record { post_text: Some(TextField::from(vec!["RT @user: big news"])), ..sample() };
        let features = extractor(ExtractorConfig::default()).extract_record(&record);
        assert_eq!(features.get("isRetweet_post_title"), Some(1.0));
    }

    #[test]
    fn test_disabling_family_removes_only_its_keys() {
        let all = extractor(ExtractorConfig::default()).extract_record(&sample());
        let config = ExtractorConfig::builder().disable(FeatureFamily::Sentiment).build();
        let without = extractor(config).extract_record(&sample());

        let removed: BTreeSet<&str> = all.names().filter(|n| without.get(n).is_none()).collect();
        let sentiment: BTreeSet<&str> = all.family_names(FeatureFamily::Sentiment).into_iter().collect();
        assert_eq!(removed, sentiment);
        assert_eq!(sentiment.len(), 6);
        assert_eq!(without.len(), all.len() - 6);
    }

    #[test]
    fn test_no_families_yields_empty_vector() {
        let config = ExtractorConfig::builder().families([]).build();
        assert!(extractor(config).extract_record(&sample()).is_empty());
    }

    #[test]
    fn test_feature_count_per_family() {
        let features = extractor(ExtractorConfig::default()).extract_record(&sample());

        assert_eq!(features.family_names(FeatureFamily::Character).len(), 6 + 6 + 1 + 15 + 15);
        assert_eq!(features.family_names(FeatureFamily::Word).len(), 5 * 6 + 3 * 30 + 2 * 15);
        assert_eq!(features.family_names(FeatureFamily::Pos).len(), 9 * (6 + 30));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let config = ExtractorConfig::builder().families([FeatureFamily::Sentiment]).build();
        let features = extractor(config).extract_record(&sample());
        let json = serde_json::to_string(&features).unwrap();
        assert!(json.starts_with("{\"sentiment_post_title\":"));
    }
}
