pub mod annotate;
pub mod batch;
pub mod dataset;
pub mod error;
pub mod features;
pub mod field;
pub mod formatters;
pub mod lemma;
pub mod normalize;
pub mod numeric;
pub mod ocr;
pub mod resources;
pub mod sentiment;
pub mod tagger;

pub use annotate::{AnnotateConfig, Annotation, ProcessedText, WordTools, casing_counts, ngrams, similarity};
pub use batch::FeatureTable;
pub use dataset::{Dataset, Labels, REQUIRED_COLUMNS, Record, TRUTH_COLUMN};
pub use error::{HamusError, Result};
pub use features::{
    ExtractorConfig, ExtractorConfigBuilder, Feature, FeatureExtractor, FeatureFamily, FeatureVector, Field, PerField,
    PosCategory,
};
pub use field::TextField;
pub use formatters::{CsvConfig, JsonConfig, OutputFormat, convert_to_json, to_csv_string, write_csv};
pub use lemma::{Lemmatizer, WordCategory};
pub use normalize::{NormalizeConfig, normalize_text, preprocess, word_tokenize};
pub use numeric::{Measure, SENTINEL, count, count_occurrences, diff, diff_raw, ratio, ratio_raw, value};
#[cfg(feature = "ocr")]
pub use ocr::Tesseract;
pub use ocr::{ImageText, NoRecognizer, OcrConfig, TextRecognizer};
pub use resources::{Dictionary, LanguageModel, LinguisticResources, ResourceConfig};
pub use sentiment::SentimentLexicon;
pub use tagger::{RuleTagger, TaggedWord};
