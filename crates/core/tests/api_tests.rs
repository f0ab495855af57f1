//! Library API integration tests
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hamus_core::*;

fn get_fixture_path(name: &str) -> PathBuf {
    Path::new("../../tests/fixtures").join(name)
}

fn load_fixture_dataset() -> Dataset {
    Dataset::from_files(&get_fixture_path("instances.jsonl"), Some(&get_fixture_path("truth.jsonl")))
        .expect("fixture dataset should load")
}

fn builtin_extractor(config: ExtractorConfig) -> FeatureExtractor {
    FeatureExtractor::with_config(config, Arc::new(LinguisticResources::builtin()), ImageText::disabled())
}

#[test]
fn test_end_to_end_sample_record() {
    let mut extractor = builtin_extractor(ExtractorConfig::default());
    extractor.set_dataset(load_fixture_dataset()).unwrap();
    let table = extractor.extract_features().unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.ids()[0].as_deref(), Some("1"));
    assert_eq!(table.get(0, "numChars_post_title"), Some(16.0));
    assert_eq!(table.get(0, "numQuestionMarks_post_title"), Some(1.0));
    assert_eq!(table.get(0, "numChars_post_image"), Some(SENTINEL));

    let labels = table.labels().expect("truth file was joined");
    assert_eq!(labels.classes, vec!["clickbait", "no-clickbait"]);
    assert_eq!(labels.values, vec![0, 0, 1, 1]);
}

#[test]
fn test_numeric_ids_and_retweets() {
    let table = builtin_extractor(ExtractorConfig::default()).extract_dataset(&load_fixture_dataset()).unwrap();

    assert_eq!(table.ids()[3].as_deref(), Some("4"));
    assert_eq!(table.column("isRetweet_post_title"), Some(vec![0.0, 0.0, 0.0, 1.0]));
}

#[test]
fn test_every_row_shares_the_key_set() {
    let dataset = load_fixture_dataset();
    let extractor = builtin_extractor(ExtractorConfig::default());

    let first: Vec<String> = extractor.extract_record(&dataset.records()[0]).names().map(String::from).collect();
    for record in dataset.records() {
        assert!(extractor.extract_record(record).has_names(&first));
    }
}

#[test]
fn test_every_value_is_finite_and_flattened() {
    let table = builtin_extractor(ExtractorConfig::default()).extract_dataset(&load_fixture_dataset()).unwrap();

    for row in table.rows() {
        assert!(row.iter().all(|v| v.is_finite()));
    }
    for name in table.columns() {
        if name.starts_with("ratio") && !name.starts_with("ratioTags") {
            let column = table.column(name).unwrap();
            assert!(column.iter().all(|v| *v == SENTINEL || *v > 0.0), "{} holds a zero ratio", name);
        }
    }
}

#[test]
fn test_disabling_a_family_removes_exactly_its_keys() {
    let dataset = load_fixture_dataset();
    let full = builtin_extractor(ExtractorConfig::default()).extract_dataset(&dataset).unwrap();

    for family in FeatureFamily::ALL {
        let config = ExtractorConfig::builder().disable(family).build();
        let partial = builtin_extractor(config).extract_dataset(&dataset).unwrap();

        let full_names: BTreeSet<&String> = full.columns().iter().collect();
        let partial_names: BTreeSet<&String> = partial.columns().iter().collect();
        let removed: BTreeSet<&String> = full_names.difference(&partial_names).copied().collect();

        assert!(partial_names.is_subset(&full_names));
        let family_names: BTreeSet<String> = builtin_extractor(ExtractorConfig::default())
            .extract_record(&dataset.records()[0])
            .family_names(family)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(removed.into_iter().cloned().collect::<BTreeSet<String>>(), family_names, "{}", family);
    }
}

#[test]
fn test_missing_columns_rejected_before_extraction() {
    let dataset = Dataset::from_files(&get_fixture_path("invalid/instances.jsonl"), None).unwrap();
    let extractor = builtin_extractor(ExtractorConfig::default());

    match extractor.extract_dataset(&dataset) {
        Err(HamusError::MissingColumns { missing }) => assert_eq!(missing, vec!["postMedia"]),
        other => panic!("unexpected {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_three_classes_rejected() {
    let dataset =
        Dataset::from_files(&get_fixture_path("instances.jsonl"), Some(&get_fixture_path("truth_three_classes.jsonl")))
            .unwrap();
    let result = builtin_extractor(ExtractorConfig::default()).extract_dataset(&dataset);
    assert!(matches!(result, Err(HamusError::TooManyClasses { .. })));
}

#[test]
fn test_dictionary_controls_formal_words() {
    let dataset = load_fixture_dataset();
    let config = ResourceConfig {
        dictionary: Some(get_fixture_path("wordnet")),
        lexicon: Some(get_fixture_path("lexicon.txt")),
        stopwords: Some(get_fixture_path("stopwords.txt")),
        search_dir: None,
    };
    let resources = LinguisticResources::load(&config).unwrap();
    assert!(resources.is_stopword("RT"));

    let with_dictionary =
        FeatureExtractor::with_config(ExtractorConfig::default(), Arc::new(resources), ImageText::disabled());
    let features = with_dictionary.extract_record(&dataset.records()[0]);
    assert_eq!(features.get("numFormalWords_article_title"), Some(1.0));
    assert_eq!(features.get("numFormalWords_article_par"), Some(1.0));

    let builtin = builtin_extractor(ExtractorConfig::default()).extract_record(&dataset.records()[0]);
    assert_eq!(builtin.get("numFormalWords_article_title"), Some(3.0));
}

#[test]
fn test_stopword_removal_and_digits() {
    let dataset = load_fixture_dataset();
    let record = &dataset.records()[1];

    let default = builtin_extractor(ExtractorConfig::default()).extract_record(record);
    let config = ExtractorConfig::builder().remove_stopwords(true).keep_digits(false).build();
    let filtered = builtin_extractor(config).extract_record(record);

    let before = default.get("numWords_post_title").unwrap();
    let after = filtered.get("numWords_post_title").unwrap();
    assert!(after < before);
    assert_eq!(filtered.get("numTags_CD_post_title"), Some(0.0));
    assert_eq!(default.get("numStopWords_post_title"), filtered.get("numStopWords_post_title"));
}

#[test]
fn test_table_output_formats() {
    let table = builtin_extractor(ExtractorConfig::default()).extract_dataset(&load_fixture_dataset()).unwrap();

    let csv = OutputFormat::Csv.render(&table).unwrap();
    let header = csv.lines().next().unwrap();
    assert!(header.starts_with("id,numChars_post_title,"));
    assert!(header.ends_with(",label"));
    assert_eq!(csv.lines().count(), 5);

    let json: serde_json::Value = serde_json::from_str(&OutputFormat::Json.render(&table).unwrap()).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);
    assert_eq!(json["labels"], serde_json::json!([0, 0, 1, 1]));
}

struct FixedRecognizer;

impl TextRecognizer for FixedRecognizer {
    fn recognize(&self, _image: &Path) -> Result<String> {
        Ok("SHOCKING! Is this real?".to_string())
    }
}

#[test]
fn test_post_image_goes_through_recognizer() {
    let images = ImageText::new(get_fixture_path(""), Arc::new(FixedRecognizer));
    let extractor =
        FeatureExtractor::with_config(ExtractorConfig::default(), Arc::new(LinguisticResources::builtin()), images);
    let dataset = load_fixture_dataset();

    let with_media = extractor.extract_record(&dataset.records()[1]);
    assert_eq!(with_media.get("numQuestionMarks_post_image"), Some(1.0));
    assert_eq!(with_media.get("numChars_post_image"), Some(20.0));
    assert!(with_media.get("sentiment_post_image").unwrap() < 0.0);

    let without_media = extractor.extract_record(&dataset.records()[0]);
    assert_eq!(without_media.get("numChars_post_image"), Some(SENTINEL));
}
