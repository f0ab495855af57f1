//! Lexicon-based compound sentiment scoring.
//!
//! Scores follow the VADER conventions: every lexicon word carries a valence
//! in roughly `[-4, 4]`, negations flip and dampen a valence, intensifiers
//! push it away from zero, exclamation marks amplify the total, and the sum
//! is normalized into `[-1, 1]`.

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::{HamusError, Result};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w']+").expect("valid word regex"));

/// Normalization constant of the compound score
const ALPHA: f64 = 15.0;
/// Scale applied to a valence preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;
/// Valence added by a preceding intensifier
const BOOSTER_INCREMENT: f64 = 0.293;
/// Emphasis added per exclamation mark (at most four count)
const EXCLAMATION_INCREMENT: f64 = 0.292;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "nor", "cannot", "without", "neither", "nowhere",
];

const BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "so", "totally", "absolutely", "incredibly", "completely", "most", "super",
];

/// Built-in valences for headline vocabulary
const BUILTIN_LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8), ("awesome", 3.1), ("beautiful", 2.9), ("best", 3.2), ("brilliant", 2.8),
    ("cute", 2.0), ("excellent", 2.7), ("exciting", 2.2), ("fantastic", 2.6), ("favorite", 2.0),
    ("free", 1.9), ("fun", 2.3), ("glad", 2.0), ("good", 1.9), ("great", 3.1), ("happy", 2.7),
    ("hero", 2.6), ("hilarious", 1.7), ("hope", 1.9), ("incredible", 1.7), ("inspiring", 2.2),
    ("joy", 2.8), ("like", 1.5), ("love", 3.2), ("lucky", 1.9), ("nice", 1.8), ("perfect", 2.7),
    ("smile", 1.5), ("success", 2.7), ("sweet", 2.0), ("thanks", 1.9), ("win", 2.8), ("winner", 2.8),
    ("wonderful", 2.7), ("wow", 2.8), ("yes", 1.7), ("abuse", -3.2), ("afraid", -2.2), ("angry", -2.3),
    ("attack", -2.1), ("awful", -2.0), ("bad", -2.5), ("crash", -1.7), ("crisis", -3.1),
    ("cry", -2.1), ("dead", -3.3), ("death", -2.9), ("destroy", -2.7), ("disaster", -3.1),
    ("fail", -2.5), ("fake", -2.1), ("fear", -2.2), ("horrible", -2.5), ("hate", -2.7),
    ("hurt", -2.4), ("kill", -3.7), ("killed", -3.5), ("lie", -1.6), ("lose", -1.7), ("loss", -1.3),
    ("murder", -3.7), ("pain", -2.3), ("sad", -2.1), ("scary", -2.2), ("shocking", -1.3),
    ("sick", -2.3), ("terrible", -2.1), ("terror", -3.0), ("threat", -2.4), ("ugly", -2.3),
    ("war", -2.9), ("worst", -3.1), ("wrong", -2.1),
];

/// Word valences used by the sentiment scorer
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    valence: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// The built-in headline lexicon
    pub fn builtin() -> Self {
        Self { valence: BUILTIN_LEXICON.iter().map(|(w, v)| (w.to_string(), *v)).collect() }
    }

    /// Parse a lexicon in the VADER layout (`word<TAB>mean[<TAB>...]`)
    pub fn parse(content: &str) -> Result<Self> {
        let mut valence = HashMap::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut columns = line.split('\t');
            let word = columns.next().unwrap_or_default();
            let score = columns
                .next()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .ok_or_else(|| HamusError::ResourceError(format!("lexicon line {}: missing valence", i + 1)))?;

            valence.insert(word.to_lowercase(), score);
        }

        Ok(Self { valence })
    }

    /// Load a lexicon file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HamusError::FileNotFound(path.to_path_buf()));
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.valence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valence.get(word).copied()
    }

    /// Compound score of a text in `[-1, 1]`, `0` when nothing scores
    pub fn compound(&self, text: &str) -> f64 {
        let words: Vec<String> = WORD.find_iter(text).map(|m| m.as_str().to_lowercase()).collect();
        let mut sum = 0.0;

        for (i, word) in words.iter().enumerate() {
            let Some(mut valence) = self.valence(word) else {
                continue;
            };

            let window = &words[i.saturating_sub(3)..i];
            if let Some(previous) = window.last()
                && BOOSTERS.contains(&previous.as_str())
            {
                valence += BOOSTER_INCREMENT * valence.signum();
            }
            if window.iter().any(|w| is_negation(w)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(4) as f64;
            sum += EXCLAMATION_INCREMENT * exclamations * sum.signum();
        }

        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}
