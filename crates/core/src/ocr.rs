//! Post image text through an OCR collaborator.
//!
//! [`ImageText`] turns a record's `postMedia` value into text. It never
//! fails: a missing image, an unreadable file and a recognizer error all
//! degrade to an empty string, and so does a record with more than one
//! media reference, which the pipeline does not support.

use std::path::{Path, PathBuf};
#[cfg(feature = "ocr")]
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use crate::Result;
#[cfg(feature = "ocr")]
use crate::HamusError;
use crate::field::TextField;

/// Text recognition collaborator
pub trait TextRecognizer: Send + Sync {
    /// Extract the text found in an image file
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Recognizer that finds no text, used when OCR is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl TextRecognizer for NoRecognizer {
    fn recognize(&self, _image: &Path) -> Result<String> {
        Ok(String::new())
    }
}

/// Recognizer running the `tesseract` command line tool
#[cfg(feature = "ocr")]
#[derive(Debug, Clone)]
pub struct Tesseract {
    /// Executable to run
    pub command: PathBuf,
    /// Optional language pack (`-l`)
    pub language: Option<String>,
}

#[cfg(feature = "ocr")]
impl Default for Tesseract {
    fn default() -> Self {
        Self { command: PathBuf::from("tesseract"), language: None }
    }
}

#[cfg(feature = "ocr")]
impl TextRecognizer for Tesseract {
    fn recognize(&self, image: &Path) -> Result<String> {
        if !image.exists() {
            return Err(HamusError::FileNotFound(image.to_path_buf()));
        }

        let mut command = Command::new(&self.command);
        command.arg(image).arg("stdout");
        if let Some(language) = &self.language {
            command.arg("-l").arg(language);
        }

        let output = command
            .output()
            .map_err(|e| HamusError::OcrError(format!("failed to run {}: {}", self.command.display(), e)))?;

        if !output.status.success() {
            return Err(HamusError::OcrError(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Configuration for post image text
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Directory media references are relative to
    pub data_root: PathBuf,
    /// Tesseract executable (default: `tesseract` on the PATH)
    pub tesseract: Option<PathBuf>,
    /// Whether to run OCR at all
    pub enabled: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self { data_root: PathBuf::from("."), tesseract: None, enabled: cfg!(feature = "ocr") }
    }
}

/// Adapter from media references to image text
#[derive(Clone)]
pub struct ImageText {
    data_root: PathBuf,
    recognizer: Arc<dyn TextRecognizer>,
}

impl ImageText {
    pub fn new(data_root: impl Into<PathBuf>, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self { data_root: data_root.into(), recognizer }
    }

    /// Build the adapter described by a configuration
    pub fn from_config(config: &OcrConfig) -> Self {
        if config.enabled {
            #[cfg(feature = "ocr")]
            {
                let mut tesseract = Tesseract::default();
                if let Some(command) = &config.tesseract {
                    tesseract.command = command.clone();
                }
                return Self::new(&config.data_root, Arc::new(tesseract));
            }
        }

        Self::new(&config.data_root, Arc::new(NoRecognizer))
    }

    /// Adapter that never runs OCR
    pub fn disabled() -> Self {
        Self::new(".", Arc::new(NoRecognizer))
    }

    /// Full path of a media reference
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.data_root.join(reference)
    }

    /// Text of the post image, empty when there is none or OCR fails
    pub fn text_for(&self, media: Option<&TextField>) -> String {
        let reference = match media {
            Some(TextField::Single(reference)) => reference.as_str(),
            Some(TextField::Multi(references)) if references.len() == 1 => references[0].as_str(),
            Some(TextField::Multi(references)) if references.len() > 1 => {
                debug!(count = references.len(), "Multiple media references, treating post as imageless");
                return String::new();
            }
            _ => return String::new(),
        };

        if reference.is_empty() {
            return String::new();
        }

        let path = self.resolve(reference);
        match self.recognizer.recognize(&path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "OCR failed, using empty image text");
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for ImageText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageText").field("data_root", &self.data_root).finish_non_exhaustive()
    }
}
