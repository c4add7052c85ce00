//! Configuration structures for the card pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the bizcard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BizcardConfig {
    /// OCR and preprocessing configuration.
    pub ocr: OcrConfig,

    /// Contact extraction configuration.
    pub extraction: ExtractionConfig,

    /// Upload session configuration.
    pub session: SessionConfig,

    /// Export configuration.
    pub export: ExportConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine and image preprocessing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run grayscale, contrast and sharpening before recognition.
    pub preprocess: bool,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,

    /// Contrast adjustment passed to the image crate (percent, 0 = unchanged).
    ///
    /// The crate scales by `((100 + contrast) / 100)^2`, so 22.47 is a 1.5x
    /// enhancement.
    pub contrast: f32,

    /// Unsharp mask sigma (0 disables sharpening).
    pub sharpen_sigma: f32,

    /// Unsharp mask threshold.
    pub sharpen_threshold: i32,

    /// Keep `[UNK]` tokens emitted by the recognizer.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            preprocess: true,
            max_image_size: 2048,
            contrast: 22.47,
            sharpen_sigma: 1.0,
            sharpen_threshold: 2,
            keep_unk: false,
        }
    }
}

/// Contact extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Only the first `name_window` lines may be taken as the name.
    pub name_window: usize,

    /// Minimum whitespace-separated tokens in a name line.
    pub name_min_tokens: usize,

    /// Maximum whitespace-separated tokens in a name line.
    pub name_max_tokens: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_window: 3,
            name_min_tokens: 2,
            name_max_tokens: 4,
        }
    }
}

/// Upload session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of cards accepted per session.
    pub max_upload_count: usize,

    /// Image extensions accepted for OCR (lowercase, without dot).
    pub supported_extensions: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_upload_count: 10,
            supported_extensions: ["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Tabular export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prepend a `#` column numbering the cards.
    pub include_index: bool,

    /// Append a `Source File` column.
    pub include_source: bool,

    /// File name used when no output path is given.
    pub default_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_index: false,
            include_source: false,
            default_filename: "business_cards_extracted.csv".to_string(),
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl BizcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }

    /// Whether an extension (without dot, any case) is an accepted image type.
    pub fn is_supported_image(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.session
            .supported_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&extension))
    }
}
