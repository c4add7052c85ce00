//! Pure Rust OCR engine adapter using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{OcrEngine, OcrResult, TextLine};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in `models`.
    pub fn from_models(models: &ModelConfig, config: &OcrConfig) -> Result<Self, OcrError> {
        Self::from_dir(
            &models.model_dir,
            &models.detection_model,
            &models.recognition_model,
            &models.dictionary,
            config,
        )
    }

    /// Create an engine from model files in a directory.
    pub fn from_dir(
        model_dir: &Path,
        detection_model: &str,
        recognition_model: &str,
        dictionary: &str,
        config: &OcrConfig,
    ) -> Result<Self, OcrError> {
        let det_path = model_dir.join(detection_model);
        let rec_path = model_dir.join(recognition_model);
        let dict_path = model_dir.join(dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }

    fn clean_text(&self, text: &str) -> String {
        if self.keep_unk {
            text.to_string()
        } else {
            text.replace("[UNK]", " ").trim().to_string()
        }
    }
}

impl OcrEngine for PureOcrEngine {
    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("{}x{}", width, height)));
        }

        debug!("Recognizing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let lines: Vec<TextLine> = results
            .iter()
            .map(|r| {
                TextLine::new(self.clean_text(&r.text), r.confidence)
                    .with_bbox(polygon_to_rect(&r.bounding_box))
            })
            .filter(|l| !l.text.is_empty())
            .collect();

        let mut result = OcrResult::from_lines(lines);
        result.sort_by_reading_order();
        result.image_size = (width, height);
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} lines in {}ms",
            result.lines.len(),
            result.processing_time_ms
        );

        Ok(result)
    }
}

/// Convert a `Polygon<f64>` to an axis-aligned `[x1, y1, x2, y2]` rectangle.
fn polygon_to_rect(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 4] {
    let mut rect = [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY];
    for coord in polygon.exterior().coords() {
        rect[0] = rect[0].min(coord.x as f32);
        rect[1] = rect[1].min(coord.y as f32);
        rect[2] = rect[2].max(coord.x as f32);
        rect[3] = rect[3].max(coord.y as f32);
    }
    if rect[0].is_finite() {
        rect
    } else {
        [0.0; 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let result = PureOcrEngine::from_dir(
            dir.path(),
            "det.onnx",
            "latin_rec.onnx",
            "latin_dict.txt",
            &OcrConfig::default(),
        );

        assert!(matches!(result, Err(OcrError::ModelLoad(_))));
    }
}
