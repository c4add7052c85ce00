//! OCR seam: recognized text lines and engine adapters.
//!
//! Text recognition itself is delegated to an external engine. This module
//! defines what an engine hands back and prepares images before they are
//! recognized.

mod preprocessing;
#[cfg(feature = "native")]
mod pure_engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence reported by the engine (0.0 - 1.0).
    pub confidence: f32,

    /// Axis-aligned bounding box (x1, y1, x2, y2), if the engine reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
}

impl TextLine {
    /// Create a line without position information.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox: None,
        }
    }

    /// Attach a bounding box.
    pub fn with_bbox(mut self, bbox: [f32; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized lines.
    pub lines: Vec<TextLine>,

    /// Full text (lines joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            image_size: (width, height),
            ..Self::default()
        }
    }

    /// Build a result from lines already in reading order.
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        let mut result = Self {
            lines,
            ..Self::default()
        };
        result.rebuild_text();
        result
    }

    /// Build a result from plain text, one line per text line.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines().map(|l| TextLine::new(l, 1.0)).collect())
    }

    /// Whether any non-whitespace text was recognized.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Sort lines by reading order (top-to-bottom, left-to-right).
    ///
    /// Lines whose top edges fall in the same 20 px band share a row.
    /// Lines without a bounding box keep their relative order at the end.
    pub fn sort_by_reading_order(&mut self) {
        self.lines.sort_by(|a, b| match (a.bbox, b.bbox) {
            (Some(a), Some(b)) => {
                let row_a = (a[1] / 20.0) as i32;
                let row_b = (b[1] / 20.0) as i32;
                if row_a != row_b {
                    row_a.cmp(&row_b)
                } else {
                    a[0].total_cmp(&b[0])
                }
            }
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        self.rebuild_text();
    }

    fn rebuild_text(&mut self) {
        self.text = self
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// Trait for text recognition engines.
pub trait OcrEngine {
    /// Engine name, for logs.
    fn name(&self) -> &str;

    /// Recognize the text on an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_lines_joins_text() {
        let result = OcrResult::from_lines(vec![
            TextLine::new("Jane Doe", 0.95),
            TextLine::new("CEO", 0.9),
        ]);
        assert_eq!(result.text, "Jane Doe\nCEO");
        assert!(result.has_text());
    }

    #[test]
    fn test_empty_has_no_text() {
        let result = OcrResult::empty(640, 480);
        assert!(!result.has_text());
        assert_eq!(result.image_size, (640, 480));
    }

    #[test]
    fn test_sort_by_reading_order() {
        let mut result = OcrResult::from_lines(vec![
            TextLine::new("www.acme.com", 0.9).with_bbox([10.0, 300.0, 200.0, 320.0]),
            TextLine::new("CEO", 0.9).with_bbox([180.0, 52.0, 240.0, 70.0]),
            TextLine::new("Jane Doe", 0.9).with_bbox([10.0, 10.0, 120.0, 30.0]),
            TextLine::new("Acme", 0.9).with_bbox([10.0, 45.0, 80.0, 65.0]),
        ]);
        result.sort_by_reading_order();

        assert_eq!(result.text, "Jane Doe\nAcme\nCEO\nwww.acme.com");
    }

    #[test]
    fn test_sort_tolerates_nan_coordinates() {
        let mut result = OcrResult::from_lines(vec![
            TextLine::new("CEO", 0.9).with_bbox([f32::NAN, 12.0, 60.0, 30.0]),
            TextLine::new("Acme", 0.9).with_bbox([10.0, 50.0, 80.0, 65.0]),
            TextLine::new("Jane Doe", 0.9).with_bbox([10.0, 10.0, 120.0, 30.0]),
            TextLine::new("x", 0.9).with_bbox([f32::NAN, 14.0, 20.0, 30.0]),
        ]);
        result.sort_by_reading_order();

        assert_eq!(result.lines[0].text, "Jane Doe");
        assert_eq!(result.lines[3].text, "Acme");
    }
}
