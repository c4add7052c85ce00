//! WASM bindings for business card contact extraction.
//!
//! Text recognition runs in the browser; these bindings turn the recognized
//! text into contact fields and CSV.

use wasm_bindgen::prelude::*;

use bizcard_core::models::config::ExtractionConfig;
use bizcard_core::{ContactExtractor, CsvExporter, EntityExtractor, ExtractionResult, Field, OcrResult, TextLine};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(card: &ExtractionResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(card).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract contact fields from recognized card text.
#[wasm_bindgen]
pub fn extract_card_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&bizcard_core::extract_entities(text))
}

/// Whether a line reads like a company name.
#[wasm_bindgen]
pub fn is_company_name(text: &str) -> bool {
    bizcard_core::is_company_name(text)
}

/// Column labels in export order.
#[wasm_bindgen]
pub fn field_labels() -> js_sys::Array {
    Field::ALL
        .iter()
        .map(|f| JsValue::from_str(f.label()))
        .collect()
}

/// Render an array of cards as CSV.
#[wasm_bindgen]
pub fn export_csv(cards: JsValue, include_index: bool) -> Result<String, JsValue> {
    let cards: Vec<ExtractionResult> =
        serde_wasm_bindgen::from_value(cards).map_err(|e| JsValue::from_str(&e.to_string()))?;

    CsvExporter::new()
        .with_index(include_index)
        .to_string(&cards)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Card extractor class for browser use.
#[wasm_bindgen]
pub struct CardExtractor {
    extractor: EntityExtractor,
}

#[wasm_bindgen]
impl CardExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: EntityExtractor::new(),
        }
    }

    /// Set how many leading lines may hold the name.
    #[wasm_bindgen]
    pub fn set_name_window(&mut self, window: usize) {
        self.extractor = EntityExtractor::from_config(&ExtractionConfig {
            name_window: window,
            ..self.extractor.config().clone()
        });
    }

    /// Extract contact fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.extractor.extract_from_text(text))
    }

    /// Extract contact fields, recording the uploaded file name.
    #[wasm_bindgen]
    pub fn extract_named(&self, text: &str, file_name: &str) -> Result<JsValue, JsValue> {
        to_js(&self.extractor.extract_from_text(text).with_source(file_name))
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result assembled from browser-side recognition.
#[wasm_bindgen]
pub struct OcrResultJs {
    lines: Vec<TextLine>,
    text: String,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a recognized line without position.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, confidence: f32) {
        self.lines.push(TextLine::new(text, confidence));
    }

    /// Add a recognized line with its bounding box.
    #[wasm_bindgen]
    pub fn add_box(&mut self, text: &str, x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) {
        self.lines
            .push(TextLine::new(text, confidence).with_bbox([x1, y1, x2, y2]));
    }

    /// Set the full text, overriding the added lines.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text in reading order.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.to_ocr_result().text
    }

    /// Extract contact fields from this OCR result.
    #[wasm_bindgen]
    pub fn extract_card(&self) -> Result<JsValue, JsValue> {
        let ocr = self.to_ocr_result();
        if !ocr.has_text() {
            web_sys::console::warn_1(&JsValue::from_str("No text detected"));
        }
        to_js(&EntityExtractor::new().extract(&ocr))
    }
}

impl OcrResultJs {
    fn to_ocr_result(&self) -> OcrResult {
        if !self.text.is_empty() {
            return OcrResult::from_text(&self.text);
        }
        let mut result = OcrResult::from_lines(self.lines.clone());
        result.sort_by_reading_order();
        result
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn card(value: JsValue) -> ExtractionResult {
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_extract_card_from_text() {
        let result = card(extract_card_from_text("Jane Doe\nMarketing Director\nCreative Agency").unwrap());
        assert_eq!(result.name, "Jane Doe");
        assert_eq!(result.title, "Marketing Director");
        assert_eq!(result.company, "Creative Agency");
    }

    #[wasm_bindgen_test]
    fn test_is_company_name() {
        assert!(is_company_name("Acme Technologies Inc."));
        assert!(!is_company_name("Jane Doe"));
    }

    #[wasm_bindgen_test]
    fn test_extract_named_sets_source() {
        let result = card(CardExtractor::new().extract_named("bob@acme.com", "bob.png").unwrap());
        assert_eq!(result.email, "bob@acme.com");
        assert_eq!(result.source_file, "bob.png");
    }

    #[wasm_bindgen_test]
    fn test_ocr_result_reading_order() {
        let mut ocr = OcrResultJs::new();
        ocr.add_box("jane@doe.io", 10.0, 80.0, 200.0, 95.0, 0.9);
        ocr.add_box("Jane Doe", 10.0, 10.0, 120.0, 30.0, 0.95);
        assert_eq!(ocr.get_text(), "Jane Doe\njane@doe.io");

        let result = card(ocr.extract_card().unwrap());
        assert_eq!(result.name, "Jane Doe");
        assert_eq!(result.email, "jane@doe.io");
    }

    #[wasm_bindgen_test]
    fn test_export_csv() {
        let cards = extract_card_from_text("Jane Doe\nAcme, Inc.").unwrap();
        let array = js_sys::Array::of1(&cards);
        let csv = export_csv(array.into(), true).unwrap();
        assert!(csv.starts_with("\"#\",\"Name\""));
        assert!(csv.contains("\"1\",\"Jane Doe\",\"\",\"Acme, Inc.\""));
    }
}
