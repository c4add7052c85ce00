//! Contact field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_entities, EntityExtractor};
pub use rules::is_company_name;

use crate::models::card::ExtractionResult;
use crate::ocr::OcrResult;

/// Trait for contact field extractors.
///
/// Extraction is total: absent fields are left empty, never reported as
/// errors.
pub trait ContactExtractor {
    /// Extract contact fields from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> ExtractionResult;

    /// Extract contact fields from plain recognized text.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;
}
