//! Priority-ordered line classifier for business card text.

use lazy_static::lazy_static;
use tracing::debug;

use crate::models::card::ExtractionResult;
use crate::models::config::ExtractionConfig;
use crate::ocr::OcrResult;

use super::rules::{default_rules, CardLine, LineRule, NameRule};
use super::ContactExtractor;

/// Assigns each line of OCR text to at most one contact field.
///
/// Lines are trimmed, empty lines are dropped, and the remaining lines are
/// visited top to bottom. For each line the rules run in priority order;
/// the first rule whose field is still empty and whose pattern matches
/// stores its value, and the line is consumed. Once a field is filled it
/// keeps the first value found.
pub struct EntityExtractor {
    config: ExtractionConfig,
    rules: Vec<Box<dyn LineRule>>,
}

impl EntityExtractor {
    /// Create an extractor with the default rules and name heuristic.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor tuned by configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            config: config.clone(),
            rules: default_rules(NameRule::from_config(config)),
        }
    }

    /// Set how many leading lines may hold the name.
    pub fn with_name_window(mut self, window: usize) -> Self {
        self.config.name_window = window;
        Self::from_config(&self.config)
    }

    /// Set the accepted token count range for the name line.
    pub fn with_name_tokens(mut self, min: usize, max: usize) -> Self {
        self.config.name_min_tokens = min;
        self.config.name_max_tokens = max;
        Self::from_config(&self.config)
    }

    /// Configuration this extractor was built with.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Classify the lines of `text` into contact fields.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        let lines = text
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(index, text)| CardLine::new(index, text));

        for line in lines {
            self.classify(&line, &mut result);
        }

        debug!(
            "Extracted {} of 7 fields from {} characters",
            result.found_count(),
            text.len()
        );

        result
    }

    fn classify(&self, line: &CardLine<'_>, result: &mut ExtractionResult) {
        for rule in &self.rules {
            let field = rule.field();
            if !result.has(field) {
                if let Some(value) = rule.capture(line) {
                    debug!("Line {} -> {}: {:?}", line.index, field, value);
                    result.set(field, value);
                    return;
                }
            } else if rule.claims(line) {
                debug!("Line {} dropped, {} already found", line.index, field);
                return;
            }
        }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for EntityExtractor {
    fn extract(&self, ocr_result: &OcrResult) -> ExtractionResult {
        self.parse(&ocr_result.text)
            .with_raw_text(ocr_result.text.as_str())
    }

    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.parse(text).with_raw_text(text)
    }
}

lazy_static! {
    static ref DEFAULT_EXTRACTOR: EntityExtractor = EntityExtractor::new();
}

/// Extract contact fields from OCR text with the default rules.
pub fn extract_entities(text: &str) -> ExtractionResult {
    DEFAULT_EXTRACTOR.parse(text)
}
