//! Card pipeline: input file -> preprocessing -> OCR -> contact extraction.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::extract::{ContactExtractor, EntityExtractor};
use crate::models::card::{ExtractionResult, SessionSummary};
use crate::models::config::BizcardConfig;
use crate::ocr::{ImagePreprocessor, OcrEngine};
use crate::session::CardSession;

/// Extension of pre-recognized OCR text files.
pub const TEXT_EXTENSION: &str = "txt";

/// What kind of input a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// An image to run through OCR.
    Image,
    /// Text already produced by an OCR engine.
    Text,
}

/// Outcome of processing one file in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardOutcome {
    /// The card was read; fields may still be empty.
    Extracted { card: ExtractionResult },
    /// The file could not be processed.
    Failed { file: String, reason: String },
}

impl CardOutcome {
    pub fn card(&self) -> Option<&ExtractionResult> {
        match self {
            Self::Extracted { card } => Some(card),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of processing a batch of files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// One outcome per processed file, in input order.
    pub outcomes: Vec<CardOutcome>,
    /// Files beyond the upload limit, not processed.
    pub skipped: Vec<PathBuf>,
    /// Total processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl BatchReport {
    /// Successfully read cards.
    pub fn cards(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.outcomes.iter().filter_map(CardOutcome::card)
    }

    /// Per-file failure notices as `(file, reason)`.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            CardOutcome::Failed { file, reason } => Some((file.as_str(), reason.as_str())),
            CardOutcome::Extracted { .. } => None,
        })
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_cards(self.cards())
    }

    /// Collect the successful cards into a session.
    pub fn into_session(self, limit: usize) -> CardSession {
        let mut session = CardSession::with_limit(limit);
        for outcome in self.outcomes {
            if let CardOutcome::Extracted { card } = outcome {
                if session.push(card).is_err() {
                    break;
                }
            }
        }
        session
    }
}

/// Turns card files into extraction results.
pub struct CardPipeline {
    engine: Option<Box<dyn OcrEngine>>,
    preprocessor: ImagePreprocessor,
    extractor: EntityExtractor,
    supported_extensions: Vec<String>,
    max_upload_count: usize,
}

impl CardPipeline {
    /// Create a pipeline without an OCR engine; only text inputs succeed
    /// until one is attached.
    pub fn new(config: &BizcardConfig) -> Self {
        Self {
            engine: None,
            preprocessor: ImagePreprocessor::from_config(&config.ocr),
            extractor: EntityExtractor::from_config(&config.extraction),
            supported_extensions: config.session.supported_extensions.clone(),
            max_upload_count: config.session.max_upload_count,
        }
    }

    /// Attach an OCR engine.
    pub fn with_engine(self, engine: impl OcrEngine + 'static) -> Self {
        self.with_boxed_engine(Box::new(engine))
    }

    /// Attach an already boxed OCR engine.
    pub fn with_boxed_engine(mut self, engine: Box<dyn OcrEngine>) -> Self {
        info!("Using OCR engine: {}", engine.name());
        self.engine = Some(engine);
        self
    }

    pub fn max_upload_count(&self) -> usize {
        self.max_upload_count
    }

    /// Classify a path by extension.
    pub fn input_kind(&self, path: &Path) -> Result<InputKind, PipelineError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if extension == TEXT_EXTENSION {
            Ok(InputKind::Text)
        } else if self
            .supported_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&extension))
        {
            Ok(InputKind::Image)
        } else {
            Err(PipelineError::UnsupportedFormat(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            }))
        }
    }

    /// Process one card file.
    pub fn process_file(&self, path: &Path) -> Result<ExtractionResult, PipelineError> {
        let source_file = file_name(path);
        info!("Processing card: {}", path.display());

        match self.input_kind(path)? {
            InputKind::Text => {
                let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(self.process_text(&text, &source_file))
            }
            InputKind::Image => {
                let engine = self.require_engine(path)?;
                let image = image::open(path).map_err(|source| PipelineError::Decode {
                    path: path.display().to_string(),
                    source,
                })?;
                self.recognize(engine, &image, &source_file)
            }
        }
    }

    /// Process an already decoded card image.
    pub fn process_image(
        &self,
        image: &DynamicImage,
        source: &str,
    ) -> Result<ExtractionResult, PipelineError> {
        let engine = self.require_engine(Path::new(source))?;
        self.recognize(engine, image, source)
    }

    /// Extract fields from already recognized text.
    pub fn process_text(&self, text: &str, source: &str) -> ExtractionResult {
        if text.trim().is_empty() {
            warn!("No text detected in: {}", source);
        }
        self.extractor.extract_from_text(text).with_source(source)
    }

    /// Process a batch of files, isolating per-file failures.
    ///
    /// Files beyond the upload limit are reported as skipped.
    pub fn process_batch(&self, paths: &[PathBuf]) -> BatchReport {
        self.process_batch_with(paths, |_, _| {})
    }

    /// Like [`process_batch`](Self::process_batch), calling `on_outcome`
    /// after each file.
    pub fn process_batch_with<F>(&self, paths: &[PathBuf], mut on_outcome: F) -> BatchReport
    where
        F: FnMut(&Path, &CardOutcome),
    {
        let start = Instant::now();
        let limit = self.max_upload_count.min(paths.len());
        let (accepted, skipped) = paths.split_at(limit);

        if !skipped.is_empty() {
            warn!(
                "Maximum {} cards allowed; skipping {} files",
                self.max_upload_count,
                skipped.len()
            );
        }

        let mut outcomes = Vec::with_capacity(accepted.len());
        for path in accepted {
            let outcome = match self.process_file(path) {
                Ok(card) => CardOutcome::Extracted { card },
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    CardOutcome::Failed {
                        file: file_name(path),
                        reason: e.to_string(),
                    }
                }
            };
            on_outcome(path, &outcome);
            outcomes.push(outcome);
        }

        BatchReport {
            outcomes,
            skipped: skipped.to_vec(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn require_engine(&self, path: &Path) -> Result<&dyn OcrEngine, PipelineError> {
        self.engine
            .as_deref()
            .ok_or_else(|| PipelineError::EngineUnavailable(path.display().to_string()))
    }

    fn recognize(
        &self,
        engine: &dyn OcrEngine,
        image: &DynamicImage,
        source: &str,
    ) -> Result<ExtractionResult, PipelineError> {
        let prepared = self.preprocessor.process(image);
        let ocr = engine
            .recognize(&prepared)
            .map_err(|e| PipelineError::Recognition {
                path: source.to_string(),
                source: e,
            })?;

        debug!(
            "{} recognized {} lines in {}ms",
            engine.name(),
            ocr.lines.len(),
            ocr.processing_time_ms
        );

        if !ocr.has_text() {
            warn!("No text detected in: {}", source);
        }

        Ok(self.extractor.extract(&ocr).with_source(source))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}
