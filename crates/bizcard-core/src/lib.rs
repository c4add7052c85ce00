//! Core library for business card contact extraction.
//!
//! This crate provides:
//! - Contact field extraction from recognized card text (name, title,
//!   company, email, phone, address, website)
//! - An OCR seam with image preprocessing and a `pure-onnx-ocr` adapter
//! - A file pipeline for single cards and batches
//! - A session store with per-field edits and CSV export

pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod session;

pub use error::{ExportError, OcrError, PipelineError, SessionError};
pub use export::{timestamped_filename, CsvExporter};
pub use extract::{extract_entities, is_company_name, ContactExtractor, EntityExtractor};
pub use models::card::{ExtractionResult, Field, SessionSummary};
pub use models::config::BizcardConfig;
pub use ocr::{ImagePreprocessor, OcrEngine, OcrResult, TextLine};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pipeline::{BatchReport, CardOutcome, CardPipeline, InputKind};
pub use session::CardSession;
