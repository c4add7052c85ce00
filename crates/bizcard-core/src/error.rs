//! Error types for the bizcard-core library.

use thiserror::Error;

/// Errors raised by OCR engine adapters.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised while turning one input file into a card.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The file extension is not a supported image or text format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// An image was given but no OCR engine is configured.
    #[error("no OCR engine available for {0}")]
    EngineUnavailable(String),

    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The image could not be decoded.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The OCR engine failed on this image.
    #[error("OCR failed for {path}: {source}")]
    Recognition {
        path: String,
        #[source]
        source: OcrError,
    },
}

/// Errors raised by the session store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// No card exists at the given position.
    #[error("no card at index {0}")]
    NoSuchCard(usize),

    /// The session already holds the maximum number of cards.
    #[error("session limit of {0} cards reached")]
    LimitReached(usize),
}

/// Errors raised while writing tabular exports.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The export buffer could not be recovered from the writer.
    #[error("failed to flush export buffer: {0}")]
    Flush(String),

    /// Exported bytes were not valid UTF-8.
    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
