//! Data models for cards and configuration.

pub mod card;
pub mod config;

pub use card::{ExtractionResult, Field, SessionSummary};
pub use config::BizcardConfig;
