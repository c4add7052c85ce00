//! Subcommands and the setup they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use bizcard_core::models::config::BizcardConfig;
use bizcard_core::CardPipeline;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizcard")
        .join("config.json")
}

/// Resolve the configuration file: the `-c` path if given, else the default.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BizcardConfig> {
    if let Some(path) = config_path {
        return Ok(BizcardConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(BizcardConfig::from_file(&path)?)
    } else {
        Ok(BizcardConfig::default())
    }
}

/// Build a card pipeline, attaching the OCR engine when its models exist.
///
/// Text inputs work without models; image inputs then fail per file.
pub fn build_pipeline(
    config: &BizcardConfig,
    model_dir: Option<&Path>,
) -> anyhow::Result<CardPipeline> {
    let mut models = config.models.clone();
    if let Some(dir) = model_dir {
        models.model_dir = dir.to_path_buf();
    }

    let pipeline = CardPipeline::new(config);
    let det_model = models.model_dir.join(&models.detection_model);

    if !det_model.exists() {
        warn!(
            "OCR models not found at {}; only .txt inputs can be processed",
            models.model_dir.display()
        );
        return Ok(pipeline);
    }

    let engine = bizcard_core::PureOcrEngine::from_models(&models, &config.ocr)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;

    Ok(pipeline.with_engine(engine))
}
