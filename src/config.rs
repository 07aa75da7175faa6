//! Runtime configuration for the classifier.
//!
//! Values come from command-line flags with environment-variable fallbacks
//! (see [`crate::cli::Cli`]); the defaults reproduce the stock behaviour.

use std::path::PathBuf;

use crate::pipelines::utils::DeviceRequest;

/// Checkpoint used when neither `--model` nor `ONTASK_MODEL` is given.
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased";

/// Hub revision used when none is given.
pub const DEFAULT_REVISION: &str = "main";

/// Environment fallback for `--model`.
pub const MODEL_ENV: &str = "ONTASK_MODEL";
/// Environment fallback for `--revision`.
pub const REVISION_ENV: &str = "ONTASK_REVISION";
/// Environment fallback for `--cache-dir`.
pub const CACHE_DIR_ENV: &str = "ONTASK_CACHE_DIR";

/// Which checkpoint to load and where to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Hub repo id or local checkpoint directory.
    pub model: String,
    /// Hub revision; ignored for local directories.
    pub revision: String,
    /// Hub cache location; `None` keeps the hf-hub default.
    pub cache_dir: Option<PathBuf>,
    /// CPU or a CUDA ordinal.
    pub device: DeviceRequest,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            cache_dir: None,
            device: DeviceRequest::Cpu,
        }
    }
}
