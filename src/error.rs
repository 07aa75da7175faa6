//! Error types for this crate.
//!
//! Model loading and inference return [`Result<T>`], which uses [`PipelineError`].
//! Argument validation has its own [`UsageError`] because it is the one failure
//! the binary reports with a fixed message and exit status.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failure to load or run the text-classification model.
///
/// # Example
///
/// ```rust
/// use ontask::error::PipelineError;
///
/// fn describe(e: &PipelineError) -> &'static str {
///     match e {
///         PipelineError::Download(_) => "network or hub cache problem",
///         PipelineError::Device(_) => "accelerator unavailable",
///         PipelineError::Tokenization(_) => "tokenizer rejected the input",
///         PipelineError::UnsupportedModel(_) => "unknown architecture",
///         _ => "internal error",
///     }
/// }
///
/// assert_eq!(describe(&PipelineError::Device("no gpu".into())), "accelerator unavailable");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Network, hub cache or missing model file.
    #[error("{0}")]
    Download(String),

    /// Tokenizer could not be loaded or rejected the input.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure.
    #[error("{0}")]
    Device(String),

    /// The checkpoint's `model_type` has no classifier implementation here.
    #[error("unsupported model type '{0}' (expected 'distilbert' or 'modernbert')")]
    UnsupportedModel(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

/// Fewer than two positional arguments were supplied.
///
/// The display text is the complete usage line printed to stderr.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error: Missing arguments. Usage: {program} <text> <activityDescription>")]
pub struct UsageError {
    /// Executable name shown in the usage line.
    pub program: String,
}

impl UsageError {
    /// Usage error for the executable named `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}
