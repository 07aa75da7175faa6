use crate::error::Result;
use crate::loaders::ModelFiles;
use tokenizers::Tokenizer;

use super::pipeline::Prediction;

/// A sequence-classification model usable by [`TextClassificationPipeline`](super::TextClassificationPipeline).
pub trait TextClassificationModel {
    /// Load weights and label names from a resolved checkpoint.
    fn load(files: &ModelFiles, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Top-ranked label and its softmax probability.
    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction>;

    /// Device holding the weights.
    fn device(&self) -> &candle_core::Device;
}
