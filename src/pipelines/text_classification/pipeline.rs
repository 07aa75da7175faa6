use std::time::{Duration, Instant};

use super::model::TextClassificationModel;
use crate::error::Result;
use tokenizers::Tokenizer;

/// A classification with label and confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted label, in the model's own vocabulary (e.g. `LABEL_1`).
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Top-ranked prediction.
    pub prediction: Prediction,
    /// Wall-clock time spent in the model.
    pub elapsed: Duration,
}

/// Pipeline for single-text classification.
///
/// Construct with [`TextClassificationPipelineBuilder`](super::TextClassificationPipelineBuilder).
pub struct TextClassificationPipeline<M: TextClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: TextClassificationModel> TextClassificationPipeline<M> {
    /// Classify one text and return its top-ranked label.
    ///
    /// ```rust,no_run
    /// # use ontask::text_classification::TextClassificationPipelineBuilder;
    /// # fn main() -> ontask::error::Result<()> {
    /// let pipeline = TextClassificationPipelineBuilder::new("distilbert-base-uncased").build()?;
    /// let output = pipeline.run("Screen text: lecture notes Intended task: study")?;
    /// println!("{} ({:.2})", output.prediction.label, output.prediction.score);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self, text: &str) -> Result<Output> {
        let start = Instant::now();
        let prediction = self.model.predict(&self.tokenizer, text)?;
        let elapsed = start.elapsed();

        tracing::debug!(
            label = %prediction.label,
            score = prediction.score,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "classified text"
        );

        Ok(Output {
            prediction,
            elapsed,
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
