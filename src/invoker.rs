//! Turns one pair of inputs into one printed verdict.

use std::io::Write;

use crate::error::Result;
use crate::pipelines::text_classification::{
    Prediction, TextClassificationModel, TextClassificationPipeline,
};
use crate::verdict::Verdict;

/// Anything that maps a text to its top-ranked label and confidence.
pub trait TextClassifier {
    /// Top-ranked prediction for `text`.
    fn classify(&self, text: &str) -> Result<Prediction>;
}

impl<M: TextClassificationModel> TextClassifier for TextClassificationPipeline<M> {
    fn classify(&self, text: &str) -> Result<Prediction> {
        Ok(self.run(text)?.prediction)
    }
}

impl<F> TextClassifier for F
where
    F: Fn(&str) -> Result<Prediction>,
{
    fn classify(&self, text: &str) -> Result<Prediction> {
        self(text)
    }
}

/// The two user-supplied strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arbitrary text observed on screen.
    pub screen_text: String,
    /// Free text naming the intended task.
    pub activity_description: String,
}

impl Invocation {
    /// Pair `screen_text` with the intended `activity_description`.
    pub fn new(screen_text: impl Into<String>, activity_description: impl Into<String>) -> Self {
        Self {
            screen_text: screen_text.into(),
            activity_description: activity_description.into(),
        }
    }

    /// The single string handed to the classifier.
    pub fn prompt(&self) -> String {
        format!(
            "Screen text: {} Intended task: {}",
            self.screen_text, self.activity_description
        )
    }
}

/// Classify `invocation` and write the verdict line to `out`.
///
/// Nothing is written when the classifier fails.
pub fn invoke<C, W>(classifier: &C, invocation: &Invocation, out: &mut W) -> Result<Verdict>
where
    C: TextClassifier + ?Sized,
    W: Write,
{
    let prompt = invocation.prompt();
    tracing::debug!(prompt = %prompt, "classifying");

    let prediction = classifier.classify(&prompt)?;
    // The label is informational only.
    let verdict = Verdict::from_score(prediction.score);
    tracing::debug!(
        label = %prediction.label,
        score = prediction.score,
        verdict = %verdict,
        "classified"
    );

    writeln!(out, "{verdict}")?;
    Ok(verdict)
}
