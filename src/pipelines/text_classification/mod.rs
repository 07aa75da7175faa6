//! Text-classification pipeline.
//!
//! Classify a text with a sequence-classification checkpoint and get back the
//! top-ranked label together with its softmax probability.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ontask::text_classification::TextClassificationPipelineBuilder;
//!
//! # fn main() -> ontask::error::Result<()> {
//! let pipeline = TextClassificationPipelineBuilder::new("distilbert-base-uncased").build()?;
//!
//! let output = pipeline.run("Screen text: cat videos Intended task: write an essay")?;
//! println!("{} (confidence: {:.2})", output.prediction.label, output.prediction.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Supported Models
//!
//! The architecture is read from `model_type` in the checkpoint's `config.json`.
//!
//! | `model_type` | Implementation |
//! |--------------|----------------|
//! | `distilbert` | [`DistilBertClassifier`](DistilBertClassifier) |
//! | `modernbert` | [`ModernBertClassifier`](ModernBertClassifier) |

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

pub use crate::loaders::{ModelFiles, ModelSource};
pub use crate::models::{AutoClassifier, DistilBertClassifier, ModernBertClassifier};
pub use builder::TextClassificationPipelineBuilder;
pub use model::TextClassificationModel;
pub use pipeline::{Output, Prediction, TextClassificationPipeline};
