//! Sequence-classification model implementations.

pub mod distilbert;
pub mod modernbert;

use std::collections::HashMap;

use candle_core::{Tensor, D};
use candle_nn::ops::softmax;
use serde::Deserialize;
use tokenizers::{Encoding, Tokenizer};

use crate::error::{PipelineError, Result};
use crate::loaders::ModelFiles;
use crate::pipelines::text_classification::{Prediction, TextClassificationModel};

pub use distilbert::DistilBertClassifier;
pub use modernbert::ModernBertClassifier;

/// Number of labels a checkpoint gets when its config names none.
const DEFAULT_NUM_LABELS: usize = 2;

/// The classification-related subset of a HuggingFace `config.json`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassifierConfigJson {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub id2label: HashMap<String, String>,
    #[serde(default)]
    pub label2id: HashMap<String, u32>,
    #[serde(default)]
    pub num_labels: Option<usize>,
}

impl ClassifierConfigJson {
    pub fn parse(config: &str) -> Result<Self> {
        Ok(serde_json::from_str(config)?)
    }

    /// Label names indexed by class id. Falls back to `LABEL_{i}`.
    pub fn labels(&self) -> Vec<String> {
        let num_labels = self
            .num_labels
            .unwrap_or(0)
            .max(self.id2label.len())
            .max(self.label2id.len());
        let num_labels = if num_labels == 0 {
            DEFAULT_NUM_LABELS
        } else {
            num_labels
        };

        let by_id: HashMap<u32, &str> = self
            .label2id
            .iter()
            .map(|(label, id)| (*id, label.as_str()))
            .collect();

        (0..num_labels)
            .map(|i| {
                self.id2label
                    .get(&i.to_string())
                    .map(String::as_str)
                    .or_else(|| by_id.get(&(i as u32)).copied())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("LABEL_{i}"))
            })
            .collect()
    }
}

pub(crate) fn encode(tokenizer: &Tokenizer, text: &str) -> Result<Encoding> {
    tokenizer.encode(text, true).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Tokenization failed on '{}': {}",
            &text.chars().take(50).collect::<String>(),
            e
        ))
    })
}

/// Softmax over `logits` (shape `[1, num_labels]`) and pick the arg-max.
pub(crate) fn top_prediction(logits: &Tensor, labels: &[String]) -> Result<Prediction> {
    let probs = softmax(logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

    let (pred_id, score) = probs
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((i, p)),
        })
        .ok_or_else(|| PipelineError::Unexpected("Model returned no logits".to_string()))?;

    let label = labels.get(pred_id).cloned().ok_or_else(|| {
        PipelineError::Unexpected(format!(
            "Predicted label ID {} not in id2label. Available: {}",
            pred_id,
            labels.join(", ")
        ))
    })?;

    Ok(Prediction { label, score })
}

/// Classifier chosen at load time from the checkpoint's `model_type`.
pub enum AutoClassifier {
    /// `model_type: "distilbert"`.
    DistilBert(DistilBertClassifier),
    /// `model_type: "modernbert"`.
    ModernBert(ModernBertClassifier),
}

impl TextClassificationModel for AutoClassifier {
    fn load(files: &ModelFiles, device: candle_core::Device) -> Result<Self> {
        let config = ClassifierConfigJson::parse(&files.read_config()?)?;
        match config.model_type.as_deref() {
            Some("distilbert") => Ok(AutoClassifier::DistilBert(DistilBertClassifier::load(
                files, device,
            )?)),
            Some("modernbert") => Ok(AutoClassifier::ModernBert(ModernBertClassifier::load(
                files, device,
            )?)),
            Some(other) => Err(PipelineError::UnsupportedModel(other.to_string())),
            None => Err(PipelineError::UnsupportedModel("<missing>".to_string())),
        }
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        match self {
            AutoClassifier::DistilBert(m) => m.predict(tokenizer, text),
            AutoClassifier::ModernBert(m) => m.predict(tokenizer, text),
        }
    }

    fn device(&self) -> &candle_core::Device {
        match self {
            AutoClassifier::DistilBert(m) => m.device(),
            AutoClassifier::ModernBert(m) => m.device(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;

    #[test]
    fn labels_default_to_two_generic_names() {
        let config = ClassifierConfigJson::parse(r#"{"model_type":"distilbert","dim":768}"#).unwrap();
        assert_eq!(config.labels(), vec!["LABEL_0", "LABEL_1"]);
    }

    #[test]
    fn labels_follow_id2label_order() {
        let config = ClassifierConfigJson::parse(
            r#"{"id2label":{"1":"POSITIVE","0":"NEGATIVE"},"label2id":{"NEGATIVE":0,"POSITIVE":1}}"#,
        )
        .unwrap();
        assert_eq!(config.labels(), vec!["NEGATIVE", "POSITIVE"]);
    }

    #[test]
    fn labels_can_come_from_label2id_alone() {
        let config =
            ClassifierConfigJson::parse(r#"{"label2id":{"off":0,"on":1,"unsure":2}}"#).unwrap();
        assert_eq!(config.labels(), vec!["off", "on", "unsure"]);
    }

    #[test]
    fn top_prediction_picks_highest_probability() {
        let logits = Tensor::new(&[[0.1f32, 2.0, -1.0]], &Device::Cpu).unwrap();
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let prediction = top_prediction(&logits, &labels).unwrap();
        assert_eq!(prediction.label, "b");
        assert!(prediction.score > 0.5 && prediction.score <= 1.0);
    }

    #[test]
    fn top_prediction_rejects_unknown_class_id() {
        let logits = Tensor::new(&[[0.0f32, 5.0]], &Device::Cpu).unwrap();
        let labels = vec!["only".to_string()];

        let err = top_prediction(&logits, &labels).unwrap_err();
        assert!(matches!(err, PipelineError::Unexpected(ref m) if m.contains("Available: only")));
    }

    #[test]
    fn auto_classifier_rejects_unknown_architecture() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"model_type":"gpt2"}"#).unwrap();
        let files = ModelFiles {
            config,
            tokenizer: dir.path().join("tokenizer.json"),
            weights: dir.path().join("model.safetensors"),
        };

        let err = AutoClassifier::load(&files, Device::Cpu).err().unwrap();
        assert!(matches!(err, PipelineError::UnsupportedModel(ref t) if t == "gpt2"));
    }
}
