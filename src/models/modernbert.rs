use std::collections::HashMap;

use candle_core::{Device, Tensor};
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use tokenizers::Tokenizer;

use super::{encode, top_prediction, ClassifierConfigJson};
use crate::error::Result;
use crate::loaders::ModelFiles;
use crate::pipelines::text_classification::{Prediction, TextClassificationModel};

/// Candle ModernBERT with its sequence-classification head.
#[derive(Clone)]
pub struct ModernBertClassifier {
    model: CandleModernBertForSequenceClassification,
    labels: Vec<String>,
    device: Device,
}

impl ModernBertClassifier {
    /// Load the checkpoint in `files`, sizing the head to its label list.
    pub fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = files.read_config()?;
        let mut config: Config = serde_json::from_str(&config_str)?;
        let labels = ClassifierConfigJson::parse(&config_str)?.labels();
        patch_config_labels(&mut config, &labels);

        let vb = files.var_builder(&device)?;
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            labels,
            device,
        })
    }

    /// Device the weights live on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Classify one text; the highest-probability label wins.
    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        let tokens = encode(tokenizer, text)?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        top_prediction(&logits, &self.labels)
    }
}

/// Candle sizes the classifier from `classifier_config.id2label`; make it match
/// the label list we resolved, keeping any pooling the checkpoint asked for.
fn patch_config_labels(config: &mut Config, labels: &[String]) {
    let matches = config
        .classifier_config
        .as_ref()
        .is_some_and(|c| c.id2label.len() == labels.len());
    if matches {
        return;
    }

    let id2label: HashMap<String, String> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (i.to_string(), label.clone()))
        .collect();
    let label2id: HashMap<String, String> = id2label
        .iter()
        .map(|(k, v)| (v.clone(), k.clone()))
        .collect();
    let classifier_pooling = config
        .classifier_config
        .as_ref()
        .map(|c| c.classifier_pooling.clone())
        .unwrap_or_else(ClassifierPooling::default);

    config.classifier_config = Some(ClassifierConfig {
        id2label,
        label2id,
        classifier_pooling,
    });
}

impl TextClassificationModel for ModernBertClassifier {
    fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        ModernBertClassifier::load(files, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        self.predict(tokenizer, text)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
