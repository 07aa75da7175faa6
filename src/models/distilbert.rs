use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder, VarMap};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use serde::Deserialize;
use tokenizers::Tokenizer;

use super::{encode, top_prediction, ClassifierConfigJson};
use crate::error::Result;
use crate::loaders::ModelFiles;
use crate::pipelines::text_classification::{Prediction, TextClassificationModel};

#[derive(Deserialize)]
struct DistilBertDims {
    dim: usize,
}

/// DistilBERT encoder with the `pre_classifier` → ReLU → `classifier` head
/// applied to the first (`[CLS]`) position.
pub struct DistilBertClassifier {
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    labels: Vec<String>,
    device: Device,
}

impl DistilBertClassifier {
    /// Load encoder, head and labels from `files`.
    pub fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = files.read_config()?;
        let config: Config = serde_json::from_str(&config_str)?;
        let dims: DistilBertDims = serde_json::from_str(&config_str)?;
        let labels = ClassifierConfigJson::parse(&config_str)?.labels();

        let vb = files.var_builder(&device)?;
        let encoder = DistilBertModel::load(vb.clone(), &config)?;
        let (pre_classifier, classifier) = load_head(vb, dims.dim, labels.len(), &device)?;

        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
            labels,
            device,
        })
    }

    /// Device the weights live on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Classify one text. Inputs longer than the position table are an error.
    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        let tokens = encode(tokenizer, text)?;
        let seq_len = tokens.get_ids().len();

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        // 1 marks a position attention must skip.
        let hidden: Vec<u8> = tokens
            .get_attention_mask()
            .iter()
            .map(|&m| u8::from(m == 0))
            .collect();
        let mask = Tensor::new(hidden.as_slice(), &self.device)?.reshape((1, 1, 1, seq_len))?;

        let hidden_states = self.encoder.forward(&input_ids, &mask)?;
        let pooled = hidden_states.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        top_prediction(&logits, &self.labels)
    }
}

/// Loads the classification head from the checkpoint, or initializes a fresh
/// one when the checkpoint is a bare encoder such as `distilbert-base-uncased`.
fn load_head(
    vb: VarBuilder<'static>,
    dim: usize,
    num_labels: usize,
    device: &Device,
) -> Result<(Linear, Linear)> {
    if vb.contains_tensor("classifier.weight") {
        let pre_classifier = linear(dim, dim, vb.pp("pre_classifier"))?;
        let classifier = linear(dim, num_labels, vb.pp("classifier"))?;
        return Ok((pre_classifier, classifier));
    }

    tracing::warn!(
        num_labels,
        "checkpoint has no classification head; using newly initialized weights"
    );
    let varmap = VarMap::new();
    let fresh = VarBuilder::from_varmap(&varmap, DType::F32, device);
    let pre_classifier = linear(dim, dim, fresh.pp("pre_classifier"))?;
    let classifier = linear(dim, num_labels, fresh.pp("classifier"))?;
    Ok((pre_classifier, classifier))
}

impl TextClassificationModel for DistilBertClassifier {
    fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        DistilBertClassifier::load(files, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        self.predict(tokenizer, text)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
