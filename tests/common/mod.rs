//! A tiny randomly initialised DistilBERT checkpoint written to disk, so the
//! full load-and-classify path runs without network access.

use std::path::Path;

use candle_core::{DType, Device};
use candle_nn::{linear, VarBuilder, VarMap};
use candle_transformers::models::distilbert::{Config, DistilBertModel};

const DIM: usize = 8;

const WORDS: &[&str] = &[
    "[UNK]", "screen", "text", "intended", "task", "buy", "milk", "email", "boss", "write",
    "a", "history", "essay", "-", ":",
];

/// Writes `config.json`, `tokenizer.json` and `model.safetensors` into `dir`.
/// Inputs longer than `max_positions` tokens cannot be embedded.
pub fn write_tiny_distilbert(dir: &Path, max_positions: usize) {
    let config = serde_json::json!({
        "model_type": "distilbert",
        "vocab_size": WORDS.len(),
        "dim": DIM,
        "n_layers": 1,
        "n_heads": 2,
        "hidden_dim": 16,
        "activation": "gelu",
        "max_position_embeddings": max_positions,
        "initializer_range": 0.02,
        "pad_token_id": 0,
        "dropout": 0.1,
        "attention_dropout": 0.1,
        "seq_classif_dropout": 0.2,
        "sinusoidal_pos_embds": false,
        "tie_weights_": true,
        "id2label": {"0": "LABEL_0", "1": "LABEL_1"},
        "label2id": {"LABEL_0": 0, "LABEL_1": 1}
    });
    std::fs::write(dir.join("config.json"), config.to_string()).unwrap();

    let vocab: serde_json::Map<String, serde_json::Value> = WORDS
        .iter()
        .enumerate()
        .map(|(id, word)| (word.to_string(), id.into()))
        .collect();
    let tokenizer = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": {"type": "Lowercase"},
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": null,
        "decoder": null,
        "model": {"type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]"}
    });
    std::fs::write(dir.join("tokenizer.json"), tokenizer.to_string()).unwrap();

    let config: Config = serde_json::from_value(config).unwrap();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    DistilBertModel::load(vb.clone(), &config).unwrap();
    linear(DIM, DIM, vb.pp("pre_classifier")).unwrap();
    linear(DIM, 2, vb.pp("classifier")).unwrap();
    varmap.save(dir.join("model.safetensors")).unwrap();
}
