//! Locating checkpoint files on the HuggingFace Hub or on disk.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Where model files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A repository on the HuggingFace Hub.
    Hub {
        /// Repo id, e.g. `distilbert-base-uncased`.
        repo: String,
        /// Branch, tag or commit.
        revision: String,
        /// Overrides the hf-hub cache location.
        cache_dir: Option<PathBuf>,
    },
    /// A directory already holding `config.json`, `tokenizer.json` and weights.
    Local(PathBuf),
}

impl ModelSource {
    /// Treats `model` as a local directory when one exists at that path,
    /// otherwise as a hub repo id.
    pub fn resolve(model: &str, revision: &str, cache_dir: Option<PathBuf>) -> Self {
        let path = Path::new(model);
        if path.is_dir() {
            ModelSource::Local(path.to_path_buf())
        } else {
            ModelSource::Hub {
                repo: model.to_string(),
                revision: revision.to_string(),
                cache_dir,
            }
        }
    }

    /// Locate (downloading if needed) every file a classifier needs.
    pub fn fetch(&self) -> Result<ModelFiles> {
        match self {
            ModelSource::Hub {
                repo,
                revision,
                cache_dir,
            } => {
                let mut builder = ApiBuilder::new().with_progress(false);
                if let Some(dir) = cache_dir {
                    builder = builder.with_cache_dir(dir.clone());
                }
                let api = builder.build()?;
                let hub = api.repo(Repo::with_revision(
                    repo.clone(),
                    RepoType::Model,
                    revision.clone(),
                ));

                tracing::info!(repo = %repo, revision = %revision, "fetching model files");
                Ok(ModelFiles {
                    config: hub_get(&hub, repo, CONFIG_FILE)?,
                    tokenizer: hub_get(&hub, repo, TOKENIZER_FILE)?,
                    weights: hub_get(&hub, repo, SAFETENSORS_FILE)
                        .or_else(|_| hub_get(&hub, repo, PYTORCH_FILE))?,
                })
            }
            ModelSource::Local(dir) => {
                tracing::info!(dir = %dir.display(), "using local model files");
                Ok(ModelFiles {
                    config: local_get(dir, CONFIG_FILE)?,
                    tokenizer: local_get(dir, TOKENIZER_FILE)?,
                    weights: local_get(dir, SAFETENSORS_FILE)
                        .or_else(|_| local_get(dir, PYTORCH_FILE))?,
                })
            }
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Hub { repo, revision, .. } => write!(f, "{repo}@{revision}"),
            ModelSource::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

fn hub_get(hub: &ApiRepo, repo: &str, filename: &str) -> Result<PathBuf> {
    hub.get(filename).map_err(|e| {
        PipelineError::Download(format!(
            "Failed to download '{}' from '{}': {}",
            filename, repo, e
        ))
    })
}

fn local_get(dir: &Path, filename: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::Download(format!(
            "Model file '{}' not found in '{}'",
            filename,
            dir.display()
        )))
    }
}

/// Paths to the files of one resolved checkpoint.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// `config.json`.
    pub config: PathBuf,
    /// `tokenizer.json`.
    pub tokenizer: PathBuf,
    /// `model.safetensors` or `pytorch_model.bin`.
    pub weights: PathBuf,
}

impl ModelFiles {
    /// Raw contents of `config.json`.
    pub fn read_config(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.config)?)
    }

    /// Parse `tokenizer.json`.
    pub fn load_tokenizer(&self) -> Result<Tokenizer> {
        Tokenizer::from_file(&self.tokenizer).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                self.tokenizer.display(),
                e
            ))
        })
    }

    /// F32 weights on `device`, memory-mapped when stored as safetensors.
    pub fn var_builder(&self, device: &Device) -> Result<VarBuilder<'static>> {
        let vb = if self
            .weights
            .extension()
            .is_some_and(|e| e == "safetensors")
        {
            // SAFETY: the weights file is not modified while mapped.
            unsafe { VarBuilder::from_mmaped_safetensors(&[&self.weights], DType::F32, device)? }
        } else {
            VarBuilder::from_pth(&self.weights, DType::F32, device)?
        };
        Ok(vb)
    }
}
