use std::path::PathBuf;

use super::model::TextClassificationModel;
use super::pipeline::TextClassificationPipeline;
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::loaders::ModelSource;
use crate::models::AutoClassifier;
use crate::pipelines::utils::DeviceRequest;

/// Builder for creating [`TextClassificationPipeline`] instances.
///
/// # Examples
///
/// ```rust,no_run
/// # use ontask::text_classification::TextClassificationPipelineBuilder;
/// # fn main() -> ontask::error::Result<()> {
/// let pipeline = TextClassificationPipelineBuilder::new("distilbert-base-uncased")
///     .revision("main")
///     .cpu()
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TextClassificationPipelineBuilder {
    model: String,
    revision: String,
    cache_dir: Option<PathBuf>,
    device_request: DeviceRequest,
}

impl TextClassificationPipelineBuilder {
    /// Hub repo id or local directory of the checkpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            revision: crate::config::DEFAULT_REVISION.to_string(),
            cache_dir: None,
            device_request: DeviceRequest::Cpu,
        }
    }

    /// Builder preloaded from resolved CLI/env configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            model: config.model.clone(),
            revision: config.revision.clone(),
            cache_dir: config.cache_dir.clone(),
            device_request: config.device,
        }
    }

    /// Hub revision (branch, tag or commit). Ignored for local directories.
    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Override the hub cache location.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    /// Where the checkpoint files will be read from.
    pub fn source(&self) -> ModelSource {
        ModelSource::resolve(&self.model, &self.revision, self.cache_dir.clone())
    }

    /// Builds the pipeline, picking the architecture from the checkpoint's config.
    ///
    /// # Errors
    ///
    /// Returns an error if downloading, model loading or device initialization fails.
    pub fn build(self) -> Result<TextClassificationPipeline<AutoClassifier>> {
        self.build_as()
    }

    /// Builds the pipeline with a specific model implementation.
    pub fn build_as<M: TextClassificationModel>(self) -> Result<TextClassificationPipeline<M>> {
        let device = self.device_request.resolve()?;
        let source = self.source();

        tracing::info!(model = %source, device = %self.device_request, "loading classifier");
        let files = source.fetch()?;
        let model = M::load(&files, device)?;
        let tokenizer = files.load_tokenizer()?;

        Ok(TextClassificationPipeline { model, tokenizer })
    }
}
