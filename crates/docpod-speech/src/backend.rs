//! Interfaces of the third-party objects each model family drives.
//!
//! Inference itself lives in the libraries behind these traits; the dispatch
//! layer only constructs them through a [`ModelBackend`] and calls them.
//! Generation takes `&mut self`: handles are not assumed reentrant, and the
//! facade serializes calls against a shared handle with a lock.

use crate::config::LoadOptions;
use crate::error::{TTSError, TTSResult};
use crate::waveform::ModelOutput;
use ndarray::ArrayD;
use std::path::PathBuf;
use std::sync::Arc;

/// Text tokenizer producing token ids.
pub trait TextTokenizer: Send + Sync {
    fn encode(&self, text: &str) -> TTSResult<Vec<u32>>;
}

/// Description/prompt conditioned generation model (parler-style).
pub trait ConditionalGenerationModel: Send {
    /// Output sample rate from the model configuration.
    fn sample_rate(&self) -> u32;

    /// Identifier of the text encoder whose tokenizer encodes descriptions.
    fn description_encoder_id(&self) -> Option<String> {
        None
    }

    /// Generate audio from a description (`input_ids`) and a prompt (`prompt_input_ids`).
    fn generate(&mut self, input_ids: &[u32], prompt_input_ids: &[u32]) -> TTSResult<ArrayD<f32>>;
}

/// Model features built by a [`SpeechProcessor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedInputs {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    /// Voice preset the processor resolved, if any
    pub voice_preset: Option<String>,
}

/// Processor turning text and a voice preset into model features (bark-style).
pub trait SpeechProcessor: Send + Sync {
    fn process(&self, text: &str, voice_preset: &str) -> TTSResult<ProcessedInputs>;
}

/// Model generating from processor features.
pub trait ProcessorConditionedModel: Send {
    fn sample_rate(&self) -> u32;
    fn generate(&mut self, inputs: &ProcessedInputs) -> TTSResult<ArrayD<f32>>;
}

/// Speaker preset loaded by a GGUF interface.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerPreset {
    pub name: String,
    pub data: serde_json::Value,
}

/// Sampling parameters of a GGUF interface generate call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GgufGenerationParams {
    pub temperature: f32,
    pub repetition_penalty: f32,
    pub max_length: usize,
}

impl Default for GgufGenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            repetition_penalty: 1.1,
            max_length: 4096,
        }
    }
}

/// Local GGUF inference interface (oute-style).
pub trait GgufInterface: Send {
    /// Sample rate of the embedded audio codec.
    fn sample_rate(&self) -> u32;

    fn load_default_speaker(&self, name: &str) -> TTSResult<SpeakerPreset>;

    fn generate(
        &mut self,
        text: &str,
        speaker: &SpeakerPreset,
        params: &GgufGenerationParams,
    ) -> TTSResult<ModelOutput>;
}

/// Iterator of generated chunks, in playback order.
pub type ChunkIter<'a> = Box<dyn Iterator<Item = TTSResult<ArrayD<f32>>> + Send + 'a>;

/// Callable pipeline yielding audio chunks for text and a voice.
pub trait SpeechPipeline: Send {
    fn sample_rate(&self) -> u32;
    fn run<'a>(&'a mut self, text: &str, voice: &str) -> TTSResult<ChunkIter<'a>>;
}

/// Loader seam instantiating third-party objects.
///
/// Every loader defaults to a `ModelLoad` error so a backend only implements
/// the families it can serve.
pub trait ModelBackend: Send + Sync {
    /// Resolve a file of a hub repository to a local path, downloading if needed.
    fn resolve_model_file(
        &self,
        repo_id: &str,
        filename: &str,
        options: &LoadOptions,
    ) -> TTSResult<PathBuf> {
        let mut source = crate::model_source::ModelSource::from_hf(repo_id, filename);
        if let Some(revision) = &options.revision {
            source = source.with_revision(revision.clone());
        }
        source
            .resolve()
            .map_err(|err| TTSError::ModelLoad(format!("{repo_id}/{filename}"), err.to_string()))
    }

    fn load_gguf_interface(
        &self,
        model_id: &str,
        _model_path: PathBuf,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn GgufInterface>> {
        Err(unsupported_loader(model_id, "GGUF interfaces"))
    }

    fn load_conditional_generation(
        &self,
        model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn ConditionalGenerationModel>> {
        Err(unsupported_loader(model_id, "conditional generation models"))
    }

    fn load_processor_model(
        &self,
        model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn ProcessorConditionedModel>> {
        Err(unsupported_loader(model_id, "processor-conditioned models"))
    }

    fn load_processor(
        &self,
        model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Arc<dyn SpeechProcessor>> {
        Err(unsupported_loader(model_id, "speech processors"))
    }

    fn load_pipeline(
        &self,
        model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn SpeechPipeline>> {
        Err(unsupported_loader(model_id, "speech pipelines"))
    }

    #[cfg(feature = "hf-tokenizers")]
    fn load_tokenizer(
        &self,
        tokenizer_id: &str,
        options: &LoadOptions,
    ) -> TTSResult<Arc<dyn TextTokenizer>> {
        let tokenizer = crate::tokenizer::HfTokenizer::from_pretrained(
            tokenizer_id,
            options.revision.as_deref(),
        )?;
        Ok(Arc::new(tokenizer))
    }

    #[cfg(not(feature = "hf-tokenizers"))]
    fn load_tokenizer(
        &self,
        tokenizer_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Arc<dyn TextTokenizer>> {
        Err(unsupported_loader(tokenizer_id, "tokenizers (enable `hf-tokenizers`)"))
    }
}

fn unsupported_loader(model_id: &str, what: &str) -> TTSError {
    TTSError::ModelLoad(
        model_id.to_string(),
        format!("this backend does not provide {what}"),
    )
}
