//! Model families and their adapters.
//!
//! Each family is a closed variant of [`ModelFamily`] owning one
//! constructor and one synthesizer:
//!
//! | Family | Model handle | Required auxiliaries | Voice profile |
//! |---|---|---|---|
//! | `gguf-interface` | [`GgufInterface`] | none | speaker preset name |
//! | `processor-conditioned` | [`ProcessorConditionedModel`] | `processor` | voice preset |
//! | `diffusion-transformer` | [`ConditionalGenerationModel`] | `tokenizer` | voice description |
//! | `diffusion-transformer-multilingual` | [`ConditionalGenerationModel`] | `tokenizer`, `description_tokenizer` | voice description |
//! | `streaming-pipeline` | [`SpeechPipeline`] | none | voice name |

mod gguf;
mod parler;
pub(crate) mod pipeline;
mod processor;

use crate::auxiliary::{AuxiliaryArgs, AuxiliaryKey};
use crate::backend::{
    ConditionalGenerationModel, GgufInterface, ModelBackend, ProcessorConditionedModel,
    SpeechPipeline,
};
use crate::config::LoadOptions;
use crate::dispatch::SynthesisCall;
use crate::error::{TTSError, TTSResult};
use crate::model_id::ModelIdentifier;
use crate::waveform::RawOutput;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Builds a model handle and its auxiliaries from an identifier.
pub type Constructor = fn(&str, &LoadOptions, &dyn ModelBackend) -> TTSResult<LoadedModel>;

/// Runs one synthesis call against a loaded handle.
pub type Synthesizer = fn(&SynthesisCall<'_>) -> TTSResult<RawOutput>;

/// Supported model families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    /// Local GGUF inference interface (OuteTTS)
    GgufInterface,
    /// Processor + generation model (Bark)
    ProcessorConditioned,
    /// Description-conditioned transformer with one tokenizer (Parler-TTS)
    DiffusionTransformer,
    /// Description-conditioned transformer with a dedicated description tokenizer
    DiffusionTransformerMultilingual,
    /// Callable pipeline yielding chunks (Kokoro)
    StreamingPipeline,
}

impl ModelFamily {
    pub fn all() -> &'static [ModelFamily] {
        &[
            ModelFamily::GgufInterface,
            ModelFamily::ProcessorConditioned,
            ModelFamily::DiffusionTransformer,
            ModelFamily::DiffusionTransformerMultilingual,
            ModelFamily::StreamingPipeline,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::GgufInterface => "gguf-interface",
            ModelFamily::ProcessorConditioned => "processor-conditioned",
            ModelFamily::DiffusionTransformer => "diffusion-transformer",
            ModelFamily::DiffusionTransformerMultilingual => "diffusion-transformer-multilingual",
            ModelFamily::StreamingPipeline => "streaming-pipeline",
        }
    }

    /// Check the identifier has the shape this family loads from.
    pub fn validate_identifier(&self, model_id: &str) -> TTSResult<ModelIdentifier> {
        match self {
            ModelFamily::GgufInterface => ModelIdentifier::parse_gguf(model_id),
            _ => ModelIdentifier::parse_repo(model_id),
        }
    }

    pub fn required_auxiliaries(&self) -> &'static [AuxiliaryKey] {
        match self {
            ModelFamily::GgufInterface | ModelFamily::StreamingPipeline => &[],
            ModelFamily::ProcessorConditioned => &[AuxiliaryKey::Processor],
            ModelFamily::DiffusionTransformer => &[AuxiliaryKey::Tokenizer],
            ModelFamily::DiffusionTransformerMultilingual => &[
                AuxiliaryKey::Tokenizer,
                AuxiliaryKey::DescriptionTokenizer,
            ],
        }
    }

    pub fn constructor(&self) -> Constructor {
        match self {
            ModelFamily::GgufInterface => gguf::construct,
            ModelFamily::ProcessorConditioned => processor::construct,
            ModelFamily::DiffusionTransformer => parler::construct,
            ModelFamily::DiffusionTransformerMultilingual => parler::construct_multilingual,
            ModelFamily::StreamingPipeline => pipeline::construct,
        }
    }

    pub fn synthesizer(&self) -> Synthesizer {
        match self {
            ModelFamily::GgufInterface => gguf::synthesize,
            ModelFamily::ProcessorConditioned => processor::synthesize,
            ModelFamily::DiffusionTransformer => parler::synthesize,
            ModelFamily::DiffusionTransformerMultilingual => parler::synthesize_multilingual,
            ModelFamily::StreamingPipeline => pipeline::synthesize,
        }
    }

    /// Handle kind this family drives.
    pub fn handle_kind(&self) -> &'static str {
        match self {
            ModelFamily::GgufInterface => "gguf-interface",
            ModelFamily::ProcessorConditioned => "processor-conditioned",
            ModelFamily::DiffusionTransformer | ModelFamily::DiffusionTransformerMultilingual => {
                "conditional-generation"
            }
            ModelFamily::StreamingPipeline => "speech-pipeline",
        }
    }

    pub fn supports_streaming(&self) -> bool {
        matches!(self, ModelFamily::StreamingPipeline)
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelFamily::all()
            .iter()
            .find(|family| family.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown model family: {s}"))
    }
}

/// Loaded third-party model, shared behind a lock.
///
/// Clones share the same underlying model; generation calls through any
/// clone are serialized.
#[derive(Clone)]
pub enum ModelHandle {
    Gguf(Arc<Mutex<Box<dyn GgufInterface>>>),
    Processor(Arc<Mutex<Box<dyn ProcessorConditionedModel>>>),
    Conditional(Arc<Mutex<Box<dyn ConditionalGenerationModel>>>),
    Pipeline(Arc<Mutex<Box<dyn SpeechPipeline>>>),
}

impl ModelHandle {
    pub fn gguf(model: Box<dyn GgufInterface>) -> Self {
        Self::Gguf(Arc::new(Mutex::new(model)))
    }

    pub fn processor(model: Box<dyn ProcessorConditionedModel>) -> Self {
        Self::Processor(Arc::new(Mutex::new(model)))
    }

    pub fn conditional(model: Box<dyn ConditionalGenerationModel>) -> Self {
        Self::Conditional(Arc::new(Mutex::new(model)))
    }

    pub fn pipeline(model: Box<dyn SpeechPipeline>) -> Self {
        Self::Pipeline(Arc::new(Mutex::new(model)))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelHandle::Gguf(_) => "gguf-interface",
            ModelHandle::Processor(_) => "processor-conditioned",
            ModelHandle::Conditional(_) => "conditional-generation",
            ModelHandle::Pipeline(_) => "speech-pipeline",
        }
    }

    /// Sample rate reported by the model.
    pub fn sample_rate(&self) -> TTSResult<u32> {
        let poisoned = || TTSError::Other("model handle lock poisoned".into(), self.kind().into());
        let rate = match self {
            ModelHandle::Gguf(m) => m.lock().map_err(|_| poisoned())?.sample_rate(),
            ModelHandle::Processor(m) => m.lock().map_err(|_| poisoned())?.sample_rate(),
            ModelHandle::Conditional(m) => m.lock().map_err(|_| poisoned())?.sample_rate(),
            ModelHandle::Pipeline(m) => m.lock().map_err(|_| poisoned())?.sample_rate(),
        };
        Ok(rate)
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ModelHandle").field(&self.kind()).finish()
    }
}

/// Output of a family constructor.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub handle: ModelHandle,
    pub sample_rate: u32,
    pub auxiliary: AuxiliaryArgs,
}

impl LoadedModel {
    pub(crate) fn new(
        model_id: &str,
        handle: ModelHandle,
        auxiliary: AuxiliaryArgs,
    ) -> TTSResult<Self> {
        let sample_rate = handle.sample_rate()?;
        if sample_rate == 0 {
            return Err(TTSError::ModelLoad(
                model_id.to_string(),
                "model reported a sample rate of 0 Hz".to_string(),
            ));
        }
        Ok(Self {
            handle,
            sample_rate,
            auxiliary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names_round_trip() {
        for family in ModelFamily::all() {
            assert_eq!(family.as_str().parse::<ModelFamily>().unwrap(), *family);
        }
        assert!("vits".parse::<ModelFamily>().is_err());
    }

    #[test]
    fn family_serializes_kebab_case() {
        let json = serde_json::to_string(&ModelFamily::DiffusionTransformerMultilingual).unwrap();
        assert_eq!(json, r#""diffusion-transformer-multilingual""#);
    }

    #[test]
    fn required_auxiliaries_per_family() {
        assert!(ModelFamily::GgufInterface.required_auxiliaries().is_empty());
        assert_eq!(
            ModelFamily::ProcessorConditioned.required_auxiliaries(),
            &[AuxiliaryKey::Processor]
        );
        assert_eq!(
            ModelFamily::DiffusionTransformer.required_auxiliaries(),
            &[AuxiliaryKey::Tokenizer]
        );
        assert_eq!(
            ModelFamily::DiffusionTransformerMultilingual.required_auxiliaries(),
            &[AuxiliaryKey::Tokenizer, AuxiliaryKey::DescriptionTokenizer]
        );
    }

    #[test]
    fn identifier_shape_depends_on_family() {
        assert!(ModelFamily::GgufInterface
            .validate_identifier("OuteAI/OuteTTS-0.2-500M-GGUF/OuteTTS-0.2-500M-FP16.gguf")
            .is_ok());
        assert!(ModelFamily::GgufInterface
            .validate_identifier("parler-tts/parler-tts-mini-v1")
            .is_err());
        assert!(ModelFamily::DiffusionTransformer
            .validate_identifier("parler-tts/parler-tts-mini-v1")
            .is_ok());
    }

    #[test]
    fn only_pipelines_stream() {
        let streaming: Vec<_> = ModelFamily::all()
            .iter()
            .filter(|f| f.supports_streaming())
            .collect();
        assert_eq!(streaming, vec![&ModelFamily::StreamingPipeline]);
    }
}
