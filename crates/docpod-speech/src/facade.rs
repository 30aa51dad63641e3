//! Unified TTS facade over every registered model family.

use crate::adapters::{ModelFamily, ModelHandle, pipeline};
use crate::auxiliary::AuxiliaryArgs;
use crate::backend::ModelBackend;
use crate::config::LoadOptions;
use crate::dispatch::{SynthesisOverrides, dispatch};
use crate::error::{TTSError, TTSResult};
use crate::registry::ModelRegistry;
use crate::types::{AudioChunk, ModelInfo, SpeechRequest, SpeechResponse, VoiceProfile};
use crate::waveform::{Waveform, normalize};
use crate::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;

/// A loaded model ready for synthesis.
///
/// Cloning is cheap and shares the model handle: several speakers can use one
/// model with different voice profiles. Synthesis calls on a shared handle run
/// one at a time.
#[derive(Clone, Debug)]
pub struct TtsFacade {
    registry: Arc<ModelRegistry>,
    model_id: String,
    family: ModelFamily,
    model: ModelHandle,
    sample_rate: u32,
    auxiliary: AuxiliaryArgs,
    language: String,
}

/// Load `model_id` through the family registered for it.
pub fn load_tts_model(
    registry: &Arc<ModelRegistry>,
    backend: &dyn ModelBackend,
    model_id: &str,
    options: &LoadOptions,
) -> TTSResult<TtsFacade> {
    let entry = registry.resolve(model_id)?;
    let family = entry.family();
    log::debug!("loading {} as {} on {}", model_id, family, options.device);

    let loaded = (entry.constructor())(model_id, options, backend)?;
    loaded
        .auxiliary
        .ensure(family.required_auxiliaries(), model_id)?;

    Ok(TtsFacade {
        registry: Arc::clone(registry),
        model_id: model_id.to_string(),
        family,
        model: loaded.handle,
        sample_rate: loaded.sample_rate,
        auxiliary: loaded.auxiliary,
        language: options.language.clone(),
    })
}

impl TtsFacade {
    /// Assemble a facade from an already loaded handle.
    ///
    /// Checks that `model_id` is registered, that the handle belongs to its
    /// family, that the sample rate is positive and that the family's required
    /// auxiliaries are present.
    pub fn from_parts(
        registry: Arc<ModelRegistry>,
        model_id: impl Into<String>,
        model: ModelHandle,
        sample_rate: u32,
        auxiliary: AuxiliaryArgs,
    ) -> TTSResult<Self> {
        let model_id = model_id.into();
        let family = registry.resolve(&model_id)?.family();

        if family.handle_kind() != model.kind() {
            return Err(TTSError::UnsupportedFamily(
                model_id,
                family.handle_kind().to_string(),
                model.kind().to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(TTSError::ModelLoad(
                model_id,
                "sample rate must be greater than 0".to_string(),
            ));
        }
        auxiliary.ensure(family.required_auxiliaries(), &model_id)?;

        Ok(Self {
            registry,
            model_id,
            family,
            model,
            sample_rate,
            auxiliary,
            language: "en".to_string(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn auxiliary(&self) -> &AuxiliaryArgs {
        &self.auxiliary
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Synthesize `text` with the stored auxiliaries.
    pub fn synthesize(&self, text: &str, voice: &VoiceProfile) -> TTSResult<Waveform> {
        self.synthesize_with(text, voice, &SynthesisOverrides::default())
    }

    /// Synthesize `text`, letting `overrides` win for this call only.
    pub fn synthesize_with(
        &self,
        text: &str,
        voice: &VoiceProfile,
        overrides: &SynthesisOverrides,
    ) -> TTSResult<Waveform> {
        let raw = dispatch(
            &self.registry,
            &self.model_id,
            text,
            &self.model,
            voice,
            &self.auxiliary,
            overrides,
        )?;
        Ok(Waveform {
            samples: normalize(raw),
            sample_rate: self.sample_rate,
        })
    }
}

impl TTSProvider for TtsFacade {}

#[async_trait]
impl TTSSpeechProvider for TtsFacade {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        let facade = self.clone();
        let SpeechRequest {
            text,
            voice,
            overrides,
        } = request;

        let voice_name = voice.as_str().to_string();
        let input = text.clone();

        // Blocking model call; keep it off the async workers
        let result =
            tokio::task::spawn_blocking(move || facade.synthesize_with(&input, &voice, &overrides))
                .await
                .map_err(|e| {
                    TTSError::generation(format!("task join error: {e}"), &text, voice_name)
                })?;

        let audio = result?.into_audio_data();
        let duration_ms = audio.duration_ms();
        Ok(SpeechResponse {
            audio,
            text,
            duration_ms,
        })
    }

    async fn generate_speech_stream<'a>(
        &'a self,
        request: SpeechRequest,
    ) -> TTSResult<Pin<Box<dyn Stream<Item = TTSResult<AudioChunk>> + Send + 'a>>> {
        let ModelHandle::Pipeline(handle) = &self.model else {
            return Err(TTSError::StreamingNotSupported(self.model_id.clone()));
        };

        let stream = pipeline::stream(
            Arc::clone(handle),
            self.model_id.clone(),
            request.text,
            request.voice.as_str().to_string(),
        );
        Ok(Box::pin(stream))
    }

    fn supports_streaming(&self) -> bool {
        self.family.supports_streaming()
    }

    fn default_sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[async_trait]
impl TTSModelsProvider for TtsFacade {
    async fn list_models(&self) -> TTSResult<Vec<ModelInfo>> {
        Ok(vec![self.get_current_model()])
    }

    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: self.model_id.clone(),
            family: self.family,
            sample_rate: self.sample_rate,
            languages: self.supported_languages(),
        }
    }

    fn supported_languages(&self) -> Vec<String> {
        vec![self.language.clone()]
    }
}
