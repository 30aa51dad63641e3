//! Routing of a synthesis call to its family's synthesizer.

use crate::adapters::{ModelFamily, ModelHandle};
use crate::auxiliary::AuxiliaryArgs;
use crate::backend::GgufGenerationParams;
use crate::error::{TTSError, TTSResult};
use crate::registry::ModelRegistry;
use crate::types::VoiceProfile;
use crate::waveform::RawOutput;

/// Per-call values layered over what the facade stores.
///
/// Each populated field wins for a single call only.
#[derive(Clone, Debug, Default)]
pub struct SynthesisOverrides {
    /// Auxiliaries replacing stored ones, key by key
    pub auxiliary: AuxiliaryArgs,
    pub temperature: Option<f32>,
    pub repetition_penalty: Option<f32>,
    pub max_length: Option<usize>,
}

impl SynthesisOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auxiliary(mut self, auxiliary: AuxiliaryArgs) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_repetition_penalty(mut self, penalty: f32) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// GGUF sampling parameters with overrides applied to the defaults.
    pub fn gguf_params(&self) -> GgufGenerationParams {
        let defaults = GgufGenerationParams::default();
        GgufGenerationParams {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            repetition_penalty: self
                .repetition_penalty
                .unwrap_or(defaults.repetition_penalty),
            max_length: self.max_length.unwrap_or(defaults.max_length),
        }
    }
}

/// Everything a synthesizer receives for one call.
pub struct SynthesisCall<'a> {
    pub model_id: &'a str,
    pub text: &'a str,
    pub model: &'a ModelHandle,
    pub voice: &'a VoiceProfile,
    /// Stored auxiliaries with per-call overrides applied
    pub auxiliary: AuxiliaryArgs,
    pub overrides: &'a SynthesisOverrides,
}

impl SynthesisCall<'_> {
    pub(crate) fn family_mismatch(&self, expected: ModelFamily) -> TTSError {
        TTSError::UnsupportedFamily(
            self.model_id.to_string(),
            expected.handle_kind().to_string(),
            self.model.kind().to_string(),
        )
    }
}

/// Synthesize `text` with the synthesizer registered for `model_id`.
///
/// The handle is not checked against the family up front; each synthesizer
/// validates the handle and its required auxiliaries when it runs.
pub fn dispatch(
    registry: &ModelRegistry,
    model_id: &str,
    text: &str,
    model: &ModelHandle,
    voice: &VoiceProfile,
    auxiliary: &AuxiliaryArgs,
    overrides: &SynthesisOverrides,
) -> TTSResult<RawOutput> {
    let entry = registry.resolve(model_id)?;
    log::debug!(
        "dispatching {} characters to {} ({})",
        text.chars().count(),
        model_id,
        entry.family()
    );

    let call = SynthesisCall {
        model_id,
        text,
        model,
        voice,
        auxiliary: auxiliary.merged(&overrides.auxiliary),
        overrides,
    };
    (entry.synthesizer())(&call)
}
