//! Description-conditioned transformer families (Parler-TTS).
//!
//! The voice profile is a natural-language description encoded as the
//! conditioning input; the text is encoded as the prompt. The single
//! tokenizer variant encodes both with one tokenizer, the multilingual
//! variant encodes the description with a dedicated tokenizer.

use super::{LoadedModel, ModelFamily, ModelHandle};
use crate::auxiliary::AuxiliaryArgs;
use crate::backend::{ModelBackend, TextTokenizer};
use crate::config::LoadOptions;
use crate::dispatch::SynthesisCall;
use crate::error::{TTSError, TTSResult};
use crate::model_id::ModelIdentifier;
use crate::waveform::RawOutput;
use std::sync::Arc;

pub(crate) fn construct(
    model_id: &str,
    options: &LoadOptions,
    backend: &dyn ModelBackend,
) -> TTSResult<LoadedModel> {
    ModelIdentifier::parse_repo(model_id)?;
    let model = backend.load_conditional_generation(model_id, options)?;
    let tokenizer = backend.load_tokenizer(model_id, options)?;

    LoadedModel::new(
        model_id,
        ModelHandle::conditional(model),
        AuxiliaryArgs::new().with_tokenizer(tokenizer),
    )
}

pub(crate) fn construct_multilingual(
    model_id: &str,
    options: &LoadOptions,
    backend: &dyn ModelBackend,
) -> TTSResult<LoadedModel> {
    ModelIdentifier::parse_repo(model_id)?;
    let model = backend.load_conditional_generation(model_id, options)?;
    let tokenizer = backend.load_tokenizer(model_id, options)?;

    let description_id = options
        .description_tokenizer
        .clone()
        .or_else(|| model.description_encoder_id())
        .unwrap_or_else(|| model_id.to_string());
    log::debug!("{} encodes voice descriptions with {}", model_id, description_id);
    let description_tokenizer = backend.load_tokenizer(&description_id, options)?;

    LoadedModel::new(
        model_id,
        ModelHandle::conditional(model),
        AuxiliaryArgs::new()
            .with_tokenizer(tokenizer)
            .with_description_tokenizer(description_tokenizer),
    )
}

pub(crate) fn synthesize(call: &SynthesisCall<'_>) -> TTSResult<RawOutput> {
    let tokenizer = call.auxiliary.require_tokenizer(call.model_id)?;
    generate(call, ModelFamily::DiffusionTransformer, tokenizer, tokenizer)
}

pub(crate) fn synthesize_multilingual(call: &SynthesisCall<'_>) -> TTSResult<RawOutput> {
    let tokenizer = call.auxiliary.require_tokenizer(call.model_id)?;
    let description_tokenizer = call.auxiliary.require_description_tokenizer(call.model_id)?;
    generate(
        call,
        ModelFamily::DiffusionTransformerMultilingual,
        description_tokenizer,
        tokenizer,
    )
}

fn generate(
    call: &SynthesisCall<'_>,
    family: ModelFamily,
    description_tokenizer: &Arc<dyn TextTokenizer>,
    prompt_tokenizer: &Arc<dyn TextTokenizer>,
) -> TTSResult<RawOutput> {
    let ModelHandle::Conditional(model) = call.model else {
        return Err(call.family_mismatch(family));
    };

    let input_ids = description_tokenizer.encode(call.voice.as_str())?;
    let prompt_input_ids = prompt_tokenizer.encode(call.text)?;

    let mut model = model
        .lock()
        .map_err(|_| TTSError::lock_poisoned(call.model_id))?;
    let generation = model.generate(&input_ids, &prompt_input_ids)?;

    Ok(RawOutput::Tensor(generation))
}
