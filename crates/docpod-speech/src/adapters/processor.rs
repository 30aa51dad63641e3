//! Processor-conditioned family (Bark): a processor builds model features
//! from the text and a voice preset.

use super::{LoadedModel, ModelFamily, ModelHandle};
use crate::auxiliary::AuxiliaryArgs;
use crate::backend::ModelBackend;
use crate::config::LoadOptions;
use crate::dispatch::SynthesisCall;
use crate::error::{TTSError, TTSResult};
use crate::model_id::ModelIdentifier;
use crate::waveform::RawOutput;

pub(crate) fn construct(
    model_id: &str,
    options: &LoadOptions,
    backend: &dyn ModelBackend,
) -> TTSResult<LoadedModel> {
    ModelIdentifier::parse_repo(model_id)?;
    let model = backend.load_processor_model(model_id, options)?;
    let processor = backend.load_processor(model_id, options)?;

    LoadedModel::new(
        model_id,
        ModelHandle::processor(model),
        AuxiliaryArgs::new().with_processor(processor),
    )
}

pub(crate) fn synthesize(call: &SynthesisCall<'_>) -> TTSResult<RawOutput> {
    let processor = call.auxiliary.require_processor(call.model_id)?;
    let ModelHandle::Processor(model) = call.model else {
        return Err(call.family_mismatch(ModelFamily::ProcessorConditioned));
    };

    let inputs = processor.process(call.text, call.voice.as_str())?;

    let mut model = model
        .lock()
        .map_err(|_| TTSError::lock_poisoned(call.model_id))?;
    let generation = model.generate(&inputs)?;

    Ok(RawOutput::Tensor(generation))
}
