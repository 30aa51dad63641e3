//! GGUF interface family (OuteTTS).
//!
//! Identifiers are `org/repo/file.gguf`; the file is resolved through the
//! backend (hub download by default) and handed to the backend's loader.

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
    let identifier = ModelIdentifier::parse_gguf(model_id)?;
    let filename = identifier.filename().ok_or_else(|| {
        TTSError::InvalidModelIdentifier(model_id.to_string(), "missing filename".to_string())
    })?;

    let model_path = backend.resolve_model_file(&identifier.repo_id(), filename, options)?;
    log::debug!("loading GGUF interface {} from {}", model_id, model_path.display());
    let interface = backend.load_gguf_interface(model_id, model_path, options)?;

    LoadedModel::new(model_id, ModelHandle::gguf(interface), AuxiliaryArgs::new())
}

pub(crate) fn synthesize(call: &SynthesisCall<'_>) -> TTSResult<RawOutput> {
    let ModelHandle::Gguf(interface) = call.model else {
        return Err(call.family_mismatch(ModelFamily::GgufInterface));
    };
    let mut interface = interface
        .lock()
        .map_err(|_| TTSError::lock_poisoned(call.model_id))?;

    let speaker = interface.load_default_speaker(call.voice.as_str())?;
    let params = call.overrides.gguf_params();
    let output = interface.generate(call.text, &speaker, &params)?;

    Ok(RawOutput::Wrapped(output))
}
