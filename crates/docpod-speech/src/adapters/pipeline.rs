//! Streaming pipeline family (Kokoro): a callable pipeline yields chunks.

use super::{LoadedModel, ModelFamily, ModelHandle};
use crate::auxiliary::AuxiliaryArgs;
use crate::backend::{ModelBackend, SpeechPipeline};
use crate::config::LoadOptions;
use crate::dispatch::SynthesisCall;
use crate::error::{TTSError, TTSResult};
use crate::model_id::ModelIdentifier;
use crate::types::AudioChunk;
use crate::waveform::{RawOutput, squeeze};
use std::sync::{Arc, Mutex};
use tokio_stream::wrappers::UnboundedReceiverStream;

pub(crate) fn construct(
    model_id: &str,
    options: &LoadOptions,
    backend: &dyn ModelBackend,
) -> TTSResult<LoadedModel> {
    ModelIdentifier::parse_repo(model_id)?;
    let pipeline = backend.load_pipeline(model_id, options)?;

    LoadedModel::new(model_id, ModelHandle::pipeline(pipeline), AuxiliaryArgs::new())
}

pub(crate) fn synthesize(call: &SynthesisCall<'_>) -> TTSResult<RawOutput> {
    let ModelHandle::Pipeline(pipeline) = call.model else {
        return Err(call.family_mismatch(ModelFamily::StreamingPipeline));
    };
    let mut pipeline = pipeline
        .lock()
        .map_err(|_| TTSError::lock_poisoned(call.model_id))?;

    let chunks = pipeline
        .run(call.text, call.voice.as_str())?
        .collect::<TTSResult<Vec<_>>>()?;

    Ok(RawOutput::Chunks(chunks))
}

/// Run the pipeline on a blocking thread, forwarding chunks in order.
///
/// The pipeline lock is held until the last chunk has been produced.
pub(crate) fn stream(
    pipeline: Arc<Mutex<Box<dyn SpeechPipeline>>>,
    model_id: String,
    text: String,
    voice: String,
) -> UnboundedReceiverStream<TTSResult<AudioChunk>> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut guard = match pipeline.lock() {
            Ok(guard) => guard,
            Err(_) => {
                let _ = tx.send(Err(TTSError::lock_poisoned(&model_id)));
                return;
            }
        };

        let mut chunks = match guard.run(&text, &voice) {
            Ok(chunks) => chunks.peekable(),
            Err(err) => {
                let _ = tx.send(Err(err));
                return;
            }
        };

        while let Some(result) = chunks.next() {
            let is_final = chunks.peek().is_none();
            let chunk = result.map(|tensor| AudioChunk {
                samples: squeeze(&tensor).to_vec(),
                is_final,
            });
            let failed = chunk.is_err();
            // receiver dropped: stop generating
            if tx.send(chunk).is_err() || failed {
                break;
            }
        }
    });

    UnboundedReceiverStream::new(rx)
}
