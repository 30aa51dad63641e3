//! # Docpod Speech
//!
//! Text-to-speech dispatch layer for the docpod pipeline.
//!
//! One call surface ([`TtsFacade`]) covers several model families with
//! different loading conventions and calling conventions. A model identifier
//! resolves through an explicit [`ModelRegistry`] to a family, whose
//! constructor builds the model handle plus its auxiliaries and whose
//! synthesizer turns `(text, voice profile)` into audio.
//!
//! ## Model Families
//!
//! - `gguf-interface`: local GGUF interface (`org/repo/file.gguf`), speaker presets
//! - `processor-conditioned`: processor + generation model (Bark)
//! - `diffusion-transformer`: description-conditioned transformer (Parler-TTS)
//! - `diffusion-transformer-multilingual`: same, with a description tokenizer
//! - `streaming-pipeline`: chunked pipeline (Kokoro), the only streaming family
//!
//! Inference runs in third-party libraries reached through the
//! [`ModelBackend`] loader trait and the handle traits in [`backend`].
//!
//! ## Features
//!
//! - `model-hf`: resolve model files from the HuggingFace hub
//! - `hf-tokenizers`: default tokenizer loading via `tokenizers`
//!
//! ## Example
//!
//! ```rust,no_run
//! use docpod_speech::{LoadOptions, ModelBackend, ModelRegistry, VoiceProfile, load_tts_model};
//! use std::sync::Arc;
//!
//! fn speak(backend: &dyn ModelBackend) -> docpod_speech::TTSResult<()> {
//!     let registry = Arc::new(ModelRegistry::builtin());
//!     let tts = load_tts_model(
//!         &registry,
//!         backend,
//!         "parler-tts/parler-tts-mini-v1",
//!         &LoadOptions::default(),
//!     )?;
//!
//!     let voice = VoiceProfile::new("Laura's voice is calm and clear.");
//!     let waveform = tts.synthesize("Welcome to the show.", &voice)?;
//!     println!("{} samples at {} Hz", waveform.len(), waveform.sample_rate);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod auxiliary;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
mod facade;
pub mod model_id;
pub mod model_source;
mod provider;
pub mod registry;
#[cfg(feature = "hf-tokenizers")]
pub mod tokenizer;
pub mod types;
pub mod waveform;

pub use adapters::{LoadedModel, ModelFamily, ModelHandle};
pub use auxiliary::{AuxiliaryArgs, AuxiliaryKey};
pub use backend::{
    ConditionalGenerationModel, GgufGenerationParams, GgufInterface, ModelBackend,
    ProcessedInputs, ProcessorConditionedModel, SpeakerPreset, SpeechPipeline, SpeechProcessor,
    TextTokenizer,
};
pub use config::{Device, LoadOptions};
pub use dispatch::{SynthesisOverrides, dispatch};
pub use error::{TTSError, TTSResult};
pub use facade::{TtsFacade, load_tts_model};
pub use model_id::ModelIdentifier;
pub use provider::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
pub use registry::{ModelRegistry, RegistryEntry};
pub use types::{AudioChunk, AudioData, ModelInfo, SpeechRequest, SpeechResponse, VoiceProfile};
pub use waveform::{ModelOutput, RawOutput, Waveform, normalize};
