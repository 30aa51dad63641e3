use crate::auxiliary::AuxiliaryKey;
use thiserror::Error;

/// TTS dispatch errors
#[derive(Error, Debug)]
pub enum TTSError {
    /// Identifier does not have the shape its family expects
    #[error(
        "Invalid model identifier: '{0}'\nReason: {1}\nSuggestion: GGUF models use `org/repo/file.gguf`, hub models use `org/repo`"
    )]
    InvalidModelIdentifier(String, String),

    /// Identifier is not registered
    #[error(
        "Unsupported model: '{0}'\nRegistered models: {1}\nSuggestion: Register the model before loading it"
    )]
    UnsupportedModel(String, String),

    /// Identifier registered twice
    #[error(
        "Model already registered: '{0}'\nExisting family: {1}\nSuggestion: Each model identifier may appear only once in a registry"
    )]
    DuplicateModel(String, String),

    /// Download or instantiation failure
    #[error(
        "Failed to load model '{0}'\nDetails: {1}\nSuggestion: Check network access, the hub cache and HUGGINGFACE_TOKEN"
    )]
    ModelLoad(String, String),

    /// Required auxiliary object absent
    #[error(
        "Missing required auxiliary '{0}' for model '{1}'\nSuggestion: Supply it when loading the model or as a per-call override"
    )]
    MissingRequiredAuxiliary(AuxiliaryKey, String),

    /// Model handle does not belong to the family the identifier resolves to
    #[error("Unsupported model family for '{0}'\nExpected: {1}\nFound: {2}")]
    UnsupportedFamily(String, String, String),

    /// Voice not found
    #[error("Voice not found: '{0}'\nModel: {1}\nDetails: {2}")]
    VoiceNotFound(String, String, String),

    /// Audio generation failed
    #[error(
        "Audio generation failed: {0}\nInput text length: {1} characters\nVoice: {2}\nSuggestion: Try shorter text or check model initialization"
    )]
    GenerationFailed(String, usize, String),

    /// Streaming not supported
    #[error(
        "Streaming not supported by this model\nModel: {0}\nSuggestion: Use generate_speech() instead of generate_speech_stream()"
    )]
    StreamingNotSupported(String),

    /// Other errors
    #[error("TTS error: {0}\nContext: {1}")]
    Other(String, String),
}

impl TTSError {
    pub(crate) fn generation(
        err: impl std::fmt::Display,
        text: &str,
        voice: impl Into<String>,
    ) -> Self {
        Self::GenerationFailed(err.to_string(), text.chars().count(), voice.into())
    }

    pub(crate) fn lock_poisoned(model_id: &str) -> Self {
        Self::Other(
            "model handle lock poisoned by an earlier panic".to_string(),
            model_id.to_string(),
        )
    }
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;
