use docpod_speech::TTSError;
use thiserror::Error;

/// Errors raised while turning a document into a podcast
#[derive(Error, Debug)]
pub enum PodcastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Unsupported document: '{0}'\nSuggestion: Use one of .pdf, .docx, .html, .htm, .md, .markdown, .txt or an http(s) URL"
    )]
    UnsupportedFormat(String),

    #[error("Failed to parse document: {0}")]
    DocumentParse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {0} failed with status {1}\nBody: {2}")]
    HttpStatus(String, u16, String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Script generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Speech(#[from] TTSError),

    #[error(
        "Segment sample rates differ: expected {expected} Hz, found {found} Hz\nSuggestion: Use models with the same output sample rate for every speaker"
    )]
    SampleRateMismatch { expected: u32, found: u32 },

    #[error(
        "No turn produced audio\nSuggestion: Check that the script uses the configured speaker ids and that their voices synthesize"
    )]
    EmptyPodcast,

    #[error("Failed to write WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PodcastError>;
