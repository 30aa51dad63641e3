//! Podcast configuration, speakers and the script-writer prompt.

use crate::error::{PodcastError, Result};
use crate::preprocessing::is_supported_source;
use docpod_speech::ModelRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SPEAKERS_PLACEHOLDER: &str = "{SPEAKERS}";

pub const DEFAULT_TEXT_TO_TEXT_MODEL: &str =
    "allenai/OLMoE-1B-7B-0924-Instruct-GGUF/olmoe-1b-7b-0924-instruct-q8_0.gguf";

pub const DEFAULT_TEXT_TO_SPEECH_MODEL: &str = "parler-tts/parler-tts-mini-v1";

pub const DEFAULT_PROMPT: &str = r#"
You are a podcast scriptwriter generating engaging and natural-sounding conversations in JSON format.
The script features the following speakers:
{SPEAKERS}
Instructions:
- Write dynamic, easy-to-follow dialogue.
- Include natural interruptions and interjections.
- Avoid repetitive phrasing between speakers.
- Format output as a JSON conversation.
Example:
{
  "Speaker 1": "Welcome to our podcast! Today, we're exploring...",
  "Speaker 2": "Hi! I'm excited to hear about this. Can you explain...",
  "Speaker 1": "Sure! Imagine it like this...",
  "Speaker 2": "Oh, that's cool! But how does..."
}
"#;

/// A podcast voice: who speaks in the script and how they should sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Voice profile handed to the TTS model
    pub tone: String,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Speaker {}. Named {}. {}",
            self.id, self.name, self.description
        )
    }
}

pub fn default_speakers() -> Vec<Speaker> {
    vec![
        Speaker {
            id: 1,
            name: "Laura".to_string(),
            description: "The main host. She explains topics clearly using anecdotes and analogies, teaching in an engaging and captivating way."
                .to_string(),
            tone: "Laura's voice is exciting and fast in delivery with very clear audio and no background noise."
                .to_string(),
        },
        Speaker {
            id: 2,
            name: "Jon".to_string(),
            description: "The co-host. He keeps the conversation on track, asks curious follow-up questions, and reacts with excitement or confusion, often using interjections like hmm or umm."
                .to_string(),
            tone: "Jon's voice is calm with very clear audio and no background noise.".to_string(),
        },
    ]
}

/// Substitute `{SPEAKERS}` with one speaker per line.
pub fn render_prompt(prompt: &str, speakers: &[Speaker]) -> String {
    let speakers = speakers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    prompt.replace(SPEAKERS_PLACEHOLDER, &speakers)
}

fn default_text_to_text_model() -> String {
    DEFAULT_TEXT_TO_TEXT_MODEL.to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_text_to_speech_model() -> String {
    DEFAULT_TEXT_TO_SPEECH_MODEL.to_string()
}

fn default_silence_gap() -> f32 {
    0.5
}

/// Podcast generation settings, read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Local document path or http(s) URL
    pub input_file: String,

    pub output_folder: PathBuf,

    /// GGUF model of the script writer, as `owner/repo/file.gguf`
    #[serde(default = "default_text_to_text_model")]
    pub text_to_text_model: String,

    /// System prompt; must contain `{SPEAKERS}`
    #[serde(default = "default_prompt")]
    pub text_to_text_prompt: String,

    /// Registered TTS model identifier
    #[serde(default = "default_text_to_speech_model")]
    pub text_to_speech_model: String,

    #[serde(default = "default_speakers")]
    pub speakers: Vec<Speaker>,

    /// Silence inserted between turns, in seconds (default: 0.5)
    #[serde(default = "default_silence_gap")]
    pub silence_gap_secs: f32,
}

impl PodcastConfig {
    pub fn new(input_file: impl Into<String>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_folder: output_folder.into(),
            text_to_text_model: default_text_to_text_model(),
            text_to_text_prompt: default_prompt(),
            text_to_speech_model: default_text_to_speech_model(),
            speakers: default_speakers(),
            silence_gap_secs: default_silence_gap(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str, registry: &ModelRegistry) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate(registry)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>, registry: &ModelRegistry) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, registry)
    }

    pub fn validate(&self, registry: &ModelRegistry) -> Result<()> {
        if !is_supported_source(&self.input_file) {
            return Err(PodcastError::InvalidConfig(format!(
                "input_file '{}' must be a .pdf, .docx, .html, .htm, .md, .markdown or .txt file, or a URL",
                self.input_file
            )));
        }

        if self.text_to_text_model.split('/').count() != 3 {
            return Err(PodcastError::InvalidConfig(
                "text_to_text_model must be formatted as `owner/repo/file`".to_string(),
            ));
        }
        if !self.text_to_text_model.ends_with(".gguf") {
            return Err(PodcastError::InvalidConfig(
                "text_to_text_model must be a gguf file".to_string(),
            ));
        }

        if !self.text_to_text_prompt.contains(SPEAKERS_PLACEHOLDER) {
            return Err(PodcastError::InvalidConfig(
                "text_to_text_prompt must contain `{SPEAKERS}` placeholder".to_string(),
            ));
        }

        if !registry.contains(&self.text_to_speech_model) {
            return Err(PodcastError::InvalidConfig(format!(
                "text_to_speech_model '{}' is not registered; available: {}",
                self.text_to_speech_model,
                registry.model_ids().join(", ")
            )));
        }

        if self.speakers.is_empty() {
            return Err(PodcastError::InvalidConfig(
                "at least one speaker is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.speakers.iter().find(|s| !seen.insert(s.id)) {
            return Err(PodcastError::InvalidConfig(format!(
                "speaker id {} is used more than once",
                duplicate.id
            )));
        }

        if !self.silence_gap_secs.is_finite() || self.silence_gap_secs < 0.0 {
            return Err(PodcastError::InvalidConfig(
                "silence_gap_secs must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    /// Script-writer system prompt with the speakers filled in.
    pub fn system_prompt(&self) -> String {
        render_prompt(self.text_to_text_prompt.trim(), &self.speakers)
    }

    pub fn speaker(&self, id: u32) -> Option<&Speaker> {
        self.speakers.iter().find(|speaker| speaker.id == id)
    }
}
