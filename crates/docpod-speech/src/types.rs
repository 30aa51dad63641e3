use crate::adapters::ModelFamily;
use crate::dispatch::SynthesisOverrides;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Registry identifier
    pub id: String,
    /// Model family the identifier resolves to
    pub family: ModelFamily,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Supported languages
    pub languages: Vec<String>,
}

/// Mono audio produced by a synthesis call
#[derive(Clone, Debug)]
pub struct AudioData {
    /// Samples exactly as the model produced them
    pub samples: Vec<f32>,
    /// Number of audio channels (always 1 for generated speech)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as f64 / self.sample_rate as f64 * 1000.0) as u64
    }
}

impl Serialize for AudioData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AudioData", 3)?;

        // f32 little-endian, base64 encoded
        let bytes: Vec<u8> = self.samples.iter().flat_map(|f| f.to_le_bytes()).collect();
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);

        state.serialize_field("samples", &encoded)?;
        state.serialize_field("channels", &self.channels)?;
        state.serialize_field("sample_rate", &self.sample_rate)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for AudioData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct AudioDataHelper {
            samples: String,
            channels: usize,
            sample_rate: u32,
        }

        let helper = AudioDataHelper::deserialize(deserializer)?;
        let bytes =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &helper.samples)
                .map_err(serde::de::Error::custom)?;
        if bytes.len() % 4 != 0 {
            return Err(serde::de::Error::custom(format!(
                "sample payload of {} bytes is not a whole number of f32 values",
                bytes.len()
            )));
        }

        let samples = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(AudioData {
            samples,
            channels: helper.channels,
            sample_rate: helper.sample_rate,
        })
    }
}

/// Caller-supplied voice selection.
///
/// The meaning depends on the model family: a preset name for GGUF
/// interfaces, a `voice_preset` for processor models, a natural-language
/// description for diffusion-transformer models and a voice name for
/// pipelines. Nothing in the dispatch layer looks inside it; only the
/// per-family synthesizer consumes it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct VoiceProfile(String);

impl VoiceProfile {
    pub fn new(profile: impl Into<String>) -> Self {
        Self(profile.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VoiceProfile {
    fn from(profile: String) -> Self {
        Self::new(profile)
    }
}

impl From<&str> for VoiceProfile {
    fn from(profile: &str) -> Self {
        Self::new(profile)
    }
}

/// Speech generation request
#[derive(Clone, Debug)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: VoiceProfile,
    pub overrides: SynthesisOverrides,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<VoiceProfile>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            overrides: SynthesisOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: SynthesisOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Speech generation response
#[derive(Clone, Debug)]
pub struct SpeechResponse {
    pub audio: AudioData,
    pub text: String,
    pub duration_ms: u64,
}

/// Audio chunk for streaming TTS
#[derive(Clone, Debug)]
pub struct AudioChunk {
    pub samples: Vec<f32>,
    pub is_final: bool,
}
