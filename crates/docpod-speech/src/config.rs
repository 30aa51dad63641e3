//! Construction options for [`load_tts_model`](crate::load_tts_model)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Device a backend should place the model on.
///
/// Only forwarded to the backend; placement itself is the backend's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda(usize),
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(index) => write!(f, "cuda:{index}"),
        }
    }
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            other => other
                .strip_prefix("cuda:")
                .and_then(|index| index.parse().ok())
                .map(Device::Cuda)
                .ok_or_else(|| format!("Unknown device: {s}")),
        }
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Device {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Options passed to a model family's constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Target device (default: cpu)
    #[serde(default)]
    pub device: Device,

    /// Language of the GGUF interface configuration (default: "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Hub revision (default: main)
    #[serde(default)]
    pub revision: Option<String>,

    /// Tokenizer used for voice descriptions by multilingual models.
    /// Defaults to the model's description encoder.
    #[serde(default)]
    pub description_tokenizer: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            device: Device::default(),
            language: default_language(),
            revision: None,
            description_tokenizer: None,
        }
    }
}
