//! Auxiliary objects a family needs beyond the model itself.

use crate::backend::{SpeechProcessor, TextTokenizer};
use crate::error::{TTSError, TTSResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of an auxiliary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryKey {
    Tokenizer,
    DescriptionTokenizer,
    Processor,
}

impl AuxiliaryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuxiliaryKey::Tokenizer => "tokenizer",
            AuxiliaryKey::DescriptionTokenizer => "description_tokenizer",
            AuxiliaryKey::Processor => "processor",
        }
    }
}

impl std::fmt::Display for AuxiliaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auxiliary objects stored on a facade or supplied per call.
#[derive(Clone, Default)]
pub struct AuxiliaryArgs {
    pub tokenizer: Option<Arc<dyn TextTokenizer>>,
    pub description_tokenizer: Option<Arc<dyn TextTokenizer>>,
    pub processor: Option<Arc<dyn SpeechProcessor>>,
}

impl AuxiliaryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn TextTokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_description_tokenizer(mut self, tokenizer: Arc<dyn TextTokenizer>) -> Self {
        self.description_tokenizer = Some(tokenizer);
        self
    }

    pub fn with_processor(mut self, processor: Arc<dyn SpeechProcessor>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn contains(&self, key: AuxiliaryKey) -> bool {
        match key {
            AuxiliaryKey::Tokenizer => self.tokenizer.is_some(),
            AuxiliaryKey::DescriptionTokenizer => self.description_tokenizer.is_some(),
            AuxiliaryKey::Processor => self.processor.is_some(),
        }
    }

    /// Keys currently populated.
    pub fn keys(&self) -> Vec<AuxiliaryKey> {
        [
            AuxiliaryKey::Tokenizer,
            AuxiliaryKey::DescriptionTokenizer,
            AuxiliaryKey::Processor,
        ]
        .into_iter()
        .filter(|key| self.contains(*key))
        .collect()
    }

    /// Layer `overrides` on top of `self`, key by key, into a new value.
    pub fn merged(&self, overrides: &AuxiliaryArgs) -> AuxiliaryArgs {
        AuxiliaryArgs {
            tokenizer: overrides.tokenizer.clone().or_else(|| self.tokenizer.clone()),
            description_tokenizer: overrides
                .description_tokenizer
                .clone()
                .or_else(|| self.description_tokenizer.clone()),
            processor: overrides.processor.clone().or_else(|| self.processor.clone()),
        }
    }

    /// Fail on the first key of `required` that is absent.
    pub fn ensure(&self, required: &[AuxiliaryKey], model_id: &str) -> TTSResult<()> {
        match required.iter().find(|key| !self.contains(**key)) {
            Some(key) => Err(TTSError::MissingRequiredAuxiliary(*key, model_id.to_string())),
            None => Ok(()),
        }
    }

    pub(crate) fn require_tokenizer(&self, model_id: &str) -> TTSResult<&Arc<dyn TextTokenizer>> {
        self.tokenizer.as_ref().ok_or_else(|| {
            TTSError::MissingRequiredAuxiliary(AuxiliaryKey::Tokenizer, model_id.to_string())
        })
    }

    pub(crate) fn require_description_tokenizer(
        &self,
        model_id: &str,
    ) -> TTSResult<&Arc<dyn TextTokenizer>> {
        self.description_tokenizer.as_ref().ok_or_else(|| {
            TTSError::MissingRequiredAuxiliary(
                AuxiliaryKey::DescriptionTokenizer,
                model_id.to_string(),
            )
        })
    }

    pub(crate) fn require_processor(&self, model_id: &str) -> TTSResult<&Arc<dyn SpeechProcessor>> {
        self.processor.as_ref().ok_or_else(|| {
            TTSError::MissingRequiredAuxiliary(AuxiliaryKey::Processor, model_id.to_string())
        })
    }
}

impl std::fmt::Debug for AuxiliaryArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxiliaryArgs")
            .field("keys", &self.keys())
            .finish()
    }
}
