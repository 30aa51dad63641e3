//! `tokenizers`-backed [`TextTokenizer`].

use crate::backend::TextTokenizer;
use crate::error::{TTSError, TTSResult};
use crate::model_source::ModelSource;
use std::path::Path;
use tokenizers::Tokenizer;

pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: impl AsRef<Path>) -> TTSResult<Self> {
        let path = path.as_ref();
        let inner = Tokenizer::from_file(path).map_err(|e| {
            TTSError::ModelLoad(
                path.display().to_string(),
                format!("Failed to load tokenizer: {e}"),
            )
        })?;
        Ok(Self { inner })
    }

    /// Fetch `tokenizer.json` of a hub repository and load it.
    pub fn from_pretrained(repo_id: &str, revision: Option<&str>) -> TTSResult<Self> {
        let mut source = ModelSource::from_hf(repo_id, "tokenizer.json");
        if let Some(revision) = revision {
            source = source.with_revision(revision);
        }
        let path = source
            .resolve()
            .map_err(|e| TTSError::ModelLoad(repo_id.to_string(), e.to_string()))?;
        Self::from_file(path)
    }
}

impl TextTokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> TTSResult<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| TTSError::Other(format!("Tokenization failed: {e}"), text.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }
}
