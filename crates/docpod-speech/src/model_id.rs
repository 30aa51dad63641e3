//! Parsing of hub-style model identifiers.

use crate::error::{TTSError, TTSResult};

/// A parsed `org/repo` or `org/repo/file` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIdentifier {
    org: String,
    repo: String,
    filename: Option<String>,
}

impl ModelIdentifier {
    /// Parse a three-part `org/repo/filename` identifier (GGUF models).
    pub fn parse_gguf(model_id: &str) -> TTSResult<Self> {
        let parts = split_segments(model_id, 3)?;
        let filename = parts[2].to_string();
        if !filename.ends_with(".gguf") {
            return Err(TTSError::InvalidModelIdentifier(
                model_id.to_string(),
                "filename must be a .gguf file".to_string(),
            ));
        }
        Ok(Self {
            org: parts[0].to_string(),
            repo: parts[1].to_string(),
            filename: Some(filename),
        })
    }

    /// Parse a two-part `org/repo` identifier.
    pub fn parse_repo(model_id: &str) -> TTSResult<Self> {
        let parts = split_segments(model_id, 2)?;
        Ok(Self {
            org: parts[0].to_string(),
            repo: parts[1].to_string(),
            filename: None,
        })
    }

    /// `org/repo`
    pub fn repo_id(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

impl std::fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.filename {
            Some(filename) => write!(f, "{}/{}/{}", self.org, self.repo, filename),
            None => write!(f, "{}/{}", self.org, self.repo),
        }
    }
}

fn split_segments(model_id: &str, expected: usize) -> TTSResult<Vec<&str>> {
    let parts: Vec<&str> = model_id.split('/').collect();
    if parts.len() != expected {
        return Err(TTSError::InvalidModelIdentifier(
            model_id.to_string(),
            format!("expected {} segments, found {}", expected, parts.len()),
        ));
    }
    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(TTSError::InvalidModelIdentifier(
            model_id.to_string(),
            "segments must not be empty".to_string(),
        ));
    }
    Ok(parts)
}
