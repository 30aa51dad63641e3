//! Script generation through a chat-completion model.

use crate::error::{PodcastError, Result};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::time::Duration;

/// Roughly four characters per token.
pub const CHARS_PER_TOKEN: usize = 4;

pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Chat model turning the cleaned document into a script.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Stream the completion of `input` under `system_prompt`, chunk by chunk.
    async fn chat_stream(&self, system_prompt: &str, input: &str) -> Result<TextStream>;
}

/// Keep at most `n_ctx * 4` characters of `text`.
pub fn truncate_to_context(text: &str, n_ctx: usize) -> &str {
    let max_characters = n_ctx.saturating_mul(CHARS_PER_TOKEN);
    match text.char_indices().nth(max_characters) {
        Some((cut, _)) => {
            log::warn!(
                "Input text is too big ({}). Using only a subset of it ({}).",
                text.chars().count(),
                max_characters
            );
            &text[..cut]
        }
        None => text,
    }
}

/// Collects streamed chunks and hands out complete lines.
#[derive(Debug, Default)]
pub struct ScriptAccumulator {
    script: String,
    pending: String,
}

impl ScriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk; returns the buffered text once it ends with a newline.
    pub fn push(&mut self, chunk: &str) -> Option<String> {
        self.script.push_str(chunk);
        self.pending.push_str(chunk);
        if self.pending.ends_with('\n') {
            Some(std::mem::take(&mut self.pending))
        } else {
            None
        }
    }

    /// Text received since the last complete line.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn into_script(self) -> String {
        self.script
    }
}

/// Run `generator` to completion and return the full script.
///
/// `on_line` sees every completed line as it arrives.
pub async fn generate_script(
    generator: &dyn TextGenerator,
    system_prompt: &str,
    input: &str,
    mut on_line: impl FnMut(&str),
) -> Result<String> {
    let mut stream = generator.chat_stream(system_prompt, input).await?;
    let mut accumulator = ScriptAccumulator::new();
    while let Some(chunk) = stream.next().await {
        if let Some(line) = accumulator.push(&chunk?) {
            on_line(&line);
        }
    }
    if !accumulator.pending().is_empty() {
        on_line(accumulator.pending());
    }
    Ok(accumulator.into_script())
}

/// Client settings of an OpenAI-compatible chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiCompatibleConfig {
    /// Server root, e.g. `http://localhost:8080` for a llama.cpp server
    pub base_url: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    600
}

impl OpenAiCompatibleConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Streams completions from any `/v1/chat/completions` server.
pub struct OpenAiCompatibleGenerator {
    client: reqwest::Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleGenerator {
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

/// Content of one server-sent event, `None` for keep-alives and empty deltas.
fn delta_content(data: &str) -> Option<String> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data).ok()?;
    chunk
        .choices
        .into_iter()
        .next()?
        .delta
        .content
        .filter(|content| !content.is_empty())
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    async fn chat_stream(&self, system_prompt: &str, input: &str) -> Result<TextStream> {
        let url = self.config.completions_url();
        let request = ChatCompletionRequest {
            model: self.config.model.as_deref(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            stream: true,
        };

        let mut req_builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(PodcastError::HttpStatus(url, status, body));
        }

        let stream = response
            .bytes_stream()
            .eventsource()
            .take_while(|event| {
                let done = matches!(event, Ok(event) if event.data.trim() == "[DONE]");
                futures::future::ready(!done)
            })
            .filter_map(|event| {
                let item = match event {
                    Ok(event) => delta_content(&event.data).map(Ok),
                    Err(e) => Some(Err(PodcastError::Generation(format!("Stream error: {e}")))),
                };
                futures::future::ready(item)
            });

        Ok(Box::pin(stream))
    }
}
