//! Blocking client for OpenAI-compatible chat completion endpoints.
//!
//! The client owns the conversation history for one target: a reset
//! re-seeds the system prompt, anything else appends to the running
//! exchange. Construction never touches the network; the first request
//! goes out on the first `send`.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default endpoint for chat completion requests
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Seed message for every fresh conversation
const SYSTEM_PROMPT: &str = include_str!("../prompts/system.md");

/// Generous cap; reasoning models can take a while on long prompts
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Sampling and length parameters forwarded verbatim with each request.
///
/// `reasoning_effort` and `wire` are mutually exclusive; which one is
/// populated is decided where the executor is constructed, never here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub reasoning_effort: Option<String>,
    pub wire: Option<String>,
}

/// Connection settings for one chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub api_key: Option<String>,
    pub api_base: String,
    pub headers: HashMap<String, String>,
    pub params: GenerationParams,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],

    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    wire: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Stateful chat client. Exclusively owned by one executor, never shared.
pub struct OpenAiClient {
    options: ChatOptions,
    http: reqwest::blocking::Client,
    history: Vec<ChatMessage>,
}

impl OpenAiClient {
    pub fn new(options: ChatOptions) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            options,
            http,
            history: Vec::new(),
        })
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// Send one prompt and return the model's reply.
    ///
    /// `reset` discards the accumulated history and re-seeds the system
    /// prompt before sending. Transport and API failures propagate to the
    /// caller; the conversation keeps whatever was recorded up to the
    /// failure.
    pub fn send(&mut self, prompt: &str, reset: bool) -> Result<String> {
        if reset || self.history.is_empty() {
            self.history.clear();
            self.history.push(ChatMessage::new("system", SYSTEM_PROMPT.trim()));
        }
        self.history.push(ChatMessage::new("user", prompt));

        let request = ChatRequest {
            model: &self.options.model,
            messages: &self.history,
            temperature: self.options.params.temperature,
            top_p: self.options.params.top_p,
            max_tokens: self.options.params.max_tokens,
            reasoning_effort: self.options.params.reasoning_effort.as_deref(),
            wire: self.options.params.wire.as_deref(),
        };

        let url = format!(
            "{}/chat/completions",
            self.options.api_base.trim_end_matches('/')
        );

        let mut builder = self.http.post(&url).json(&request);
        if let Some(key) = &self.options.api_key {
            builder = builder.bearer_auth(key);
        }
        for (name, value) in &self.options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = response.json()?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        self.history.push(ChatMessage::new("assistant", &reply));
        Ok(reply)
    }
}
