//! The remote-model executor and its construction policy.

use crate::error::Result;
use crate::openai::{ChatOptions, GenerationParams, OpenAiClient, DEFAULT_API_BASE};
use std::collections::HashMap;

/// Model used when no identifier is configured anywhere
pub const DEFAULT_MODEL: &str = "codex-mini-latest";

/// Environment variable consulted when no credential is configured
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Raw inputs for one remote-model executor, before fallbacks and
/// model-conditioned parameter selection are applied.
#[derive(Debug, Clone, Default)]
pub struct RemoteSpec {
    pub model: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub headers: HashMap<String, String>,
    pub temperature: Option<f64>,
    pub reasoning_effort: Option<String>,
    pub wire: Option<String>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// Stateful executor backed by a remote chat endpoint.
pub struct RemoteModelExecutor {
    client: OpenAiClient,
}

impl RemoteModelExecutor {
    /// Resolve fallbacks and build the owned client. No network I/O
    /// happens here; the first request goes out on the first `execute`.
    pub fn new(spec: RemoteSpec) -> Result<Self> {
        let params = resolve_params(&spec);
        let options = ChatOptions {
            api_key: spec.api_key.or_else(|| std::env::var(API_KEY_ENV).ok()),
            api_base: spec
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            headers: spec.headers,
            model: spec.model,
            params,
        };

        Ok(Self {
            client: OpenAiClient::new(options)?,
        })
    }

    /// Send the prompt through the owned client. `reset_context` discards
    /// prior conversation state first. Failures propagate untouched; there
    /// is no retry at this layer.
    pub fn execute(&mut self, prompt: &str, reset_context: bool) -> Result<String> {
        self.client.send(prompt, reset_context)
    }

    pub(crate) fn options(&self) -> &ChatOptions {
        self.client.options()
    }
}

/// Model identifiers starting with "o" name reasoning model families and
/// take `reasoning_effort`; every other identifier takes `wire` instead.
/// The hints are mutually exclusive, selected purely by the leading
/// character. No other identifiers are special-cased.
fn resolve_params(spec: &RemoteSpec) -> GenerationParams {
    let mut params = GenerationParams {
        temperature: spec.temperature,
        top_p: spec.top_p,
        max_tokens: spec.max_tokens,
        reasoning_effort: None,
        wire: None,
    };

    if spec.model.starts_with('o') {
        params.reasoning_effort = spec.reasoning_effort.clone();
    } else {
        params.wire = spec.wire.clone();
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasoning_model_takes_effort_hint() {
        let params = resolve_params(&RemoteSpec {
            model: "o-model".to_string(),
            reasoning_effort: Some("high".to_string()),
            temperature: Some(0.5),
            ..Default::default()
        });

        assert_eq!(params.reasoning_effort.as_deref(), Some("high"));
        assert_eq!(params.temperature, Some(0.5));
        assert!(params.wire.is_none());
    }

    #[test]
    fn test_reasoning_model_ignores_wire_hint() {
        let params = resolve_params(&RemoteSpec {
            model: "o-model".to_string(),
            wire: Some("mode2".to_string()),
            ..Default::default()
        });

        assert!(params.wire.is_none());
        assert!(params.reasoning_effort.is_none());
    }

    #[test]
    fn test_other_model_takes_wire_hint() {
        let params = resolve_params(&RemoteSpec {
            model: "x-model".to_string(),
            wire: Some("mode2".to_string()),
            reasoning_effort: Some("high".to_string()),
            ..Default::default()
        });

        assert_eq!(params.wire.as_deref(), Some("mode2"));
        assert!(params.reasoning_effort.is_none());
    }

    #[test]
    fn test_passthrough_params_survive_either_branch() {
        let params = resolve_params(&RemoteSpec {
            model: "x-model".to_string(),
            top_p: Some(0.7),
            max_tokens: Some(50),
            ..Default::default()
        });

        assert_eq!(params.top_p, Some(0.7));
        assert_eq!(params.max_tokens, Some(50));
    }

    #[test]
    fn test_api_base_defaults() {
        let executor = RemoteModelExecutor::new(RemoteSpec {
            model: "m1".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(executor.options().api_base, DEFAULT_API_BASE);

        let executor = RemoteModelExecutor::new(RemoteSpec {
            model: "m1".to_string(),
            api_base: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(executor.options().api_base, "http://localhost:11434/v1");
    }
}
