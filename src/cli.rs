use crate::agents::remote::{RemoteSpec, DEFAULT_MODEL};
use crate::error::{RelayError, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

/// Model and endpoint flags shared by every LLM-facing command.
#[derive(Args, Debug, Clone)]
pub struct ModelFlags {
    /// Model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key (falls back to the environment)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Endpoint base URL override
    #[arg(long)]
    pub api_base: Option<String>,

    /// Extra HTTP header as KEY=VALUE (repeatable)
    #[arg(long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Effort hint, honored by reasoning models only
    #[arg(long)]
    pub reasoning_effort: Option<String>,

    /// Wire mode hint, honored by non-reasoning models only
    #[arg(long)]
    pub wire: Option<String>,

    /// Nucleus sampling value
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Maximum output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl ModelFlags {
    /// Parse repeated `--header KEY=VALUE` flags into a map.
    pub fn parsed_headers(&self) -> Result<HashMap<String, String>> {
        let mut headers = HashMap::new();
        for raw in &self.headers {
            let Some((key, value)) = raw.split_once('=') else {
                return Err(RelayError::InvalidConfig(format!(
                    "invalid header '{}', expected KEY=VALUE",
                    raw
                )));
            };
            headers.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(headers)
    }

    /// Turn the flags into executor construction inputs.
    pub fn to_spec(&self) -> Result<RemoteSpec> {
        Ok(RemoteSpec {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            headers: self.parsed_headers()?,
            temperature: self.temperature,
            reasoning_effort: self.reasoning_effort.clone(),
            wire: self.wire.clone(),
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Parser, Debug)]
#[command(name = "agent-relay")]
#[command(about = "Route prompts to model, python, and shell agents", long_about = None)]
#[command(version = env!("AGENT_RELAY_VERSION"))]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask once with PROMPT and print the reply
    Run {
        prompt: String,

        #[command(flatten)]
        model: ModelFlags,
    },

    /// Interactive chat session in the current terminal
    Chat {
        #[command(flatten)]
        model: ModelFlags,
    },

    /// Full-screen chat interface
    Tui {
        #[command(flatten)]
        model: ModelFlags,
    },

    /// Serve chat tools over stdio
    Serve {
        /// Path to an agent configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        model: ModelFlags,
    },
}
