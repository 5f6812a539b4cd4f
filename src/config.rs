use crate::error::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file name, looked up in the working directory and (dot-prefixed)
/// in the home directory.
pub const CONFIG_FILE_NAME: &str = "agent-relay.toml";

/// Declarative description of the agents to build.
///
/// Agent names are TOML table keys, so duplicates are rejected at parse
/// time and insertion order is preserved through the [`IndexMap`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agents: IndexMap<String, AgentEntry>,

    /// When present, the built registry is wrapped with a routing session
    /// constructed from this entry. Always LLM-backed; `kind` and `role`
    /// are ignored here.
    pub orchestrator: Option<AgentEntry>,
}

/// Which executor an agent entry builds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    OpenAi,
    Python,
    Shell,
}

/// One agent definition. For `python` and `shell` kinds every field except
/// `role` is ignored.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AgentEntry {
    #[serde(default)]
    pub kind: AgentKind,

    pub model: Option<String>,

    pub api_key: Option<String>,

    pub api_base: Option<String>,

    /// Extra HTTP headers, merged key-by-key over the builder-level set
    #[serde(default)]
    pub headers: HashMap<String, String>,

    pub temperature: Option<f64>,

    /// Only honored for reasoning model identifiers
    pub reasoning_effort: Option<String>,

    /// Only honored for non-reasoning model identifiers
    pub wire: Option<String>,

    pub top_p: Option<f64>,

    pub max_tokens: Option<u32>,

    /// Human-readable purpose, shown to the routing agent. Targets
    /// without a role are dispatchable by name but never routed to.
    pub role: Option<String>,
}

impl Config {
    /// Load configuration from an explicit TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find a config file with project-then-global precedence:
    /// `./agent-relay.toml`, then `~/.agent-relay.toml`.
    pub fn discover() -> Result<Option<Self>> {
        let project = Path::new(CONFIG_FILE_NAME);
        if project.exists() {
            return Ok(Some(Self::load(project)?));
        }

        if let Some(home) = home_dir() {
            let global = home.join(format!(".{}", CONFIG_FILE_NAME));
            if global.exists() {
                return Ok(Some(Self::load(&global)?));
            }
        }

        Ok(None)
    }
}

/// Get the home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
