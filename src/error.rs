use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, RelayError>;
