use crate::agents::builder::{self, BuildDefaults};
use crate::agents::executor::Executor;
use crate::agents::remote::RemoteModelExecutor;
use crate::agents::session::Session;
use crate::cli::ModelFlags;
use crate::config::Config;
use crate::error::Result;
use crate::server::{ServeHandle, StdioServer};
use std::path::Path;

/// Build the serve handle from config (explicit path, else discovery) and
/// run the stdio server until input closes. Without any configured
/// agents, a single session from the model flags is served instead.
pub fn execute(config_path: Option<&Path>, flags: &ModelFlags, verbose: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => Some(Config::load(path)?),
        None => Config::discover()?,
    };

    let handle = match config {
        Some(config) if !config.agents.is_empty() || config.orchestrator.is_some() => {
            let defaults = BuildDefaults {
                api_key: flags.api_key.clone(),
                api_base: flags.api_base.clone(),
                headers: flags.parsed_headers()?,
            };
            ServeHandle::Multi(builder::build(&config, &defaults)?)
        }
        _ => {
            let executor = Executor::Remote(RemoteModelExecutor::new(flags.to_spec()?)?);
            ServeHandle::Single(Session::new(executor))
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    StdioServer::new(handle, verbose).run(stdin.lock(), stdout.lock())
}
