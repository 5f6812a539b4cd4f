#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use agent_relay::cli::{Cli, Commands};
use agent_relay::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { prompt, model } => {
            commands::run::execute(prompt, model)?;
        }
        Commands::Chat { model } => {
            commands::chat::execute(model)?;
        }
        Commands::Tui { model } => {
            commands::tui::execute(model)?;
        }
        Commands::Serve { config, model } => {
            commands::serve::execute(config.as_deref(), model, cli.verbose)?;
        }
    }

    Ok(())
}
