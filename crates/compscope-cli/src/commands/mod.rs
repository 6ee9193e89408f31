//! Command implementations

mod analyze;
mod config;
mod presets;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, config_path, &output).await,
        Commands::Presets => presets::execute(&output),
        Commands::Config(args) => config::execute(args, config_path, &output),
    }
}
