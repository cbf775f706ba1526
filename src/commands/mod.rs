pub mod wizard;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use anyhow::Result;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);
            crate::gateway::run_gateway(&host, port, &config).await
        }
        Commands::Wizard { moodboard, out_dir } => {
            wizard::run(&config, moodboard.as_deref(), &out_dir).await
        }
    }
}
