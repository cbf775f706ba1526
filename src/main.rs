use anyhow::Result;
use clap::Parser;
use tokenforge::cli::Cli;
use tokenforge::commands;
use tokenforge::config::Config;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    commands::dispatch(cli, config).await
}
