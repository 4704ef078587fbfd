use clap::Parser;
use commands::Command;
use teamcity::{ClientConfig, TeamCity};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Manage TeamCity build configurations.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Total attempts per request, overrides TEAMCITY_RETRIES
    #[arg(long, global = true)]
    retries: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_environment().map_err(|e| e.to_string())?;
    if let Some(retries) = cli.retries {
        config.retries = retries;
    }

    let client =
        TeamCity::build(&config).map_err(|e| format!("Failed to create TeamCity client {e}"))?;

    debug!(url = %config.url, retries = client.retries(), "using TeamCity server");

    let mut stdout = std::io::stdout().lock();
    commands::run(&client, cli.command, &mut stdout)
        .await
        .map_err(|e| e.to_string())
}
