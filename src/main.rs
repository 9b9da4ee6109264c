use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use hedgeline::adapter::inbound::cli::command::Cli;
use hedgeline::adapter::inbound::cli::output::{self, OutputConfig};
use hedgeline::adapter::inbound::cli::run::execute;
use hedgeline::infrastructure::bootstrap::build_session;
use hedgeline::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet));
    if cli.no_color {
        owo_colors::set_override(false);
    }

    if let Err(e) = run(&cli).await {
        error!(error = %e, "Command failed");
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    config.init_logging();
    info!(config = %cli.config.display(), "hedgeline starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        }
    });

    let session = build_session(&config)?;
    execute(cli, &session, shutdown_rx).await?;
    Ok(())
}
