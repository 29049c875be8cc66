use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use lntop::cli::{Cli, Command};
use lntop::config::Config;
use lntop::logging::init_tracing;
use lntop::network::{DataSource, LndClient};
use lntop::pubsub::{drain_events, PubSub};
use lntop::shutdown::ShutdownCoordinator;
use lntop::ui::runtime;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "exiting");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logger, cli.verbose).context("initialising logging")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network.name,
        address = %config.network.address,
        "starting"
    );

    let client = Arc::new(
        LndClient::from_config(&config.network).context("creating LND client")?,
    );

    match cli.command {
        None => runtime::run(&config, client).await?,
        Some(Command::WalletBalance) => {
            let balance = client.get_wallet_balance().await?;
            println!("{}", balance.total);
        }
        Some(Command::Pubsub) => print_events(&config, client).await?,
    }
    Ok(())
}

/// Run only the subscription transport, one event per line on stdout.
async fn print_events(config: &Config, client: Arc<LndClient>) -> Result<()> {
    let shutdown = ShutdownCoordinator::new();
    let signals = shutdown.handle();
    tokio::spawn(async move {
        if let Err(err) = signals.watch_os_signals().await {
            tracing::warn!(error = %err, "cannot install signal handlers");
        }
    });

    let (tx, rx) = mpsc::channel(config.ui.event_buffer);
    let source: Arc<dyn DataSource> = client.clone();
    let pubsub = PubSub::new(source, Duration::from_secs(config.ui.poll_interval_secs))
        .with_invoices(client);
    let transport = tokio::spawn(pubsub.run(tx, shutdown.handle()));

    drain_events(rx, transport, |event| println!("{}", event.kind()))
        .await
        .context("subscription transport failed")
}
