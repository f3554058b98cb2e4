//! Dev server binary.
//!
//! Loads (or defaults) the configuration, compiles the route table and
//! forward rules, and serves until Ctrl+C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spa_dev_server::config::{load_config, DevServerConfig};
use spa_dev_server::http::HttpServer;
use spa_dev_server::lifecycle::Shutdown;
use spa_dev_server::observability::metrics;
use spa_dev_server::proxy::Forwarder;
use spa_dev_server::routing::RouteTable;
use spa_dev_server::views;

#[derive(Parser)]
#[command(name = "spa-dev-server")]
#[command(about = "Development server for the chat single-page app", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DevServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "spa_dev_server={},tower_http=info",
                    config.observability.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("spa-dev-server v0.1.0 starting");

    // Compile the route table against the built-in chat views; every
    // violation is reported before exiting.
    let registry = views::default_registry();
    let table = match RouteTable::from_config(config.routes.clone(), &registry) {
        Ok(table) => Arc::new(table),
        Err(errors) => {
            for error in &errors {
                tracing::error!(error = %error, "Invalid route table");
            }
            return Err("route table validation failed".into());
        }
    };
    let forwarder = Arc::new(Forwarder::from_config(&config.forward)?);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = table.len(),
        forward_rules = forwarder.rules().len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, table, forwarder);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
