//! Sensor feed service entry point.

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sensor_feed::api::{create_router, AppState};
use sensor_feed::config::Config;
use sensor_feed::error::ServiceError;
use sensor_feed::metrics;
use sensor_feed::sensor::SystemClock;
use sensor_feed::utils::shutdown_signal;

/// Temperature/humidity sensor feed service.
#[derive(Parser, Debug)]
#[command(name = "sensor-feed")]
#[command(about = "Ingest readings from a temperature/humidity sensor and serve a live dashboard")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Address to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so DEBUG can raise the filter
    let config = Config::load().map_err(ServiceError::from);

    // Initialize logging
    let debug = args.verbose || config.as_ref().map(|c| c.debug).unwrap_or(false);
    let filter = if debug {
        EnvFilter::new("sensor_feed=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = config
                .as_ref()
                .map(|c| c.rust_log.clone())
                .unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level)
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config, &mut std::io::stdout()),
        Some(Command::Serve { host, port }) => cmd_serve(loaded(config)?, host, port).await,
        None => cmd_serve(loaded(config)?, args.host, args.port).await,
    }
}

/// Unwrap a loaded configuration, logging a load failure.
fn loaded(config: Result<Config, ServiceError>) -> Result<Config, ServiceError> {
    config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })
}

/// Check configuration validity, reporting each step to `out`.
fn cmd_check_config(
    config: Result<Config, ServiceError>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "======================================================================")?;
    writeln!(out, "SENSOR FEED - CONFIGURATION CHECK")?;
    writeln!(out, "======================================================================")?;

    // Load configuration
    write!(out, "Loading configuration... ")?;
    let config = match config {
        Ok(c) => {
            writeln!(out, "OK")?;
            c
        }
        Err(e) => {
            writeln!(out, "FAILED")?;
            writeln!(out, "  Error: {}", e)?;
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    write!(out, "Validating configuration... ")?;
    match config.validate() {
        Ok(()) => writeln!(out, "OK")?,
        Err(e) => {
            writeln!(out, "FAILED")?;
            writeln!(out, "  Error: {}", e)?;
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    writeln!(out, "----------------------------------------------------------------------")?;
    writeln!(out, "Configuration Summary:")?;
    writeln!(out, "  Bind Address: {}", config.bind_addr())?;
    writeln!(out, "  Refresh Interval: {}s", config.refresh_interval)?;
    writeln!(out, "  Debug: {}", config.debug)?;
    writeln!(out, "  Log Level: {}", config.rust_log)?;
    writeln!(out, "======================================================================")?;
    writeln!(out, "CONFIGURATION CHECK PASSED")?;
    writeln!(out, "======================================================================")?;

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    mut config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host_override {
        config.host = host;
    }
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Configuration loaded successfully");
    info!("Dashboard refresh interval: {}s", config.refresh_interval);

    // Initialize metrics
    let handle = metrics::install_recorder()?;

    let app_state =
        AppState::new(Arc::new(SystemClock), config.refresh_interval).with_metrics(handle);
    let router = create_router(app_state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("Server stopped");
    Ok(())
}
