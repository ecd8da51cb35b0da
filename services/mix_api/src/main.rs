//! Mix API server entry point

use alligo_config::{load_config, LogFormat, LoggingSettings, RatioScalingMode, ServiceConfig};
use alligo_mix_api::MixApiServer;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    bind_address: Option<String>,

    /// Port
    #[arg(short, long)]
    port: Option<u16>,

    /// Disable CORS headers
    #[arg(long)]
    disable_cors: bool,

    /// Simplified ratio formatting
    #[arg(long, value_enum)]
    ratio_scaling: Option<ScalingArg>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScalingArg {
    Precision,
    Fixed,
}

impl From<ScalingArg> for RatioScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Precision => RatioScalingMode::Precision,
            ScalingArg::Fixed => RatioScalingMode::Fixed,
        }
    }
}

impl Args {
    fn apply(self, config: &mut ServiceConfig) {
        if let Some(bind_address) = self.bind_address {
            config.server.bind_address = bind_address;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.disable_cors {
            config.server.enable_cors = false;
        }
        if let Some(scaling) = self.ratio_scaling {
            config.solver.ratio_scaling = scaling.into();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
    }
}

fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    init_tracing(&config.logging);

    info!("Starting Alligo Mix API");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded: {:?}", config);

    let server = MixApiServer::new(config).context("Failed to configure solver")?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    if let Err(e) = server.run(shutdown_signal).await {
        error!("Mix API server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
