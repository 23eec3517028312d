use crate::cli::{Args, Command};
use anyhow::Context;
use clap::Parser;
use oc_gateway_web::{GatewayConfig, ServerConfig};
use std::path::Path;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;

const DEFAULT_LOG_FILTER: &str = "oc_gateway=info,tower_http=info";

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_tracing();
    match matches.command {
        Command::Serve { config, bind } => serve(&config, &bind).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: &Path, bind: &str) -> anyhow::Result<()> {
    let gateway = GatewayConfig::from_file(config)
        .with_context(|| format!("Could not load the configuration {}", config.display()))?
        .with_env_overrides();
    info!("Base URL: {}", gateway.base_url);

    let server_config = ServerConfig {
        gateway,
        bind: bind.to_owned(),
    };
    oc_gateway_web::serve(server_config).await
}
