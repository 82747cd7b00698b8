use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use favorite_weather::{AppConfig, FavoriteAggregator, logging, web};

/// Save favorite places and check their current weather and forecast
#[derive(Debug, Parser)]
#[command(name = "favorite-weather", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging)?;
    tracing::info!("Starting favorite-weather {}", favorite_weather::VERSION);

    let aggregator = FavoriteAggregator::from_config(&config)?;
    web::run(&config.server, aggregator).await
}
