use std::path::PathBuf;

use anyhow::Result;
use trailcast::{TrailcastConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config file path as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => TrailcastConfig::load_from_path(Some(PathBuf::from(path)))?,
        None => TrailcastConfig::load()?,
    };

    logging::init(&config.logging);
    tracing::debug!(?config, "Loaded configuration");

    web::run(config).await
}
