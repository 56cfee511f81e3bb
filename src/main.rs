mod calculator;
mod config;
mod repl;
mod wisdom;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::wisdom::WisdomClient;

fn init_logging() {
    // Logs go to stderr so the calculator display on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_wisdom_client(config: &Config) -> Option<Arc<WisdomClient>> {
    if !config.wisdom.enabled {
        info!("wisdom disabled in configuration");
        return None;
    }
    let Some(api_key) = config.wisdom.api_key() else {
        warn!(
            "no API key in ${}; continuing without wisdom",
            config.wisdom.api_key_env
        );
        return None;
    };
    match WisdomClient::new(&config.wisdom, &api_key) {
        Ok(client) => Some(Arc::new(client)),
        Err(error) => {
            warn!("could not set up the wisdom client: {error}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            warn!("falling back to default configuration: {error}");
            Config::default()
        }
    };

    let wisdom = build_wisdom_client(&config);
    repl::run(wisdom).await
}
