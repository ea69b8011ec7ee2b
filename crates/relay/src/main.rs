use alert_relay::{config::Config, server::Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    info!(
        "Loaded configuration (proxy configured: {}, default channel: '{}')",
        config.slack.proxy.is_some(),
        config.slack.default_channel
    );

    // Initialize server
    let server = Server::from_config(&config)?;

    // Start server
    info!("Starting server on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
