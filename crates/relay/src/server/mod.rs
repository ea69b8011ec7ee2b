mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    relay::AlertRelay,
    sinks::{MessageSink, SlackWebhookSink},
    Result,
};

pub use routes::channel_param;

pub struct Server {
    relay: Arc<AlertRelay>,
}

impl Server {
    pub fn new(config: &Config, sink: Arc<dyn MessageSink>) -> Self {
        let relay = AlertRelay::new(sink, config.slack.default_channel.clone());
        Self {
            relay: Arc::new(relay),
        }
    }

    /// Server posting to the Slack webhook named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sink = SlackWebhookSink::from_config(&config.slack)?;
        Ok(Self::new(config, Arc::new(sink)))
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/alerts", post(routes::relay_alerts))
            .route("/webhook/alerts", post(routes::relay_alerts))
            .route("/metrics", get(routes::metrics))
            .layer(TraceLayer::new_for_http())
            .with_state(self.relay)
    }

    pub async fn start(self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, stopping server");
}
