pub mod slack;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::ChatMessage;

pub use slack::SlackWebhookSink;

/// Failure delivering a message to a sink. Never retried.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Redirect rejected (status {status}, location {location:?})")]
    RedirectRejected {
        status: u16,
        location: Option<String>,
    },
    #[error("Error sending message. Status: {status}")]
    Delivery { status: u16 },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> Result<(), SendError>;
}
