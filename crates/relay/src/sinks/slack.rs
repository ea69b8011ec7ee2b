use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy, Client, Proxy};
use tracing::debug;

use super::{MessageSink, SendError};
use crate::{config::SlackConfig, message::ChatMessage, Error, Result};

/// Posts messages to a Slack incoming webhook.
///
/// Redirects are never followed: a webhook URL that answers with a redirect
/// is reported as [`SendError::RedirectRejected`] so the message body never
/// reaches the redirect target.
#[derive(Debug, Clone)]
pub struct SlackWebhookSink {
    webhook_url: String,
    client: Client,
}

impl SlackWebhookSink {
    pub fn new(webhook_url: impl Into<String>, proxy: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().redirect(Policy::none());

        builder = match proxy {
            Some(proxy) => {
                let proxy = Proxy::all(proxy)
                    .map_err(|e| Error::Config(format!("Invalid proxy address {}: {}", proxy, e)))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            webhook_url: webhook_url.into(),
            client,
        })
    }

    pub fn from_config(config: &SlackConfig) -> Result<Self> {
        Self::new(config.webhook_url.clone(), config.proxy.as_deref())
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl MessageSink for SlackWebhookSink {
    async fn send(&self, message: &ChatMessage) -> std::result::Result<(), SendError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        debug!("Slack webhook answered with status {}", status);

        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            return Err(SendError::RedirectRejected {
                status: status.as_u16(),
                location,
            });
        }

        if status.as_u16() >= 400 {
            return Err(SendError::Delivery {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
