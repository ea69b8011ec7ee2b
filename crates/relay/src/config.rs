use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WEBHOOK_URL: &str = "https://hooks.slack.com/services/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Used when the request carries no `channel` query parameter.
    #[serde(default)]
    pub default_channel: String,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR")
                    .unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string()),
            },
            slack: SlackConfig {
                webhook_url: std::env::var("SLACK_WEBHOOK_URL")
                    .unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string()),
                proxy: std::env::var("SLACK_PROXY")
                    .ok()
                    .filter(|proxy| !proxy.trim().is_empty()),
                default_channel: std::env::var("SLACK_CHANNEL").unwrap_or_default(),
            },
        };

        if config.slack.webhook_url == DEFAULT_WEBHOOK_URL {
            tracing::warn!("SLACK_WEBHOOK_URL is not set. Messages will be posted to the bare Slack webhook endpoint.");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        Url::parse(&self.slack.webhook_url).map_err(|e| {
            crate::Error::Config(format!(
                "SLACK_WEBHOOK_URL is not a valid URL ({}): {}",
                self.slack.webhook_url, e
            ))
        })?;

        if let Some(proxy) = &self.slack.proxy {
            Url::parse(proxy).map_err(|e| {
                crate::Error::Config(format!("SLACK_PROXY is not a valid URL ({}): {}", proxy, e))
            })?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: DEFAULT_SERVER_ADDR.to_string(),
            },
            slack: SlackConfig {
                webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
                proxy: None,
                default_channel: String::new(),
            },
        }
    }
}
