//! Notification handling
//!
//! Chains decoding, formatting and delivery for one inbound notification and
//! maps every outcome to a response. Nothing here returns an error: the
//! caller always gets a [`RelayResponse`].

mod state;

use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    message::{build_message, ChatMessage},
    metrics,
    sinks::MessageSink,
    sources::{parse_batch, DecodeError},
};

pub use state::RelayState;

pub const DELIVERY_FAILED_BODY: &str = "Error sending Slack message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub state: RelayState,
    pub status: StatusCode,
    pub body: String,
}

impl RelayResponse {
    fn parse_failed(err: &DecodeError) -> Self {
        Self {
            state: RelayState::ParseFailed,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: format!(
                "Error: Invalid JSON payload ||| {} Body Obtained||||{}",
                err, err.body
            ),
        }
    }

    fn delivery_failed() -> Self {
        Self {
            state: RelayState::DeliveryFailed,
            status: StatusCode::BAD_GATEWAY,
            body: DELIVERY_FAILED_BODY.to_string(),
        }
    }

    /// Response for a delivered message, echoing the encoded payload.
    ///
    /// An encoding failure still answers 200 with a diagnostic body; existing
    /// callers rely on that status.
    fn from_echo(encoded: serde_json::Result<String>) -> Self {
        match encoded {
            Ok(body) => Self {
                state: RelayState::Delivered,
                status: StatusCode::OK,
                body,
            },
            Err(e) => Self {
                state: RelayState::SerializationFailed,
                status: StatusCode::OK,
                body: format!("Error in generating payload |||{}", e),
            },
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let content_type = match self.state {
            RelayState::Delivered => "application/json",
            _ => "text/plain; charset=utf-8",
        };
        (self.status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

pub struct AlertRelay {
    sink: Arc<dyn MessageSink>,
    default_channel: String,
}

impl AlertRelay {
    pub fn new(sink: Arc<dyn MessageSink>, default_channel: impl Into<String>) -> Self {
        Self {
            sink,
            default_channel: default_channel.into(),
        }
    }

    /// The requested channel when present and non-empty, else the configured default.
    pub fn resolve_channel<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|channel| !channel.is_empty())
            .unwrap_or(self.default_channel.as_str())
    }

    pub async fn handle(&self, raw_body: &[u8], channel: Option<&str>) -> RelayResponse {
        let response = self.process(raw_body, channel).await;
        metrics::record_outcome(response.state);
        debug!("Notification handled with state {}", response.state);
        response
    }

    async fn process(&self, raw_body: &[u8], channel: Option<&str>) -> RelayResponse {
        let batch = match parse_batch(raw_body) {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Invalid JSON payload: {}", e);
                return RelayResponse::parse_failed(&e);
            }
        };

        info!(
            "Received {} alerts from receiver '{}' (status: {}, group: {})",
            batch.len(),
            batch.receiver,
            batch.status,
            batch.group_key
        );
        metrics::record_alerts(batch.len());

        let channel = self.resolve_channel(channel);
        let message = build_message(&batch, channel);

        if let Err(e) = self.sink.send(&message).await {
            error!("Error sending Slack message: {}", e);
            return RelayResponse::delivery_failed();
        }

        info!(
            "Delivered {} alerts to channel '{}': {:?}",
            batch.len(),
            channel,
            batch.alert_names()
        );
        RelayResponse::from_echo(encode(&message))
    }
}

fn encode(message: &ChatMessage) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MockMessageSink, SendError};

    const HIGH_CPU: &[u8] = br#"{"alerts":[{"status":"firing","labels":{"alertname":"HighCPU"},"annotations":{},"generatorURL":"http://x"}]}"#;

    fn relay_with(mock: MockMessageSink, default_channel: &str) -> AlertRelay {
        AlertRelay::new(Arc::new(mock), default_channel)
    }

    #[tokio::test]
    async fn test_parse_failure_returns_500_with_raw_body() {
        let mut mock = MockMessageSink::new();
        mock.expect_send().never();
        let relay = relay_with(mock, "");

        let response = relay.handle(b"{\"alerts\": [oops", None).await;
        assert_eq!(response.state, RelayState::ParseFailed);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body.starts_with("Error: Invalid JSON payload ||| "));
        assert!(response.body.contains("{\"alerts\": [oops"));
    }

    #[tokio::test]
    async fn test_delivery_failure_returns_502() {
        let mut mock = MockMessageSink::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(SendError::Delivery { status: 404 }));
        let relay = relay_with(mock, "");

        let response = relay.handle(HIGH_CPU, None).await;
        assert_eq!(response.state, RelayState::DeliveryFailed);
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.body, "Error sending Slack message");
    }

    #[tokio::test]
    async fn test_redirect_treated_as_delivery_failure() {
        let mut mock = MockMessageSink::new();
        mock.expect_send().times(1).returning(|_| {
            Err(SendError::RedirectRejected {
                status: 302,
                location: Some("http://elsewhere".to_string()),
            })
        });
        let relay = relay_with(mock, "");

        let response = relay.handle(HIGH_CPU, None).await;
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.body, DELIVERY_FAILED_BODY);
    }

    #[tokio::test]
    async fn test_delivered_echoes_sent_message() {
        let mut mock = MockMessageSink::new();
        mock.expect_send()
            .withf(|message: &ChatMessage| {
                message.channel == "#ops" && message.blocks[0].text.text == "1 Alerts received"
            })
            .times(1)
            .returning(|_| Ok(()));
        let relay = relay_with(mock, "");

        let response = relay.handle(HIGH_CPU, Some("#ops")).await;
        assert_eq!(response.state, RelayState::Delivered);
        assert_eq!(response.status, StatusCode::OK);

        let echoed: ChatMessage = serde_json::from_str(&response.body).unwrap();
        let batch = parse_batch(HIGH_CPU).unwrap();
        assert_eq!(echoed, build_message(&batch, "#ops"));
    }

    #[tokio::test]
    async fn test_default_channel_used_without_query() {
        let mut mock = MockMessageSink::new();
        mock.expect_send()
            .withf(|message: &ChatMessage| message.channel == "#fallback")
            .times(2)
            .returning(|_| Ok(()));
        let relay = relay_with(mock, "#fallback");

        assert_eq!(relay.handle(HIGH_CPU, None).await.status, StatusCode::OK);
        assert_eq!(relay.handle(HIGH_CPU, Some("")).await.status, StatusCode::OK);
    }

    #[test]
    fn test_resolve_channel() {
        let relay = relay_with(MockMessageSink::new(), "");
        assert_eq!(relay.resolve_channel(None), "");
        assert_eq!(relay.resolve_channel(Some("#a")), "#a");
    }

    #[test]
    fn test_serialization_failure_still_returns_200() {
        let err = serde_json::from_str::<u8>("not a number").unwrap_err();
        let expected = format!("Error in generating payload |||{}", err);
        let response = RelayResponse::from_echo(Err(err));
        assert_eq!(response.state, RelayState::SerializationFailed);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, expected);
    }
}
