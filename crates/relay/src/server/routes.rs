use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use url::form_urlencoded;

use crate::{
    metrics::gather_metrics,
    relay::{AlertRelay, RelayResponse},
};

/// First `channel` value of a raw query string. Repeated or unrelated
/// parameters never reject the request.
pub fn channel_param(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "channel")
        .map(|(_, value)| value.into_owned())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics() -> Response {
    match gather_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!("Error gathering metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn relay_alerts(
    State(relay): State<Arc<AlertRelay>>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> RelayResponse {
    let channel = channel_param(query.as_deref());
    relay.handle(&body, channel.as_deref()).await
}
