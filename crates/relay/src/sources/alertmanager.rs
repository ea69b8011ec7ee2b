use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Label holding the alert title.
pub const ALERT_NAME_LABEL: &str = "alertname";

// AlertManager webhook payload structures
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AlertBatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub receiver: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
    #[serde(rename = "groupLabels", default, deserialize_with = "null_as_default")]
    pub group_labels: BTreeMap<String, String>,
    #[serde(rename = "commonLabels", default, deserialize_with = "null_as_default")]
    pub common_labels: BTreeMap<String, String>,
    #[serde(rename = "commonAnnotations", default, deserialize_with = "null_as_default")]
    pub common_annotations: BTreeMap<String, String>,
    #[serde(rename = "externalURL", default, deserialize_with = "null_as_default")]
    pub external_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(rename = "groupKey", default, deserialize_with = "null_as_default")]
    pub group_key: String,
    #[serde(rename = "truncatedAlerts", default, deserialize_with = "null_as_default")]
    pub truncated_alerts: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
    #[serde(rename = "startsAt", default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(rename = "endsAt", default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(rename = "generatorURL", default, deserialize_with = "null_as_default")]
    pub generator_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fingerprint: String,
}

impl Alert {
    /// Value of the `alertname` label, or an empty string when the label is absent.
    pub fn name(&self) -> &str {
        self.labels
            .get(ALERT_NAME_LABEL)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl AlertBatch {
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn alert_names(&self) -> Vec<&str> {
        self.alerts.iter().map(Alert::name).collect()
    }
}

/// Inbound body that could not be decoded into an [`AlertBatch`].
#[derive(Debug, Error)]
#[error("{source}")]
pub struct DecodeError {
    /// The raw request body, lossily converted to UTF-8.
    pub body: String,
    #[source]
    pub source: serde_json::Error,
}

/// Decode an Alertmanager notification. Unknown fields are ignored and missing
/// ones fall back to their empty value.
pub fn parse_batch(raw: &[u8]) -> Result<AlertBatch, DecodeError> {
    serde_json::from_slice(raw).map_err(|source| DecodeError {
        body: String::from_utf8_lossy(raw).into_owned(),
        source,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
