use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Attachment, ChatMessage, MessageBlock};
use crate::sources::{Alert, AlertBatch};

pub const ICON_EMOJI: &str = ":alert:";
pub const USERNAME: &str = "AlertBot";
pub const FALLBACK_TEXT: &str = "Alerts found";

/// Rendering of a missing timestamp.
const ZERO_TIME: &str = "0001-01-01 00:00:00 +0000 UTC";

/// Build the Slack message for a batch: one header counting the alerts and a
/// single attachment holding one section per alert, in batch order.
pub fn build_message(batch: &AlertBatch, channel: &str) -> ChatMessage {
    let sections = batch
        .alerts
        .iter()
        .map(|alert| MessageBlock::section(render_alert(alert)))
        .collect();

    ChatMessage {
        blocks: vec![MessageBlock::header(format!(
            "{} Alerts received",
            batch.len()
        ))],
        text: FALLBACK_TEXT.to_string(),
        channel: channel.to_string(),
        icon_emoji: ICON_EMOJI.to_string(),
        username: USERNAME.to_string(),
        attachments: vec![Attachment { blocks: sections }],
    }
}

/// Markdown body of a single alert section.
pub fn render_alert(alert: &Alert) -> String {
    let name = alert.name();
    debug!("Rendering alert {}", name);

    let mut lines = Vec::with_capacity(8 + alert.annotations.len() + alert.labels.len());
    lines.push(format!("*Alert: * {}", name));
    lines.push(format!("*Status:* {}", alert.status));
    for (key, value) in &alert.annotations {
        lines.push(format!("*{}* : {}", key, value));
    }
    lines.push(format!("*StartsAt:* _{}_", format_timestamp(alert.starts_at.as_ref())));
    lines.push(format!("*EndsAt:* _{}_", format_timestamp(alert.ends_at.as_ref())));
    lines.push(String::new());
    lines.push("*Details:* ".to_string());
    for (key, value) in &alert.labels {
        lines.push(format!("- *_{}_* : `{}`", key, value));
    }
    lines.push(String::new());
    lines.push(format!("*GeneratorURL:* {}", alert.generator_url));

    lines.join("\n")
}

/// Human-readable UTC timestamp, e.g. `2024-03-01 12:30:00 +0000 UTC`.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f +0000 UTC").to_string(),
        None => ZERO_TIME.to_string(),
    }
}
