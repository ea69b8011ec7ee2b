//! Slack message payload
//!
//! Mirrors the subset of the Slack Block Kit payload accepted by incoming
//! webhooks: top-level blocks, a fallback text and one attachment group.

pub mod format;

use serde::{Deserialize, Serialize};

pub use format::{build_message, format_timestamp, render_alert};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub blocks: Vec<MessageBlock>,
    /// Fallback text shown in notifications.
    pub text: String,
    /// Empty means the webhook's default channel.
    pub channel: String,
    pub icon_emoji: String,
    pub username: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub blocks: Vec<MessageBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: TextObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Header,
    Section,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKind {
    #[serde(rename = "plain_text")]
    PlainText,
    #[serde(rename = "mrkdwn")]
    Markdown,
}

impl MessageBlock {
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Header,
            text: TextObject {
                kind: TextKind::PlainText,
                text: text.into(),
            },
        }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Section,
            text: TextObject {
                kind: TextKind::Markdown,
                text: text.into(),
            },
        }
    }
}

impl ChatMessage {
    /// Section blocks across all attachment groups, in order.
    pub fn sections(&self) -> impl Iterator<Item = &MessageBlock> {
        self.attachments
            .iter()
            .flat_map(|attachment| attachment.blocks.iter())
            .filter(|block| block.kind == BlockKind::Section)
    }
}
