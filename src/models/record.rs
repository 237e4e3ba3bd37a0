use serde::{Deserialize, Serialize};

use super::conversation::{ContentKind, Message};

/// Message direction relative to the operating user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Fixed author for this direction, if it has one.
    /// Outbound messages are always written by the operator.
    pub fn author_for<'a>(&self, operator: &'a str) -> Option<&'a str> {
        match self {
            Direction::Outbound => Some(operator),
            Direction::Inbound => None,
        }
    }
}

/// A message as read from markup, before authors are resolved.
///
/// `author` is empty for continuation messages. `content` is never empty:
/// nodes without text or an image are dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub author: String,
    pub content: String,
    pub kind: ContentKind,
}

impl RawRecord {
    pub fn text(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self { author: author.into(), content: content.into(), kind: ContentKind::Text }
    }

    pub fn media(author: impl Into<String>, url: impl Into<String>) -> Self {
        Self { author: author.into(), content: url.into(), kind: ContentKind::Media }
    }

    pub fn into_message(self) -> Message {
        Message { author: self.author, content: self.content, kind: self.kind }
    }
}
