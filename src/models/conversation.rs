use serde::{Deserialize, Serialize};

/// Whether a message's content is text or a reference to embedded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: String,
    /// Message text, or the image URL when `kind` is [`ContentKind::Media`]
    pub content: String,
    pub kind: ContentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self { name: name.into(), messages }
    }
}
